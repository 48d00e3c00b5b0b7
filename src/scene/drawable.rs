//! Drawable elements: vertices (nouns) and the groups that stand in for them

use std::sync::Arc;

use crate::layout::types::{BoundingBox, Point};

use super::graph::{GroupId, VertexId};

/// Size given to a vertex before any scaling
pub const NOMINAL_SIZE: (i32, i32) = (100, 100);

/// Geometric state shared by every drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Top-left corner, unset until the drawable is placed
    pub position: Option<Point>,
    pub width: i32,
    pub height: i32,
    pub z_index: i32,
    /// Bound to a canvas-relative anchor rather than placed freely
    pub fixed: bool,
}

impl Frame {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            position: None,
            width: width.max(0),
            height: height.max(0),
            z_index: 0,
            fixed: false,
        }
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    /// Bounding box, if positioned
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.position
            .map(|p| BoundingBox::new(p.x, p.y, self.width, self.height))
    }

    /// Bounding box this frame would have at `position`
    pub fn bounds_at(&self, position: Point) -> BoundingBox {
        BoundingBox::new(position.x, position.y, self.width, self.height)
    }

    /// Move by a vector; unpositioned frames stay unpositioned
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if let Some(p) = self.position {
            self.position = Some(p.offset(dx, dy));
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(NOMINAL_SIZE.0, NOMINAL_SIZE.1)
    }
}

/// Encoded image data attached to a drawable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub mime: String,
    pub data: Arc<[u8]>,
}

impl Image {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data: data.into(),
        }
    }

    /// An image with no pixel data, used when only the name matters
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, "application/octet-stream", Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ownership state of a vertex's image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSlot {
    Owned(Image),
    /// The vertex was combined into a group that owns the composed image
    Superseded,
    #[default]
    Disposed,
}

/// Anything the layout engine can position
pub trait Drawable {
    fn frame(&self) -> &Frame;

    fn frame_mut(&mut self) -> &mut Frame;

    /// Image to paint for this drawable, if it still owns one
    fn image(&self) -> Option<&Image>;

    /// Release the image resource
    fn dispose(&mut self);

    fn is_positioned(&self) -> bool {
        self.frame().is_positioned()
    }

    fn bounds(&self) -> Option<BoundingBox> {
        self.frame().bounds()
    }
}

/// A noun of the sentence
#[derive(Debug, Clone)]
pub struct Vertex {
    pub noun: String,
    pub frame: Frame,
    pub(crate) group: Option<GroupId>,
    pub(crate) image: ImageSlot,
}

impl Vertex {
    pub fn new(noun: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            frame: Frame::default(),
            group: None,
            image: ImageSlot::Disposed,
        }
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.frame.width = width.max(0);
        self.frame.height = height.max(0);
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = ImageSlot::Owned(image);
        self
    }

    /// Group this vertex was last combined into, valid or not
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn image_slot(&self) -> &ImageSlot {
        &self.image
    }

    /// Hand the image over to a group
    pub(crate) fn supersede_image(&mut self) {
        self.image = ImageSlot::Superseded;
    }
}

impl Drawable for Vertex {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn image(&self) -> Option<&Image> {
        match &self.image {
            ImageSlot::Owned(image) => Some(image),
            ImageSlot::Superseded | ImageSlot::Disposed => None,
        }
    }

    fn dispose(&mut self) {
        if let ImageSlot::Owned(_) = self.image {
            self.image = ImageSlot::Disposed;
        }
    }
}

/// A composite drawable standing in for one or more combined vertices
#[derive(Debug, Clone)]
pub struct Group {
    pub frame: Frame,
    pub(crate) members: Vec<VertexId>,
    pub(crate) image: Option<Image>,
    pub(crate) valid: bool,
}

impl Group {
    pub(crate) fn new(members: Vec<VertexId>, width: i32, height: i32, image: Option<Image>) -> Self {
        Self {
            frame: Frame::new(width, height),
            members,
            image,
            valid: true,
        }
    }

    pub fn members(&self) -> &[VertexId] {
        &self.members
    }

    /// False once a later combination superseded this group
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl Drawable for Group {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    fn dispose(&mut self) {
        self.image = None;
    }
}
