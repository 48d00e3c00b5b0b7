//! Core geometric types for the layout engine

/// A 2D point in canvas pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a vector
    pub fn offset(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned bounding box representing the spatial extent of a drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point of the bounding box (rounded towards the origin)
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2,
            y: self.y + self.height / 2,
        }
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if this bounding box intersects another.
    ///
    /// Boxes that only share an edge do not intersect, so a drawable stacked
    /// directly on top of another is not a conflict.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Size of the overlap along each axis, or `None` if the boxes don't intersect
    pub fn overlap(&self, other: &BoundingBox) -> Option<(i32, i32)> {
        if !self.intersects(other) {
            return None;
        }
        let dx = self.right().min(other.right()) - self.x.max(other.x);
        let dy = self.bottom().min(other.bottom()) - self.y.max(other.y);
        Some((dx, dy))
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Translate by a vector
    pub fn translated(&self, dx: i32, dy: i32) -> BoundingBox {
        BoundingBox::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Target canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The canvas as a bounding box anchored at the origin
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0, 0, self.width, self.height)
    }

    /// Clamp a box's origin so it lies inside the canvas.
    ///
    /// A box larger than the canvas along an axis is centered on that axis instead.
    pub fn clamp(&self, bounds: &BoundingBox) -> Point {
        Point::new(
            clamp_axis(bounds.x, bounds.width, self.width),
            clamp_axis(bounds.y, bounds.height, self.height),
        )
    }
}

fn clamp_axis(origin: i32, extent: i32, max: i32) -> i32 {
    if extent > max {
        (max - extent) / 2
    } else {
        origin.clamp(0, max - extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point::new(10, 20).offset(5, -5);
        assert_eq!(p, Point::new(15, 15));
    }

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10, 20, 100, 50);
        assert_eq!(bb.right(), 110);
        assert_eq!(bb.bottom(), 70);
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox::new(0, 0, 100, 50);
        assert_eq!(bb.center(), Point::new(50, 25));
    }

    #[test]
    fn test_bounding_box_contains() {
        let bb = BoundingBox::new(0, 0, 100, 100);
        assert!(bb.contains(Point::new(50, 50)));
        assert!(bb.contains(Point::new(0, 0)));
        assert!(bb.contains(Point::new(100, 100)));
        assert!(!bb.contains(Point::new(-1, 50)));
        assert!(!bb.contains(Point::new(101, 50)));
    }

    #[test]
    fn test_bounding_box_intersects() {
        let a = BoundingBox::new(0, 0, 100, 100);
        let b = BoundingBox::new(50, 50, 100, 100);
        let c = BoundingBox::new(200, 200, 50, 50);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn test_touching_boxes_do_not_intersect() {
        let table = BoundingBox::new(0, 100, 200, 100);
        let ball = BoundingBox::new(50, 0, 100, 100);
        assert!(!table.intersects(&ball));
    }

    #[test]
    fn test_overlap_extent() {
        let a = BoundingBox::new(0, 0, 100, 100);
        let b = BoundingBox::new(60, 80, 100, 100);
        assert_eq!(a.overlap(&b), Some((40, 20)));
        assert_eq!(a.overlap(&BoundingBox::new(500, 0, 10, 10)), None);
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0, 0, 50, 50);
        let b = BoundingBox::new(100, 100, 50, 50);
        assert_eq!(a.union(&b), BoundingBox::new(0, 0, 150, 150));
    }

    #[test]
    fn test_canvas_clamp() {
        let canvas = Canvas::new(800, 600);
        assert_eq!(
            canvas.clamp(&BoundingBox::new(-20, 590, 100, 100)),
            Point::new(0, 500)
        );
        // wider than the canvas: centered
        assert_eq!(
            canvas.clamp(&BoundingBox::new(0, 0, 1000, 100)),
            Point::new(-100, 0)
        );
    }
}
