//! Placement rules for relative edges
//!
//! Every rule is expressed as the offset of Right's origin from Left's origin
//! plus a z-order delta. Placing Right from a positioned Left adds the offset;
//! placing Left from a positioned Right subtracts it, so both directions
//! produce the same arrangement.

use crate::layout::types::{BoundingBox, Point};
use crate::scene::drawable::Frame;

use super::RelativeKind;

/// Largest share (in percent) of the container an inner drawable may cover
pub const INSIDE_PERCENT: i32 = 60;

impl RelativeKind {
    /// Place whichever side of the pair is unpositioned.
    ///
    /// `reference` is the second positioned anchor of an in-the-middle-of
    /// relation. Returns false when both or neither side is positioned.
    pub fn apply(
        self,
        left: &mut Frame,
        right: &mut Frame,
        reference: Option<BoundingBox>,
    ) -> bool {
        match (left.bounds(), right.bounds()) {
            (Some(left_bounds), None) => {
                if self == RelativeKind::In {
                    fit_inside(right, &left_bounds);
                }
                let (offset, dz) = self.offset(left, right, reference.map(|r| (left_bounds, r)));
                right.position = Some(Point::new(left_bounds.x + offset.x, left_bounds.y + offset.y));
                right.z_index = left.z_index + dz;
                true
            }
            (None, Some(right_bounds)) => {
                // Right is already placed and may be anchored, so only Left moves
                if self == RelativeKind::In {
                    enclose(left, &right_bounds);
                }
                let position = match (self, reference) {
                    (RelativeKind::InMiddleOf, Some(reference)) => {
                        // right center = midpoint(left center, reference center)
                        let rc = right_bounds.center();
                        let refc = reference.center();
                        Point::new(
                            2 * rc.x - refc.x - left.width / 2,
                            2 * rc.y - refc.y - left.height / 2,
                        )
                    }
                    _ => {
                        let (offset, _) = self.offset(left, right, None);
                        Point::new(right_bounds.x - offset.x, right_bounds.y - offset.y)
                    }
                };
                let (_, dz) = self.offset(left, right, None);
                left.position = Some(position);
                left.z_index = right.z_index - dz;
                true
            }
            _ => false,
        }
    }

    /// Right's origin relative to Left's origin, and Right's z-index relative to Left's.
    ///
    /// `between` carries Left's bounds and the reference bounds when an
    /// in-the-middle-of relation has both.
    fn offset(
        self,
        left: &Frame,
        right: &Frame,
        between: Option<(BoundingBox, BoundingBox)>,
    ) -> (Point, i32) {
        let centered_x = (left.width - right.width) / 2;
        let centered_y = (left.height - right.height) / 2;

        match self {
            RelativeKind::OnTopOf => (Point::new(centered_x, -right.height), 1),
            RelativeKind::Under => (Point::new(centered_x, left.height), 0),
            RelativeKind::In => (Point::new(centered_x, centered_y), 1),
            RelativeKind::Behind => (
                Point::new(
                    centered_x + left.width / 3,
                    centered_y - left.height / 3,
                ),
                -1,
            ),
            RelativeKind::FullyBehind => (Point::new(centered_x, centered_y), -1),
            RelativeKind::ToLeftOf => (Point::new(-right.width, centered_y), 0),
            RelativeKind::ToRightOf => (Point::new(left.width, centered_y), 0),
            RelativeKind::InMiddleOf => match between {
                Some((left_bounds, reference)) => {
                    let lc = left_bounds.center();
                    let rc = reference.center();
                    let mid = Point::new((lc.x + rc.x) / 2, (lc.y + rc.y) / 2);
                    (
                        Point::new(
                            mid.x - right.width / 2 - left_bounds.x,
                            mid.y - right.height / 2 - left_bounds.y,
                        ),
                        1,
                    )
                }
                None => (Point::new(centered_x, centered_y), 1),
            },
        }
    }
}

/// Scale `inner` down (never up) to fit the inside share of `container`,
/// preserving its aspect ratio.
///
/// Zero-sized drawables take the whole inside share; nothing shrinks below 1px.
fn fit_inside(inner: &mut Frame, container: &BoundingBox) {
    let max_w = container.width * INSIDE_PERCENT / 100;
    let max_h = container.height * INSIDE_PERCENT / 100;

    if inner.width == 0 || inner.height == 0 {
        inner.width = max_w.max(1);
        inner.height = max_h.max(1);
        return;
    }

    let scale = (max_w as f64 / inner.width as f64)
        .min(max_h as f64 / inner.height as f64)
        .min(1.0);
    inner.width = ((inner.width as f64 * scale).round() as i32).max(1);
    inner.height = ((inner.height as f64 * scale).round() as i32).max(1);
}

/// Grow `container` (never shrink it) until `inner` fits its inside share.
fn enclose(container: &mut Frame, inner: &BoundingBox) {
    let min_w = (inner.width * 100 + INSIDE_PERCENT - 1) / INSIDE_PERCENT;
    let min_h = (inner.height * 100 + INSIDE_PERCENT - 1) / INSIDE_PERCENT;
    container.width = container.width.max(min_w);
    container.height = container.height.max(min_h);
}
