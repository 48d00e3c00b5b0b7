//! Canvas anchors and collision precedence between anchored drawables

use crate::layout::types::{BoundingBox, Canvas, Point};
use crate::scene::drawable::Frame;

use super::{Anchor, HorizontalPlace, VerticalPlace};

impl Anchor {
    /// Origin for `frame` under this anchor; unanchored axes are centered
    pub fn place(&self, frame: &Frame, canvas: Canvas) -> Point {
        let x = match self.horizontal() {
            Some(HorizontalPlace::Left) => 0,
            Some(HorizontalPlace::Right) => canvas.width - frame.width,
            None => (canvas.width - frame.width) / 2,
        };
        let y = match self.vertical() {
            Some(VerticalPlace::Top) => 0,
            Some(VerticalPlace::Bottom) => canvas.height - frame.height,
            None => (canvas.height - frame.height) / 2,
        };
        Point::new(x, y)
    }
}

/// One side of a potential collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorClaim {
    pub bounds: BoundingBox,
    /// `None` for a freely placed drawable, which ranks below every anchor
    pub anchor: Option<Anchor>,
    /// Order in which the drawable was anchored; earlier wins ties
    pub order: usize,
}

impl AnchorClaim {
    fn rank(&self) -> u8 {
        self.anchor
            .map(|a| a.place_type().precedence() + 1)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Which claim gives way and where it goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub relocate: Side,
    pub position: Point,
}

/// Resolve a collision between two claims.
///
/// The higher-precedence claim keeps its placement (Corner > Vertical =
/// Horizontal > Middle > free); on a tie the earlier-anchored claim stays.
/// The other one is pushed clear of the winner along the winner's anchored
/// axis, or along the axis of least overlap, and clamped into the canvas.
/// Returns `None` if the claims don't overlap.
pub fn resolve_conflict(
    first: &AnchorClaim,
    second: &AnchorClaim,
    canvas: Canvas,
) -> Option<Resolution> {
    let (dx, dy) = first.bounds.overlap(&second.bounds)?;

    let first_wins = match first.rank().cmp(&second.rank()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => first.order <= second.order,
    };
    let (winner, loser, relocate) = if first_wins {
        (first, second, Side::Second)
    } else {
        (second, first, Side::First)
    };

    let pushed = push_clear(winner, &loser.bounds, dx, dy);
    let moved = BoundingBox::new(pushed.x, pushed.y, loser.bounds.width, loser.bounds.height);
    Some(Resolution {
        relocate,
        position: canvas.clamp(&moved),
    })
}

/// Origin that moves `loser` off `winner`
fn push_clear(winner: &AnchorClaim, loser: &BoundingBox, dx: i32, dy: i32) -> Point {
    let w = &winner.bounds;
    let to_right = Point::new(w.right(), loser.y);
    let to_left = Point::new(w.x - loser.width, loser.y);
    let downward = Point::new(loser.x, w.bottom());
    let upward = Point::new(loser.x, w.y - loser.height);

    let horizontal = winner.anchor.and_then(|a| a.horizontal());
    let vertical = winner.anchor.and_then(|a| a.vertical());

    match (horizontal, vertical) {
        (Some(h), Some(v)) => {
            if dx <= dy {
                away_horizontally(h, to_right, to_left)
            } else {
                away_vertically(v, downward, upward)
            }
        }
        (Some(h), None) => away_horizontally(h, to_right, to_left),
        (None, Some(v)) => away_vertically(v, downward, upward),
        (None, None) => {
            // middle or free: least overlap, away from the winner's center
            let wc = w.center();
            let lc = loser.center();
            if dx <= dy {
                if lc.x >= wc.x {
                    to_right
                } else {
                    to_left
                }
            } else if lc.y >= wc.y {
                downward
            } else {
                upward
            }
        }
    }
}

fn away_horizontally(side: HorizontalPlace, to_right: Point, to_left: Point) -> Point {
    match side {
        HorizontalPlace::Left => to_right,
        HorizontalPlace::Right => to_left,
    }
}

fn away_vertically(side: VerticalPlace, downward: Point, upward: Point) -> Point {
    match side {
        VerticalPlace::Top => downward,
        VerticalPlace::Bottom => upward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Canvas = Canvas {
        width: 800,
        height: 600,
    };

    fn claim(anchor: Option<Anchor>, order: usize, frame: Frame) -> AnchorClaim {
        let position = anchor
            .map(|a| a.place(&frame, CANVAS))
            .unwrap_or_default();
        AnchorClaim {
            bounds: frame.bounds_at(position),
            anchor,
            order,
        }
    }

    #[test]
    fn test_anchor_positions() {
        let frame = Frame::new(100, 50);
        assert_eq!(Anchor::Top.place(&frame, CANVAS), Point::new(350, 0));
        assert_eq!(Anchor::Bottom.place(&frame, CANVAS), Point::new(350, 550));
        assert_eq!(Anchor::Middle.place(&frame, CANVAS), Point::new(350, 275));
        assert_eq!(
            Anchor::corner(HorizontalPlace::Right, VerticalPlace::Top).place(&frame, CANVAS),
            Point::new(700, 0)
        );
        let left_side = Anchor::Corner {
            horizontal: Some(HorizontalPlace::Left),
            vertical: None,
        };
        assert_eq!(left_side.place(&frame, CANVAS), Point::new(0, 275));
    }

    #[test]
    fn test_corner_beats_middle() {
        // a large drawable in the top-left corner reaching the canvas center
        let corner = claim(
            Some(Anchor::corner(HorizontalPlace::Left, VerticalPlace::Top)),
            1,
            Frame::new(450, 350),
        );
        let middle = claim(Some(Anchor::Middle), 0, Frame::new(100, 100));

        for (a, b, expected) in [
            (&corner, &middle, Side::Second),
            (&middle, &corner, Side::First),
        ] {
            let resolution = resolve_conflict(a, b, CANVAS).expect("claims overlap");
            assert_eq!(resolution.relocate, expected);
            let moved = BoundingBox::new(resolution.position.x, resolution.position.y, 100, 100);
            assert!(!moved.intersects(&corner.bounds));
        }
    }

    #[test]
    fn test_vertical_winner_pushes_down() {
        let top = claim(Some(Anchor::Top), 0, Frame::new(800, 100));
        let middle = AnchorClaim {
            bounds: BoundingBox::new(100, 50, 100, 100),
            anchor: Some(Anchor::Middle),
            order: 1,
        };
        let resolution = resolve_conflict(&top, &middle, CANVAS).expect("overlap");
        assert_eq!(resolution.relocate, Side::Second);
        assert_eq!(resolution.position, Point::new(100, 100));
    }

    #[test]
    fn test_equal_precedence_keeps_earlier_anchor() {
        let top = claim(Some(Anchor::Top), 3, Frame::new(200, 100));
        let late_top = AnchorClaim {
            bounds: BoundingBox::new(350, 20, 100, 100),
            anchor: Some(Anchor::Top),
            order: 7,
        };
        let resolution = resolve_conflict(&late_top, &top, CANVAS).expect("overlap");
        assert_eq!(resolution.relocate, Side::First);
    }

    #[test]
    fn test_free_drawable_gives_way_to_anchor() {
        let middle = claim(Some(Anchor::Middle), 0, Frame::new(100, 100));
        let free = AnchorClaim {
            bounds: BoundingBox::new(380, 260, 100, 100),
            anchor: None,
            order: 0,
        };
        let resolution = resolve_conflict(&free, &middle, CANVAS).expect("overlap");
        assert_eq!(resolution.relocate, Side::First);
        let moved = BoundingBox::new(resolution.position.x, resolution.position.y, 100, 100);
        assert!(!moved.intersects(&middle.bounds));
    }

    #[test]
    fn test_no_overlap_no_resolution() {
        let top = claim(Some(Anchor::Top), 0, Frame::new(100, 100));
        let bottom = claim(Some(Anchor::Bottom), 1, Frame::new(100, 100));
        assert_eq!(resolve_conflict(&top, &bottom, CANVAS), None);
    }
}
