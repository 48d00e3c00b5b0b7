//! Free placement for drawables no relation positions

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::drawable::Frame;

use super::config::LayoutConfig;
use super::types::{BoundingBox, Canvas, Point};

/// Picks random unoccupied spots on the canvas
#[derive(Debug)]
pub struct FreePlacer {
    rng: StdRng,
    attempts: usize,
}

impl FreePlacer {
    pub fn new(config: &LayoutConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            rng,
            attempts: config.placement_attempts,
        }
    }

    /// A random origin inside the canvas where `frame` overlaps none of `occupied`.
    ///
    /// After `attempts` misses, falls back to the first column right of every
    /// occupied box, which is free by construction.
    pub fn place(&mut self, frame: &Frame, occupied: &[BoundingBox], canvas: Canvas) -> Point {
        let max_x = (canvas.width - frame.width).max(0);
        let max_y = (canvas.height - frame.height).max(0);

        for _ in 0..self.attempts {
            let candidate = Point::new(
                self.rng.random_range(0..=max_x),
                self.rng.random_range(0..=max_y),
            );
            let bounds = frame.bounds_at(candidate);
            if !occupied.iter().any(|o| o.intersects(&bounds)) {
                return candidate;
            }
        }

        let x = occupied.iter().map(|o| o.right()).max().unwrap_or(0);
        Point::new(x, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_canvas_stays_inside() {
        let mut placer = FreePlacer::new(&LayoutConfig::new().with_seed(1));
        let frame = Frame::new(100, 100);
        let canvas = Canvas::new(800, 600);
        for _ in 0..20 {
            let p = placer.place(&frame, &[], canvas);
            assert!(p.x >= 0 && p.x <= 700);
            assert!(p.y >= 0 && p.y <= 500);
        }
    }

    #[test]
    fn test_avoids_occupied_boxes() {
        let mut placer = FreePlacer::new(&LayoutConfig::new().with_seed(3));
        let frame = Frame::new(100, 100);
        let occupied = [BoundingBox::new(0, 0, 400, 600)];
        let p = placer.place(&frame, &occupied, Canvas::new(800, 600));
        assert!(!frame.bounds_at(p).intersects(&occupied[0]));
    }

    #[test]
    fn test_full_canvas_falls_back_to_the_right() {
        let mut placer = FreePlacer::new(&LayoutConfig::new().with_seed(5));
        let frame = Frame::new(100, 100);
        let occupied = [BoundingBox::new(0, 0, 800, 600)];
        let p = placer.place(&frame, &occupied, Canvas::new(800, 600));
        assert_eq!(p, Point::new(800, 0));
    }

    #[test]
    fn test_same_seed_same_spot() {
        let config = LayoutConfig::new().with_seed(99);
        let frame = Frame::new(50, 50);
        let canvas = Canvas::new(640, 480);
        let a = FreePlacer::new(&config).place(&frame, &[], canvas);
        let b = FreePlacer::new(&config).place(&frame, &[], canvas);
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversized_frame_pins_to_origin() {
        let mut placer = FreePlacer::new(&LayoutConfig::new().with_seed(8));
        let p = placer.place(&Frame::new(1000, 1000), &[], Canvas::new(100, 100));
        assert_eq!(p, Point::new(0, 0));
    }
}
