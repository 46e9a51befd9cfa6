use nalgebra::{Point2, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Point2<f32>,
    pub size: Vector2<f32>,
}

impl Rect {
    pub fn from_top_left(top_left: Point2<f32>, size: Vector2<f32>) -> Self {
        Self {
            center: top_left + size / 2.0,
            size,
        }
    }

    /// Square of side length `2 * half_extent` around `center`.
    pub fn around(center: Point2<f32>, half_extent: f32) -> Self {
        Self {
            center,
            size: Vector2::new(2.0, 2.0) * half_extent,
        }
    }

    /// Smallest axis-aligned rectangle that contains all `points`. Returns
    /// `None` for an empty input.
    pub fn bounding(points: impl IntoIterator<Item = Point2<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });

        Some(Self::from_top_left(min, max - min))
    }

    pub fn top_left(&self) -> Point2<f32> {
        self.center - self.size / 2.0
    }

    pub fn bottom_right(&self) -> Point2<f32> {
        self.center + self.size / 2.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        let delta = other.center - self.center;
        let extent = (self.size + other.size) / 2.0;

        delta.x.abs() <= extent.x && delta.y.abs() <= extent.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_rect_covers_points() {
        let rect = Rect::bounding(vec![
            Point2::new(1.0, 2.0),
            Point2::new(-1.0, 4.0),
            Point2::new(3.0, 0.0),
        ])
        .unwrap();

        assert_eq!(rect.top_left(), Point2::new(-1.0, 0.0));
        assert_eq!(rect.bottom_right(), Point2::new(3.0, 4.0));
        assert!(Rect::bounding(Vec::new()).is_none());
    }

    #[test]
    fn overlap_is_inclusive() {
        let a = Rect::around(Point2::origin(), 1.0);
        let b = Rect::around(Point2::new(2.0, 0.0), 1.0);
        let c = Rect::around(Point2::new(2.5, 0.0), 1.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
