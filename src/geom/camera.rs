use nalgebra::{Matrix3, Point2, Vector2};

use super::{translate_rotate_scale, Screen};

#[derive(Debug, Copy, Clone, PartialEq)]
/// Parameters that define a two-dimensional camera transformation.
pub struct Camera {
    /// The center position of the camera in world units.
    pub center: Point2<f32>,

    /// Number of screen pixels per world unit.
    pub zoom: f32,

    /// Angle of rotation around the center in radians.
    pub angle: f32,
}

impl Camera {
    /// Build a 3x3 matrix with homogeneous coordinates to represent the
    /// transformation from world space to screen pixel space, with the origin
    /// at the top-left of the screen.
    pub fn matrix(&self, screen: Screen) -> Matrix3<f32> {
        // The inverse of the camera-to-world transform
        //
        //     C2W = T(center) * S(1.0 / zoom) * R(angle)
        //
        // is W2C = S(zoom) * R(-angle) * T(-center).
        let transform = translate_rotate_scale(
            -self.center.coords,
            -self.angle,
            Vector2::new(self.zoom, self.zoom),
        );

        let center = Matrix3::new_translation(&(screen.logical_size / 2.0));

        center * transform
    }

    /// Maps a world position to screen pixels.
    pub fn project(&self, screen: Screen, p: Point2<f32>) -> Point2<f32> {
        Point2::from_homogeneous(self.matrix(screen) * p.to_homogeneous())
            .unwrap_or_else(Point2::origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_center_maps_to_screen_center() {
        let screen = Screen::new(Vector2::new(640.0, 480.0), Vector2::new(640, 480));
        let camera = Camera {
            center: Point2::new(10.0, 5.0),
            zoom: 48.0,
            angle: 0.0,
        };

        let p = camera.project(screen, Point2::new(10.0, 5.0));
        assert!((p - Point2::new(320.0, 240.0)).norm() < 1e-3);

        let q = camera.project(screen, Point2::new(11.0, 5.0));
        assert!((q - Point2::new(368.0, 240.0)).norm() < 1e-3);
    }
}
