use nalgebra::{Matrix3, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub logical_size: Vector2<f32>,
    pub physical_size: Vector2<u32>,
}

impl Screen {
    pub fn new(logical_size: Vector2<f32>, physical_size: Vector2<u32>) -> Self {
        Self {
            logical_size,
            physical_size,
        }
    }

    /// Returns an orthographic projection matrix.
    ///
    /// The returned matrix maps `[0..width] x [0..height]` to
    /// `[-1..1] x [-1..1]` (i.e. the OpenGL normalized device coordinates).
    ///
    /// This projection also flips the Y axis, so that (0,0) is at the top-left
    /// of the screen.
    pub fn orthographic_projection(&self) -> Matrix3<f32> {
        let scale_to_unit = Matrix3::new_nonuniform_scaling(&Vector2::new(
            1.0 / self.logical_size.x,
            1.0 / self.logical_size.y,
        ));
        let shift = Matrix3::new_translation(&Vector2::new(-0.5, -0.5));
        let scale_and_flip_y = Matrix3::new_nonuniform_scaling(&Vector2::new(2.0, -2.0));

        scale_and_flip_y * shift * scale_to_unit
    }
}
