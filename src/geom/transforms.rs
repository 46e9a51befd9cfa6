use nalgebra::{Matrix3, Vector2};

/// Build a 3x3 matrix that applies transformations in this order: first
/// translation, then rotation and scaling.
pub fn translate_rotate_scale(
    offset: Vector2<f32>,
    angle: f32,
    scale: Vector2<f32>,
) -> Matrix3<f32> {
    Matrix3::new_nonuniform_scaling(&scale)
        * Matrix3::new_rotation(angle)
        * Matrix3::new_translation(&offset)
}
