use crevice::std140::AsStd140;
use nalgebra::Matrix3;

use crate::geom::{Camera, Screen};

#[derive(Debug, Copy, Clone, AsStd140)]
pub struct MatricesBlock {
    pub projection: Matrix3<f32>,
    pub view: Matrix3<f32>,
}

impl MatricesBlock {
    pub fn new(camera: &Camera, screen: Screen) -> Self {
        Self {
            projection: screen.orthographic_projection(),
            view: camera.matrix(screen),
        }
    }
}

pub const MATRICES_GLSL: &str = r#"
layout (std140) uniform Matrices {
    mat3 projection;
    mat3 view;
} matrices;
"#;

#[cfg(test)]
mod tests {
    use nalgebra::{Point2, Vector2};

    use super::*;

    #[test]
    fn camera_center_maps_to_clip_origin() {
        let screen = Screen::new(Vector2::new(640.0, 480.0), Vector2::new(640, 480));
        let camera = Camera {
            center: Point2::new(3.0, -2.0),
            zoom: 48.0,
            angle: 0.0,
        };
        let block = MatricesBlock::new(&camera, screen);

        let clip = block.projection * block.view * camera.center.to_homogeneous();
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }
}
