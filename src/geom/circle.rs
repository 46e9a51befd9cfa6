use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2<f32>,
    pub radius: f32,
}
