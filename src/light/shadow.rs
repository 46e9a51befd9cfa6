use nalgebra::{Point2, Vector2};

use crate::geom::Line;

use super::{Occluder, OccluderShape, ParamsError, ShadowParams};

/// The region behind one occluder edge, as seen from a light.
///
/// `v0 -> v1` is the occluder edge and `far0`, `far1` are its vertices pushed
/// away from the light by the extrusion factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowQuad {
    pub v0: Point2<f32>,
    pub far0: Point2<f32>,
    pub far1: Point2<f32>,
    pub v1: Point2<f32>,
}

impl ShadowQuad {
    pub fn extrude(light_pos: Point2<f32>, edge: Line, extrusion: f32) -> Self {
        let far = |v: Point2<f32>| light_pos + extrusion * (v - light_pos);

        Self {
            v0: edge.0,
            far0: far(edge.0),
            far1: far(edge.1),
            v1: edge.1,
        }
    }

    pub fn corners(&self) -> [Point2<f32>; 4] {
        [self.v0, self.far0, self.far1, self.v1]
    }

    /// The quad split into two triangles.
    pub fn triangles(&self) -> [Point2<f32>; 6] {
        [
            self.v0, self.far0, self.far1, //
            self.v0, self.far1, self.v1,
        ]
    }

    /// A quad without area: its edge has zero length, or neither vertex was
    /// moved by the extrusion.
    pub fn is_degenerate(&self) -> bool {
        self.v0 == self.v1 || (self.far0 == self.v0 && self.far1 == self.v1)
    }
}

/// Turns occluder outlines into shadow quads for a light.
///
/// Building is a pure function of the light position and the occluders, so
/// the same input always yields the same quads.
#[derive(Debug, Clone)]
pub struct ShadowVolumeBuilder {
    params: ShadowParams,
    unit_circle: Vec<Vector2<f32>>,
}

impl ShadowVolumeBuilder {
    pub fn new(params: ShadowParams) -> Result<Self, ParamsError> {
        params.validate()?;

        let n = params.circle_segments;
        let unit_circle = (0..n)
            .map(|i| {
                let angle = i as f32 / n as f32 * 2.0 * std::f32::consts::PI;
                Vector2::new(angle.cos(), angle.sin())
            })
            .collect();

        Ok(Self {
            params,
            unit_circle,
        })
    }

    pub fn params(&self) -> &ShadowParams {
        &self.params
    }

    pub fn build_quads(&self, light_pos: Point2<f32>, occluders: &[Occluder]) -> Vec<ShadowQuad> {
        let mut quads = Vec::new();
        self.build_into(light_pos, occluders, &mut quads);
        quads
    }

    /// Like `build_quads`, but appends into `out`, so that one buffer can be
    /// reused for all lights of a frame.
    pub fn build_into(
        &self,
        light_pos: Point2<f32>,
        occluders: &[Occluder],
        out: &mut Vec<ShadowQuad>,
    ) {
        for occluder in occluders {
            match occluder.shape {
                OccluderShape::Circle(circle) => {
                    if circle.radius <= 0.0 || !self.in_range(light_pos, circle.center) {
                        continue;
                    }

                    let radius = circle.radius * self.params.circle_scale;
                    let vertex = |i: usize| circle.center + self.unit_circle[i] * radius;

                    self.push_loop(light_pos, self.unit_circle.len(), vertex, out);
                }
                OccluderShape::Polygon(vertices) | OccluderShape::Chain(vertices) => {
                    if vertices.len() < 2 {
                        continue;
                    }

                    self.push_loop(light_pos, vertices.len(), |i| vertices[i], out);
                }
            }
        }
    }

    fn push_loop(
        &self,
        light_pos: Point2<f32>,
        n: usize,
        vertex: impl Fn(usize) -> Point2<f32>,
        out: &mut Vec<ShadowQuad>,
    ) {
        for i in 0..n {
            let v0 = vertex(i);
            let v1 = vertex((i + 1) % n);

            // Single edges of a partially visible occluder may be dropped
            // while their siblings are kept.
            if !self.in_range(light_pos, v0) && !self.in_range(light_pos, v1) {
                continue;
            }

            let quad = ShadowQuad::extrude(light_pos, Line(v0, v1), self.params.extrusion);
            if !quad.is_degenerate() {
                out.push(quad);
            }
        }
    }

    fn in_range(&self, light_pos: Point2<f32>, p: Point2<f32>) -> bool {
        (p - light_pos).norm_squared() <= self.params.search_radius * self.params.search_radius
    }
}
