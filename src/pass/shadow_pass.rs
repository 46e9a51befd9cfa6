use std::rc::Rc;

use bytemuck_derive::{Pod, Zeroable};

use crate::{
    attributes,
    gl::{self, Attribute, PrimitiveMode, Program, ProgramDef, Uniform, Vertex, VertexBuffer},
    light::ShadowQuad,
};

use super::{MatricesBlock, MATRICES_BLOCK_BINDING, MATRICES_GLSL};

#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct ShadowVertex {
    pub position: [f32; 2],
}

impl Vertex for ShadowVertex {
    fn attributes() -> Vec<Attribute> {
        attributes!(ShadowVertex => position: 2)
    }
}

impl ShadowVertex {
    /// Appends the two triangles of each quad.
    pub fn extend_from_quads(out: &mut Vec<ShadowVertex>, quads: &[ShadowQuad]) {
        out.reserve(quads.len() * 6);
        out.extend(
            quads
                .iter()
                .flat_map(|quad| quad.triangles())
                .map(|p| ShadowVertex {
                    position: [p.x, p.y],
                }),
        );
    }
}

/// Draws shadow quads into the stencil buffer. Color output is irrelevant,
/// since color writes are disabled while this pass runs.
pub struct ShadowPass {
    program: Program<ShadowVertex, 0>,
}

const VERTEX_SOURCE: &str = r#"
void main() {
    vec3 position = matrices.projection
        * matrices.view
        * vec3(a_position, 1.0);

    gl_Position = vec4(position.xy, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"
out vec4 f_color;

void main() {
    f_color = vec4(0.0);
}
"#;

impl ShadowPass {
    pub fn new(gl: Rc<gl::Context>) -> Result<Self, gl::Error> {
        let vertex_source = MATRICES_GLSL.to_owned() + VERTEX_SOURCE;
        let program_def = ProgramDef {
            uniform_blocks: &[("Matrices", MATRICES_BLOCK_BINDING)],
            samplers: [],
            vertex_source: &vertex_source,
            fragment_source: FRAGMENT_SOURCE,
        };
        let program = Program::new(gl, program_def)?;

        Ok(Self { program })
    }

    pub fn draw(&self, matrices: &Uniform<MatricesBlock>, vertices: &VertexBuffer<ShadowVertex>) {
        #[cfg(feature = "coarse-prof")]
        coarse_prof::profile!("ShadowPass::draw");

        matrices.bind_base(MATRICES_BLOCK_BINDING);
        self.program.bind([]);
        vertices.draw(PrimitiveMode::Triangles);
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point2;

    use super::*;
    use crate::geom::Line;

    #[test]
    fn vertex_layout() {
        assert_eq!(
            ShadowVertex::attributes(),
            vec![Attribute {
                name: "a_position",
                offset: 0,
                num_elements: 2,
            }]
        );
    }

    #[test]
    fn quads_become_two_triangles() {
        let quad = ShadowQuad::extrude(
            Point2::origin(),
            Line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)),
            10.0,
        );
        let mut vertices = Vec::new();
        ShadowVertex::extend_from_quads(&mut vertices, &[quad, quad]);

        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].position, [1.0, 0.0]);
        assert_eq!(vertices[1].position, [10.0, 0.0]);
        assert_eq!(vertices[5].position, [1.0, 1.0]);
    }
}
