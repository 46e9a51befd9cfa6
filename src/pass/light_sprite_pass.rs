use std::rc::Rc;

use bytemuck_derive::{Pod, Zeroable};

use crate::{
    attributes,
    geom::Rect,
    gl::{
        self, Attribute, PrimitiveMode, Program, ProgramDef, Texture, Uniform, Vertex,
        VertexBuffer,
    },
    Color4,
};

use super::{MatricesBlock, MATRICES_BLOCK_BINDING, MATRICES_GLSL};

#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex for SpriteVertex {
    fn attributes() -> Vec<Attribute> {
        attributes!(SpriteVertex => position: 2, tex_coords: 2, color: 4)
    }
}

impl SpriteVertex {
    /// Two triangles covering `rect` with the whole texture.
    pub fn quad(rect: Rect, color: Color4) -> [SpriteVertex; 6] {
        let top_left = rect.top_left();
        let bottom_right = rect.bottom_right();
        let color: [f32; 4] = color.into();

        let vertex = |x: f32, y: f32, u: f32, v: f32| SpriteVertex {
            position: [x, y],
            tex_coords: [u, v],
            color,
        };

        let a = vertex(top_left.x, top_left.y, 0.0, 0.0);
        let b = vertex(bottom_right.x, top_left.y, 1.0, 0.0);
        let c = vertex(bottom_right.x, bottom_right.y, 1.0, 1.0);
        let d = vertex(top_left.x, bottom_right.y, 0.0, 1.0);

        [a, b, c, a, c, d]
    }
}

/// Draws a light's falloff texture, modulated by the light color.
pub struct LightSpritePass {
    program: Program<SpriteVertex, 1>,
}

const VERTEX_SOURCE: &str = r#"
out vec2 v_tex_coords;
out vec4 v_color;

void main() {
    vec3 position = matrices.projection
        * matrices.view
        * vec3(a_position, 1.0);

    gl_Position = vec4(position.xy, 0.0, 1.0);

    v_tex_coords = a_tex_coords;
    v_color = a_color;
}
"#;

const FRAGMENT_SOURCE: &str = r#"
in vec2 v_tex_coords;
in vec4 v_color;
out vec4 f_color;

void main() {
    f_color = texture(sprite, v_tex_coords) * v_color;
}
"#;

impl LightSpritePass {
    pub fn new(gl: Rc<gl::Context>) -> Result<Self, gl::Error> {
        let vertex_source = MATRICES_GLSL.to_owned() + VERTEX_SOURCE;
        let program_def = ProgramDef {
            uniform_blocks: &[("Matrices", MATRICES_BLOCK_BINDING)],
            samplers: ["sprite"],
            vertex_source: &vertex_source,
            fragment_source: FRAGMENT_SOURCE,
        };
        let program = Program::new(gl, program_def)?;

        Ok(Self { program })
    }

    pub fn draw(
        &self,
        matrices: &Uniform<MatricesBlock>,
        texture: &Texture,
        vertices: &VertexBuffer<SpriteVertex>,
    ) {
        #[cfg(feature = "coarse-prof")]
        coarse_prof::profile!("LightSpritePass::draw");

        matrices.bind_base(MATRICES_BLOCK_BINDING);
        self.program.bind([texture]);
        vertices.draw(PrimitiveMode::Triangles);
    }
}
