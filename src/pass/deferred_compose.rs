use std::rc::Rc;

use bytemuck_derive::{Pod, Zeroable};

use crate::{
    attributes,
    gl::{
        self, Attribute, PrimitiveMode, Program, ProgramDef, Texture, Uniform, Vertex,
        VertexBuffer,
    },
    light::{LightsBlock, MAX_DEFERRED_LIGHTS},
};

use super::LIGHTS_BLOCK_BINDING;

#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct ScreenVertex {
    pub position: [f32; 2],
}

impl Vertex for ScreenVertex {
    fn attributes() -> Vec<Attribute> {
        attributes!(ScreenVertex => position: 2)
    }
}

const SCREEN_QUAD: [ScreenVertex; 4] = [
    ScreenVertex {
        position: [-1.0, -1.0],
    },
    ScreenVertex {
        position: [1.0, -1.0],
    },
    ScreenVertex {
        position: [-1.0, 1.0],
    },
    ScreenVertex {
        position: [1.0, 1.0],
    },
];

/// Shades the scene with all packed lights in one full-screen pass.
///
/// `color_map` holds the unlit scene, `light_map` any light that has already
/// been accumulated (e.g. by the stencil path), and `normal_map` the surface
/// normals encoded into `[0, 1]`. Each light is attenuated by
/// `1 / (constant + linear * d + quadratic * d^2)` with `d` the distance in
/// normalized screen units.
pub struct DeferredComposePass {
    program: Program<ScreenVertex, 3>,
    screen_quad: VertexBuffer<ScreenVertex>,
}

const VERTEX_SOURCE: &str = r#"
out vec2 v_uv;

void main() {
    v_uv = a_position * 0.5 + 0.5;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"
in vec2 v_uv;
out vec4 f_color;

void main() {
    vec4 diffuse = texture(color_map, v_uv);
    vec3 accumulated = texture(light_map, v_uv).rgb;
    vec3 normal = normalize(texture(normal_map, v_uv).rgb * 2.0 - 1.0);

    vec2 frag = gl_FragCoord.xy / lights.resolution;
    float aspect = lights.resolution.x / lights.resolution.y;

    vec3 sum = vec3(0.0);
    for (int i = 0; i < lights.count; i++) {
        Light light = lights.lights[i];

        vec3 dir = vec3(light.position.xy - frag, light.position.z);
        dir.x *= aspect;

        float d = length(dir);
        float lambert = max(dot(normal, normalize(dir)), 0.0);
        float attenuation = 1.0 / (
            light.falloff.x
            + light.falloff.y * d
            + light.falloff.z * d * d
        );

        sum += light.color.rgb * light.color.a * lambert * attenuation;
    }

    vec3 ambient = lights.ambient.rgb * lights.ambient.a;
    f_color = vec4(diffuse.rgb * (ambient + accumulated + sum), diffuse.a);
}
"#;

/// Declaration of the uniform block matching [`LightsBlock`].
pub fn lights_glsl() -> String {
    format!(
        r#"
struct Light {{
    vec3 position;
    vec4 color;
    vec3 falloff;
}};

layout (std140) uniform Lights {{
    int count;
    vec4 ambient;
    vec2 resolution;
    Light lights[{}];
}} lights;
"#,
        MAX_DEFERRED_LIGHTS,
    )
}

impl DeferredComposePass {
    pub fn new(gl: Rc<gl::Context>) -> Result<Self, gl::Error> {
        let fragment_source = lights_glsl() + FRAGMENT_SOURCE;
        let program_def = ProgramDef {
            uniform_blocks: &[("Lights", LIGHTS_BLOCK_BINDING)],
            samplers: ["color_map", "light_map", "normal_map"],
            vertex_source: VERTEX_SOURCE,
            fragment_source: &fragment_source,
        };
        let program = Program::new(gl.clone(), program_def)?;

        let mut screen_quad = VertexBuffer::new(gl)?;
        screen_quad.set_data(&SCREEN_QUAD);

        Ok(Self {
            program,
            screen_quad,
        })
    }

    pub fn draw(
        &self,
        lights: &Uniform<LightsBlock>,
        color_map: &Texture,
        light_map: &Texture,
        normal_map: &Texture,
    ) {
        #[cfg(feature = "coarse-prof")]
        coarse_prof::profile!("DeferredComposePass::draw");

        lights.bind_base(LIGHTS_BLOCK_BINDING);
        self.program.bind([color_map, light_map, normal_map]);
        self.screen_quad.draw(PrimitiveMode::TriangleStrip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_block_matches_std140() {
        // count, ambient and resolution take three vec4 slots.
        assert_eq!(
            std::mem::size_of::<LightsBlock>(),
            48 + 48 * MAX_DEFERRED_LIGHTS
        );
        assert!(lights_glsl().contains(&format!("lights[{}]", MAX_DEFERRED_LIGHTS)));
    }
}
