use std::{marker::PhantomData, rc::Rc};

use glow::HasContext;

use super::{Attribute, Context, Error, Texture, Vertex};

pub struct Program<V, const S: usize> {
    gl: Rc<Context>,
    id: <glow::Context as HasContext>::Program,
    _phantom: PhantomData<V>,
}

pub struct ProgramDef<'a, const S: usize> {
    /// Uniform block names with their binding points.
    pub uniform_blocks: &'a [(&'a str, u32)],
    pub samplers: [&'a str; S],
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
}

impl<V: Vertex, const S: usize> Program<V, S> {
    pub fn new(gl: Rc<Context>, def: ProgramDef<S>) -> Result<Self, Error> {
        let id = create_program::<V, S>(&gl, &def)?;

        Ok(Self {
            gl,
            id,
            _phantom: PhantomData,
        })
    }
}

impl<V, const S: usize> Program<V, S> {
    pub fn gl(&self) -> Rc<Context> {
        self.gl.clone()
    }

    pub fn bind(&self, samplers: [&Texture; S]) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }

        for (i, texture) in samplers.iter().enumerate() {
            unsafe {
                self.gl.active_texture(glow::TEXTURE0 + i as u32);
                self.gl
                    .bind_texture(glow::TEXTURE_2D, Some(texture.id()));
            }
        }
    }
}

fn create_program<V: Vertex, const S: usize>(
    gl: &Context,
    def: &ProgramDef<S>,
) -> Result<<glow::Context as HasContext>::Program, Error> {
    let program = unsafe { gl.create_program().map_err(Error::Glow)? };

    let attributes = V::attributes();
    let sampler_decls = def
        .samplers
        .iter()
        .map(|sampler| format!("uniform sampler2D {};\n", sampler))
        .collect::<String>();

    let header = SOURCE_HEADER.to_owned() + &sampler_decls;

    let sources = [
        (
            glow::VERTEX_SHADER,
            header.clone() + &vertex_source_header(&attributes) + def.vertex_source,
        ),
        (glow::FRAGMENT_SHADER, header + def.fragment_source),
    ];

    let shaders = sources
        .iter()
        .map(|(shader_type, shader_source)| {
            let shader = unsafe { gl.create_shader(*shader_type) }.map_err(Error::Glow)?;

            unsafe {
                gl.shader_source(shader, shader_source);
                gl.compile_shader(shader);

                if !gl.get_shader_compile_status(shader) {
                    log::info!(
                        "{}",
                        shader_source
                            .split('\n')
                            .enumerate()
                            .map(|(i, line)| format!("{}: {}", i + 1, line))
                            .collect::<Vec<String>>()
                            .join("\n")
                    );

                    return Err(Error::OpenGL(format!(
                        "Shader failed to compile: {}",
                        gl.get_shader_info_log(shader)
                    )));
                }

                gl.attach_shader(program, shader);
            }

            Ok(shader)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    // Binding attributes must be done before linking.
    for (index, attribute) in attributes.iter().enumerate() {
        unsafe {
            gl.bind_attrib_location(program, index as u32, attribute.name);
        }
    }

    unsafe {
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            return Err(Error::OpenGL(format!(
                "Program failed to link: {}",
                gl.get_program_info_log(program)
            )));
        }
    }

    // Once the program has been linked, the shader objects are no longer
    // required.
    for shader in shaders {
        unsafe {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
    }

    unsafe {
        gl.use_program(Some(program));
    }
    for (i, sampler) in def.samplers.iter().enumerate() {
        if let Some(location) = unsafe { gl.get_uniform_location(program, sampler) } {
            unsafe {
                gl.uniform_1_i32(Some(&location), i as i32);
            }
        } else {
            log::info!("Sampler `{}` (offset {}) is unused", sampler, i);
        }
    }

    // Setting uniform block binding locations should be done after linking.
    for (name, binding) in def.uniform_blocks {
        if let Some(index) = unsafe { gl.get_uniform_block_index(program, name) } {
            unsafe {
                gl.uniform_block_binding(program, index, *binding);
            }
        } else {
            log::info!("Uniform block `{}` is unused", name);
        }
    }

    Ok(program)
}

const SOURCE_HEADER: &str = r#"#version 300 es
precision highp float;
precision highp sampler2D;
"#;

fn vertex_source_header(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(Attribute::glsl_string)
        .collect::<String>()
}

impl<V, const S: usize> Drop for Program<V, S> {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
