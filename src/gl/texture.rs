use std::rc::Rc;

use glow::HasContext;
use nalgebra::Vector2;

use super::{Context, Error};

/// An RGBA8 texture with linear filtering and clamped edges.
///
/// Decoding image files is left to the caller; textures are created from
/// raw pixels or adopted from an existing GL handle.
pub struct Texture {
    gl: Rc<Context>,
    id: <glow::Context as HasContext>::Texture,
    size: Vector2<u32>,
}

impl Texture {
    pub fn from_rgba(gl: Rc<Context>, size: Vector2<u32>, pixels: &[u8]) -> Result<Self, Error> {
        if pixels.len() != size.x as usize * size.y as usize * 4 {
            return Err(Error::OpenGL(format!(
                "expected {} bytes of RGBA data for a {}x{} texture, got {}",
                size.x as usize * size.y as usize * 4,
                size.x,
                size.y,
                pixels.len(),
            )));
        }

        let id = unsafe { gl.create_texture() }.map_err(Error::Glow)?;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(id));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                size.x as i32,
                size.y as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
        }

        Ok(Self { gl, id, size })
    }

    pub fn gl(&self) -> Rc<Context> {
        self.gl.clone()
    }

    pub fn id(&self) -> <glow::Context as HasContext>::Texture {
        self.id
    }

    pub fn size(&self) -> Vector2<u32> {
        self.size
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
