mod blend;
mod context;
mod draw_params;
mod error;
mod program;
mod stencil;
mod texture;
mod uniform;
mod vertex;
mod vertex_buffer;

pub use blend::{Blend, BlendFactor, BlendFunc};
pub use context::Context;
pub use draw_params::{set_draw_params, DrawParams};
pub use error::Error;
pub use program::{Program, ProgramDef};
pub use stencil::{StencilFunc, StencilOp, StencilOps, StencilTest};
pub use texture::Texture;
pub use uniform::Uniform;
pub use vertex::{Attribute, Vertex};
pub use vertex_buffer::{PrimitiveMode, VertexBuffer};

use glow::HasContext;

pub fn clear_stencil(gl: &Context, value: u8) {
    unsafe {
        // The write mask also limits clears, so make sure all bits are
        // writable first.
        gl.stencil_mask(0xff);
        gl.clear_stencil(value as i32);
        gl.clear(glow::STENCIL_BUFFER_BIT);
    }
}
