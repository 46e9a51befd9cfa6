use glow::HasContext;

use super::{Blend, Context, StencilTest};

#[derive(Clone, Debug, PartialEq)]
pub struct DrawParams {
    pub blend: Option<Blend>,
    pub stencil_test: Option<StencilTest>,
    pub color_mask: bool,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            blend: None,
            stencil_test: None,
            color_mask: true,
        }
    }
}

pub fn set_draw_params(gl: &Context, draw_params: &DrawParams) {
    set_blend(gl, draw_params.blend);
    set_stencil_test(gl, draw_params.stencil_test);

    let mask = draw_params.color_mask;
    unsafe {
        gl.color_mask(mask, mask, mask, mask);
    }
}

fn set_blend(gl: &Context, blend: Option<Blend>) {
    match blend {
        None => unsafe {
            gl.disable(glow::BLEND);
        },
        Some(blend) => {
            let [src_color, dst_color, src_alpha, dst_alpha] = blend.to_gl();

            unsafe {
                gl.enable(glow::BLEND);
                gl.blend_equation(glow::FUNC_ADD);
                gl.blend_func_separate(src_color, dst_color, src_alpha, dst_alpha);
            }
        }
    }
}

fn set_stencil_test(gl: &Context, stencil_test: Option<StencilTest>) {
    match stencil_test {
        None => unsafe {
            gl.disable(glow::STENCIL_TEST);
        },
        Some(StencilTest {
            func,
            reference,
            read_mask,
            write_mask,
            ops,
        }) => unsafe {
            gl.enable(glow::STENCIL_TEST);
            gl.stencil_func(func.to_gl(), reference as i32, read_mask as u32);
            gl.stencil_op(
                ops.stencil_fail.to_gl(),
                ops.depth_fail.to_gl(),
                ops.pass.to_gl(),
            );
            gl.stencil_mask(write_mask as u32);
        },
    }
}
