use std::{marker::PhantomData, rc::Rc};

use bytemuck::Pod;
use crevice::std140::AsStd140;
use glow::HasContext;

use super::{Context, Error};

/// A uniform buffer holding one block of type `U`.
///
/// Blocks whose layout can be derived go through `crevice`; blocks that are
/// already laid out as std140 by hand (e.g. containing arrays) are uploaded
/// as plain `Pod` bytes.
pub struct Uniform<U> {
    gl: Rc<Context>,
    id: <glow::Context as HasContext>::Buffer,
    _phantom: PhantomData<U>,
}

impl<U> Uniform<U> {
    fn new_empty(gl: Rc<Context>) -> Result<Self, Error> {
        let id = unsafe { gl.create_buffer() }.map_err(Error::Glow)?;

        Ok(Uniform {
            gl,
            id,
            _phantom: PhantomData,
        })
    }

    fn upload(&self, data_u8: &[u8]) {
        unsafe {
            self.gl.bind_buffer(glow::UNIFORM_BUFFER, Some(self.id));
            self.gl
                .buffer_data_u8_slice(glow::UNIFORM_BUFFER, data_u8, glow::STREAM_DRAW);
        }
    }

    pub fn gl(&self) -> Rc<Context> {
        self.gl.clone()
    }

    pub fn bind_base(&self, binding: u32) {
        unsafe {
            self.gl
                .bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(self.id));
        }
    }
}

impl<U: AsStd140> Uniform<U> {
    pub fn new(gl: Rc<Context>, data: U) -> Result<Self, Error> {
        let uniform = Self::new_empty(gl)?;
        uniform.set(data);

        Ok(uniform)
    }

    pub fn set(&self, data: U) {
        let data_std140 = data.as_std140();
        self.upload(bytemuck::bytes_of(&data_std140));
    }
}

impl<U: Pod> Uniform<U> {
    pub fn new_pod(gl: Rc<Context>, data: &U) -> Result<Self, Error> {
        let uniform = Self::new_empty(gl)?;
        uniform.set_pod(data);

        Ok(uniform)
    }

    pub fn set_pod(&self, data: &U) {
        self.upload(bytemuck::bytes_of(data));
    }
}

impl<U> Drop for Uniform<U> {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}
