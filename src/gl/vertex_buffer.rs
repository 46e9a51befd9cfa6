use std::{marker::PhantomData, rc::Rc};

use glow::HasContext;

use super::{Context, Error, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Triangles,
    TriangleStrip,
}

impl PrimitiveMode {
    pub fn to_gl(self) -> u32 {
        match self {
            PrimitiveMode::Triangles => glow::TRIANGLES,
            PrimitiveMode::TriangleStrip => glow::TRIANGLE_STRIP,
        }
    }
}

pub struct VertexBuffer<V> {
    gl: Rc<Context>,
    vao: <glow::Context as HasContext>::VertexArray,
    buffer: <glow::Context as HasContext>::Buffer,
    len: usize,
    _phantom: PhantomData<V>,
}

impl<V: Vertex> VertexBuffer<V> {
    pub fn new(gl: Rc<Context>) -> Result<Self, Error> {
        let vao = unsafe { gl.create_vertex_array() }.map_err(Error::Glow)?;
        let buffer = unsafe { gl.create_buffer() }.map_err(Error::Glow)?;

        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        }

        set_vertex_attribs::<V>(&gl);

        unsafe {
            gl.bind_vertex_array(None);
        }

        Ok(Self {
            gl,
            vao,
            buffer,
            len: 0,
            _phantom: PhantomData,
        })
    }

    pub fn set_data(&mut self, data: &[V]) {
        let data_u8 = bytemuck::cast_slice(data);

        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data_u8, glow::STREAM_DRAW);
        }

        self.len = data.len();
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn draw(&self, mode: PrimitiveMode) {
        if self.len == 0 {
            return;
        }

        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(mode.to_gl(), 0, self.len as i32);
            self.gl.bind_vertex_array(None);
        }
    }
}

fn set_vertex_attribs<V: Vertex>(gl: &Context) {
    for (index, attribute) in V::attributes().iter().enumerate() {
        assert!(
            attribute.offset + attribute.num_elements * std::mem::size_of::<f32>()
                <= std::mem::size_of::<V>()
        );

        unsafe {
            gl.enable_vertex_attrib_array(index as u32);
            gl.vertex_attrib_pointer_f32(
                index as u32,
                attribute.num_elements as i32,
                glow::FLOAT,
                false,
                std::mem::size_of::<V>() as i32,
                attribute.offset as i32,
            );
        }
    }
}

impl<V> Drop for VertexBuffer<V> {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.buffer);
        }
    }
}
