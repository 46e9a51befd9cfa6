use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use nalgebra::{Point2, Vector2};

use crate::{error::InitError, geom::Screen, gl};

/// A WebGL2 canvas whose default framebuffer has a stencil buffer, as needed
/// for shadowed lights.
pub struct Canvas {
    element: HtmlCanvasElement,
    gl: Rc<gl::Context>,
}

impl Canvas {
    pub fn from_element_id(id: &str) -> Result<Self, InitError> {
        let canvas = web_sys::window()
            .ok_or(InitError::NoWindow)?
            .document()
            .ok_or(InitError::NoDocument)?
            .get_element_by_id(id)
            .ok_or_else(|| InitError::InvalidElementId(id.into()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| InitError::ElementIsNotCanvas(id.into()))?;

        Self::from_element(canvas)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_element(_: HtmlCanvasElement) -> Result<Self, InitError> {
        // `glow::Context::from_webgl2_context` only exists on the web.
        Err(InitError::InitializeWebGl)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_element(element: HtmlCanvasElement) -> Result<Self, InitError> {
        use web_sys::{WebGl2RenderingContext, WebGlContextAttributes, WebGlPowerPreference};

        let mut context_attributes = WebGlContextAttributes::new();
        context_attributes.alpha(false);
        context_attributes.depth(false);
        context_attributes.stencil(true);
        context_attributes.antialias(false);
        context_attributes.power_preference(WebGlPowerPreference::HighPerformance);
        context_attributes.preserve_drawing_buffer(false);

        let webgl_context = element
            .get_context_with_context_options("webgl2", &context_attributes.into())
            .map_err(|e| InitError::GetContext(e.as_string().unwrap_or_else(|| "error".into())))?
            .ok_or(InitError::InitializeWebGl)?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| InitError::InitializeWebGl)?;
        let glow_context = glow::Context::from_webgl2_context(webgl_context);
        let gl = Rc::new(gl::Context::new(glow_context));

        let canvas = Self { element, gl };
        canvas.set_viewport(Point2::origin(), canvas.physical_size());

        log::info!(
            "Created WebGL2 canvas with stencil buffer [size={}]",
            canvas.physical_size(),
        );

        Ok(canvas)
    }

    pub fn element(&self) -> HtmlCanvasElement {
        self.element.clone()
    }

    pub fn gl(&self) -> Rc<gl::Context> {
        self.gl.clone()
    }

    pub fn physical_size(&self) -> Vector2<u32> {
        Vector2::new(self.element.width(), self.element.height())
    }

    pub fn screen(&self) -> Screen {
        let physical_size = self.physical_size();

        Screen::new(nalgebra::convert(physical_size), physical_size)
    }

    /// Resizes the drawing buffer, e.g. after the element's layout changed.
    pub fn resize(&mut self, physical_size: Vector2<u32>) {
        if physical_size == self.physical_size() {
            return;
        }

        self.element.set_width(physical_size.x);
        self.element.set_height(physical_size.y);
        self.set_viewport(Point2::origin(), physical_size);

        log::info!("Resized canvas [size={}]", physical_size);
    }

    fn set_viewport(&self, lower_left: Point2<u32>, size: Vector2<u32>) {
        use glow::HasContext;

        unsafe {
            self.gl.viewport(
                lower_left.x as i32,
                lower_left.y as i32,
                size.x as i32,
                size.y as i32,
            );
        }
    }
}
