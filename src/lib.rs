//! Dynamic 2D lights with hard shadows, rendered with WebGL2.
//!
//! The core of this crate lives in [`light`]: a [`LightSystem`] owns the
//! lights of a scene and, once per frame, extrudes the silhouettes of nearby
//! occluders into shadow quads and composites each light through the stencil
//! buffer of a [`LightTarget`].

pub mod canvas;
mod color;
pub mod error;
pub mod geom;
pub mod gl;
pub mod light;
pub mod pass;

pub use glow;
pub use nalgebra;

pub use canvas::Canvas;
pub use color::Color4;
pub use error::InitError;
pub use light::{
    LightDef, LightHandle, LightSource, LightSystem, LightSystemParams, LightTarget,
    OccluderWorld,
};
