//! Hard-shadowed 2D lights.
//!
//! Every frame, the lights near the viewer are selected, the occluders around
//! each of them are fetched from the physics world and extruded into shadow
//! quads, and then each light is composited through the stencil buffer.
//! Alternatively, the selected lights can be packed for a single deferred
//! pass without shadows.

mod compositor;
mod def;
mod deferred;
mod gl_target;
mod occluder;
mod params;
mod registry;
mod shadow;
mod source;
mod system;

pub use compositor::{
    CommandList, LightCommand, LightSprite, LightTarget, StencilCompositor, SHADOW_MARKER,
};
pub use def::{LightDef, LightDefError, PropertyValue, DEFAULT_LIGHT_TEXTURE, LIGHT_TEXTURE_DIR};
pub use deferred::{DeferredLightPacker, LightUniform, LightsBlock, MAX_DEFERRED_LIGHTS};
pub use gl_target::{GlLightTarget, NewLightTargetError};
pub use occluder::{BodyId, Occluder, OccluderQuery, OccluderShape, OccluderWorld};
pub use params::{LightSystemParams, ParamsError, ShadowParams};
pub use registry::{ActiveLightSet, LightHandle, LightRegistry, SpriteLookup};
pub use shadow::{ShadowQuad, ShadowVolumeBuilder};
pub use source::{Falloff, LightSource, SpriteId};
pub use system::{FrameStats, LightSystem};
