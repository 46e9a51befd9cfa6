mod deferred_compose;
mod light_sprite_pass;
mod matrices;
mod shadow_pass;

pub use deferred_compose::{DeferredComposePass, ScreenVertex};
pub use light_sprite_pass::{LightSpritePass, SpriteVertex};
pub use matrices::{MatricesBlock, MATRICES_GLSL};
pub use shadow_pass::{ShadowPass, ShadowVertex};

pub const MATRICES_BLOCK_BINDING: u32 = 0;
pub const LIGHTS_BLOCK_BINDING: u32 = 1;
