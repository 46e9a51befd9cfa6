use std::{collections::HashMap, rc::Rc};

use bytemuck::Zeroable;
use slab::Slab;
use thiserror::Error;

use crate::{
    geom::{Camera, Screen},
    gl::{self, DrawParams, Texture, Uniform, VertexBuffer},
    pass::{
        DeferredComposePass, LightSpritePass, MatricesBlock, ShadowPass, ShadowVertex,
        SpriteVertex,
    },
};

use super::{
    LightCommand, LightSprite, LightTarget, LightsBlock, ShadowQuad, SpriteId, SpriteLookup,
};

#[derive(Debug, Error)]
pub enum NewLightTargetError {
    #[error("OpenGL error: {0}")]
    OpenGL(#[from] gl::Error),
}

/// Executes light commands with OpenGL.
///
/// The target owns the light sprites, so that light definitions can refer to
/// them by path. The bound framebuffer must have a stencil attachment.
pub struct GlLightTarget {
    gl: Rc<gl::Context>,
    draw_params: DrawParams,

    matrices: Uniform<MatricesBlock>,
    lights: Uniform<LightsBlock>,

    shadow_pass: ShadowPass,
    sprite_pass: LightSpritePass,
    compose_pass: DeferredComposePass,

    shadow_vertices: VertexBuffer<ShadowVertex>,
    sprite_vertices: VertexBuffer<SpriteVertex>,
    shadow_scratch: Vec<ShadowVertex>,

    sprites: Slab<Texture>,
    sprite_paths: HashMap<String, SpriteId>,
}

impl GlLightTarget {
    pub fn new(
        gl: Rc<gl::Context>,
        camera: &Camera,
        screen: Screen,
    ) -> Result<Self, NewLightTargetError> {
        let matrices = Uniform::new(gl.clone(), MatricesBlock::new(camera, screen))?;
        let lights = Uniform::new_pod(gl.clone(), &LightsBlock::zeroed())?;

        let shadow_pass = ShadowPass::new(gl.clone())?;
        let sprite_pass = LightSpritePass::new(gl.clone())?;
        let compose_pass = DeferredComposePass::new(gl.clone())?;

        let shadow_vertices = VertexBuffer::new(gl.clone())?;
        let sprite_vertices = VertexBuffer::new(gl.clone())?;

        log::info!("Created light target");

        Ok(Self {
            gl,
            draw_params: DrawParams::default(),
            matrices,
            lights,
            shadow_pass,
            sprite_pass,
            compose_pass,
            shadow_vertices,
            sprite_vertices,
            shadow_scratch: Vec::new(),
            sprites: Slab::new(),
            sprite_paths: HashMap::new(),
        })
    }

    pub fn gl(&self) -> Rc<gl::Context> {
        self.gl.clone()
    }

    /// Registers a falloff texture under `path`, replacing any previous
    /// texture with that path.
    pub fn insert_sprite(&mut self, path: impl Into<String>, texture: Texture) -> SpriteId {
        let path = path.into();

        if let Some(&id) = self.sprite_paths.get(&path) {
            self.sprites[id.0] = texture;
            return id;
        }

        let id = SpriteId(self.sprites.insert(texture));
        log::info!("Inserted light sprite `{}` as {:?}", path, id);
        self.sprite_paths.insert(path, id);

        id
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Texture> {
        self.sprites.get(id.0)
    }

    pub fn set_view(&self, camera: &Camera, screen: Screen) {
        self.matrices.set(MatricesBlock::new(camera, screen));
    }

    /// Shades the scene with packed lights in a single pass. No shadows are
    /// cast here.
    pub fn compose_deferred(
        &mut self,
        block: &LightsBlock,
        color_map: &Texture,
        light_map: &Texture,
        normal_map: &Texture,
    ) {
        self.apply(|params| {
            params.blend = None;
            params.stencil_test = None;
            params.color_mask = true;
        });

        self.lights.set_pod(block);
        self.compose_pass
            .draw(&self.lights, color_map, light_map, normal_map);
    }

    fn apply(&mut self, f: impl FnOnce(&mut DrawParams)) {
        f(&mut self.draw_params);
        gl::set_draw_params(&self.gl, &self.draw_params);
    }

    fn draw_shadow_quads(&mut self, quads: &[ShadowQuad]) {
        if quads.is_empty() {
            return;
        }

        self.shadow_scratch.clear();
        ShadowVertex::extend_from_quads(&mut self.shadow_scratch, quads);
        self.shadow_vertices.set_data(&self.shadow_scratch);

        self.shadow_pass.draw(&self.matrices, &self.shadow_vertices);
    }

    fn draw_sprite(&mut self, sprite: LightSprite) {
        let texture = match self.sprites.get(sprite.sprite.0) {
            Some(texture) => texture,
            None => {
                log::warn!("Unknown light sprite {:?}", sprite.sprite);
                return;
            }
        };

        self.sprite_vertices
            .set_data(&SpriteVertex::quad(sprite.rect, sprite.color));
        self.sprite_pass
            .draw(&self.matrices, texture, &self.sprite_vertices);
    }
}

impl LightTarget for GlLightTarget {
    fn execute(&mut self, command: LightCommand<'_>) {
        match command {
            LightCommand::ClearStencil => gl::clear_stencil(&self.gl, 0),
            LightCommand::ColorMask(mask) => self.apply(|params| params.color_mask = mask),
            LightCommand::StencilTest(test) => self.apply(|params| params.stencil_test = test),
            LightCommand::Blend(blend) => self.apply(|params| params.blend = blend),
            LightCommand::DrawShadowQuads(quads) => self.draw_shadow_quads(&quads),
            LightCommand::DrawSprite(sprite) => self.draw_sprite(sprite),
        }
    }
}

impl SpriteLookup for GlLightTarget {
    fn lookup(&self, path: &str) -> Option<SpriteId> {
        self.sprite_paths.get(path).copied()
    }
}
