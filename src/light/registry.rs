use std::collections::HashMap;

use nalgebra::Point2;
use slab::Slab;

use super::{LightDef, LightSource, SpriteId};

/// Stable reference to a light in a [`LightRegistry`].
///
/// Handles stay valid until their light is removed; afterwards they resolve
/// to `None`, unless the slot has been reused by a newer light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightHandle(usize);

/// Resolves texture paths of light definitions to sprites.
pub trait SpriteLookup {
    fn lookup(&self, path: &str) -> Option<SpriteId>;
}

impl SpriteLookup for HashMap<String, SpriteId> {
    fn lookup(&self, path: &str) -> Option<SpriteId> {
        self.get(path).copied()
    }
}

/// The lights that take part in the current frame, in registry order.
///
/// Lights are copied in when culling, so the set can be consumed while the
/// registry is being modified by gameplay code.
#[derive(Debug, Clone, Default)]
pub struct ActiveLightSet {
    lights: Vec<(LightHandle, LightSource)>,
}

impl ActiveLightSet {
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightHandle, &LightSource)> + '_ {
        self.lights.iter().map(|(handle, light)| (*handle, light))
    }

    pub fn contains(&self, handle: LightHandle) -> bool {
        self.lights.iter().any(|(h, _)| *h == handle)
    }
}

#[derive(Debug, Default)]
pub struct LightRegistry {
    lights: Slab<LightSource>,
    active: ActiveLightSet,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, light: LightSource) -> LightHandle {
        LightHandle(self.lights.insert(light))
    }

    /// Creates a light from its authoring data. If the light's texture is
    /// unknown, the light is kept but disabled.
    pub fn insert_def(
        &mut self,
        def: LightDef,
        sprites: &impl SpriteLookup,
        pixels_per_unit: f32,
    ) -> LightHandle {
        let sprite = sprites.lookup(&def.texture_path);

        if sprite.is_none() {
            log::warn!(
                "Light texture `{}` not found, disabling light at {}",
                def.texture_path,
                def.position,
            );
        }

        let light = def
            .into_source(sprite, pixels_per_unit)
            .with_enabled(sprite.is_some());

        self.insert(light)
    }

    pub fn remove(&mut self, handle: LightHandle) -> Option<LightSource> {
        if self.lights.contains(handle.0) {
            Some(self.lights.remove(handle.0))
        } else {
            None
        }
    }

    pub fn get(&self, handle: LightHandle) -> Option<&LightSource> {
        self.lights.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: LightHandle) -> Option<&mut LightSource> {
        self.lights.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightHandle, &LightSource)> + '_ {
        self.lights
            .iter()
            .map(|(key, light)| (LightHandle(key), light))
    }

    pub fn clear(&mut self) {
        self.lights.clear();
        self.active.lights.clear();
    }

    /// Rebuilds the active set from scratch for a viewer at `viewer`.
    ///
    /// A light is active if it is enabled, has a sprite, and its origin is at
    /// most `max_range` away from the viewer. Enabled lights without a sprite
    /// are disabled here.
    pub fn cull_active(&mut self, viewer: Point2<f32>) -> &ActiveLightSet {
        self.active.lights.clear();

        for (key, light) in self.lights.iter_mut() {
            if !light.is_enabled() {
                continue;
            }

            if light.sprite().is_none() {
                log::warn!("Light {} has no sprite, disabling it", key);
                light.set_enabled(false);
                continue;
            }

            let distance_squared = (light.origin() - viewer).norm_squared();
            if distance_squared > light.max_range() * light.max_range() {
                continue;
            }

            self.active.lights.push((LightHandle(key), *light));
        }

        &self.active
    }

    /// The active set computed by the last call to `cull_active`.
    pub fn active(&self) -> &ActiveLightSet {
        &self.active
    }
}
