//! Packing of lights for single-pass deferred compositing.
//!
//! This path only produces smooth, shader-computed attenuation. It does not
//! consume shadow quads and so casts no hard shadows; it cannot replace the
//! stencil path unless quad data is also made available to the shader.

use bytemuck::Zeroable;
use bytemuck_derive::{Pod, Zeroable};

use crate::{
    geom::{Camera, Screen},
    Color4,
};

use super::ActiveLightSet;

/// Size of the light array in the deferred shader.
pub const MAX_DEFERRED_LIGHTS: usize = 32;

/// One light in std140 layout.
#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct LightUniform {
    /// Normalized screen position with the origin at the bottom left, and
    /// the light height in `z`.
    pub position: [f32; 3],
    _pad0: f32,
    pub color: [f32; 4],
    pub falloff: [f32; 3],
    _pad1: f32,
}

/// The uniform block consumed by the deferred compose shader, in std140
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct LightsBlock {
    pub count: i32,
    _pad0: [i32; 3],
    pub ambient: [f32; 4],
    pub resolution: [f32; 2],
    _pad1: [f32; 2],
    pub lights: [LightUniform; MAX_DEFERRED_LIGHTS],
}

impl LightsBlock {
    /// The filled slots. `count` is clamped to the array size.
    pub fn lights(&self) -> &[LightUniform] {
        let count = self.count.clamp(0, MAX_DEFERRED_LIGHTS as i32) as usize;
        &self.lights[..count]
    }
}

#[derive(Debug, Clone)]
pub struct DeferredLightPacker {
    light_height: f32,
}

impl DeferredLightPacker {
    pub fn new(light_height: f32) -> Self {
        Self { light_height }
    }

    /// Projects the active lights into screen space. Lights beyond
    /// `MAX_DEFERRED_LIGHTS` are dropped.
    pub fn pack(
        &self,
        active: &ActiveLightSet,
        camera: &Camera,
        screen: Screen,
        ambient: Color4,
    ) -> LightsBlock {
        if active.len() > MAX_DEFERRED_LIGHTS {
            log::warn!(
                "{} active lights exceed deferred capacity of {}, truncating",
                active.len(),
                MAX_DEFERRED_LIGHTS,
            );
        }

        let mut block = LightsBlock::zeroed();
        block.ambient = ambient.into();
        block.resolution = [screen.logical_size.x, screen.logical_size.y];

        for (slot, (_, light)) in block.lights.iter_mut().zip(active.iter()) {
            let pixel = camera.project(screen, light.origin());

            *slot = LightUniform {
                position: [
                    pixel.x / screen.logical_size.x,
                    // Textures have their origin at the bottom left.
                    1.0 - pixel.y / screen.logical_size.y,
                    self.light_height,
                ],
                color: light.color().into(),
                falloff: light.falloff().into(),
                ..LightUniform::zeroed()
            };
            block.count += 1;
        }

        block
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point2, Vector2};

    use super::super::{Falloff, LightRegistry, LightSource, SpriteId};
    use super::*;

    fn screen() -> Screen {
        Screen::new(Vector2::new(640.0, 480.0), Vector2::new(640, 480))
    }

    fn camera() -> Camera {
        Camera {
            center: Point2::new(10.0, 5.0),
            zoom: 48.0,
            angle: 0.0,
        }
    }

    fn light(x: f32, y: f32) -> LightSource {
        LightSource::new(Point2::new(x, y), Some(SpriteId(0))).with_max_range(1000.0)
    }

    #[test]
    fn projects_and_flips_y() {
        let mut registry = LightRegistry::new();
        registry.insert(light(10.0, 5.0));
        registry.insert(light(10.0, 7.5));
        registry.insert(
            light(10.0, 5.0)
                .with_center_offset_px(Vector2::new(160.0, 0.0), 48.0)
                .with_color(Color4::new(0.1, 0.2, 0.3, 0.4))
                .with_falloff(Falloff {
                    constant: 1.0,
                    linear: 2.0,
                    quadratic: 3.0,
                }),
        );

        let active = registry.cull_active(Point2::new(10.0, 5.0));
        let block = DeferredLightPacker::new(0.075).pack(
            active,
            &camera(),
            screen(),
            Color4::new(1.0, 1.0, 1.0, 0.2),
        );

        assert_eq!(block.count, 3);
        assert_eq!(block.resolution, [640.0, 480.0]);
        assert_eq!(block.ambient, [1.0, 1.0, 1.0, 0.2]);

        let close = |a: [f32; 3], b: [f32; 3]| a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4);

        let lights = block.lights();
        assert!(close(lights[0].position, [0.5, 0.5, 0.075]));
        assert!(close(lights[1].position, [0.5, 0.25, 0.075]));
        assert!(close(lights[2].position, [0.75, 0.5, 0.075]));
        assert_eq!(lights[2].color, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(lights[2].falloff, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn truncates_to_capacity() {
        let mut registry = LightRegistry::new();
        for i in 0..MAX_DEFERRED_LIGHTS + 8 {
            registry.insert(light(i as f32 * 0.1, 0.0));
        }

        let active = registry.cull_active(Point2::origin());
        assert_eq!(active.len(), MAX_DEFERRED_LIGHTS + 8);

        let block = DeferredLightPacker::new(0.075).pack(active, &camera(), screen(), Color4::BLACK);

        assert_eq!(block.count as usize, MAX_DEFERRED_LIGHTS);

        let expected_last = camera().project(screen(), Point2::new((MAX_DEFERRED_LIGHTS - 1) as f32 * 0.1, 0.0));
        let last = block.lights()[MAX_DEFERRED_LIGHTS - 1];
        assert!((last.position[0] - expected_last.x / 640.0).abs() < 1e-4);
    }

    #[test]
    fn empty_set_packs_nothing() {
        let block = DeferredLightPacker::new(0.075).pack(
            &ActiveLightSet::default(),
            &camera(),
            screen(),
            Color4::BLACK,
        );

        assert_eq!(block.count, 0);
        assert!(block.lights().is_empty());
    }

    #[test]
    fn out_of_range_count_is_clamped() {
        let mut block = LightsBlock::zeroed();

        block.count = -3;
        assert!(block.lights().is_empty());

        block.count = MAX_DEFERRED_LIGHTS as i32 + 10;
        assert_eq!(block.lights().len(), MAX_DEFERRED_LIGHTS);
    }

    #[test]
    fn block_has_std140_size() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 48);
        assert_eq!(std::mem::size_of::<LightsBlock>(), 48 + 48 * MAX_DEFERRED_LIGHTS);
    }
}
