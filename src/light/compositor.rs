use std::borrow::Cow;

use crate::{
    geom::Rect,
    gl::{Blend, StencilTest},
    Color4,
};

use super::{LightSource, ShadowQuad, SpriteId};

/// Stencil value that marks pixels in shadow.
pub const SHADOW_MARKER: u8 = 1;

/// Placement of a light's falloff sprite in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSprite {
    pub sprite: SpriteId,
    pub rect: Rect,
    pub color: Color4,
}

/// One step of the stencil lighting protocol, to be executed by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum LightCommand<'a> {
    ClearStencil,
    ColorMask(bool),
    StencilTest(Option<StencilTest>),
    Blend(Option<Blend>),
    DrawShadowQuads(Cow<'a, [ShadowQuad]>),
    DrawSprite(LightSprite),
}

impl LightCommand<'_> {
    pub fn into_owned(self) -> LightCommand<'static> {
        match self {
            LightCommand::ClearStencil => LightCommand::ClearStencil,
            LightCommand::ColorMask(mask) => LightCommand::ColorMask(mask),
            LightCommand::StencilTest(test) => LightCommand::StencilTest(test),
            LightCommand::Blend(blend) => LightCommand::Blend(blend),
            LightCommand::DrawShadowQuads(quads) => {
                LightCommand::DrawShadowQuads(Cow::Owned(quads.into_owned()))
            }
            LightCommand::DrawSprite(sprite) => LightCommand::DrawSprite(sprite),
        }
    }
}

/// Something that can execute light commands, usually a GL render target.
///
/// Commands must be executed in the order they are given. The stencil
/// buffer is shared by all lights, so a target must not reorder commands of
/// different lights.
pub trait LightTarget {
    fn execute(&mut self, command: LightCommand<'_>);
}

/// Records commands instead of executing them.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<LightCommand<'static>>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[LightCommand<'static>] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn num_stencil_clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| **command == LightCommand::ClearStencil)
            .count()
    }

    /// Whether the stencil test is enabled after executing all commands.
    pub fn stencil_enabled(&self) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|command| match command {
                LightCommand::StencilTest(test) => Some(test.is_some()),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Replays the recorded commands on another target.
    pub fn replay<T: LightTarget + ?Sized>(&self, target: &mut T) {
        for command in &self.commands {
            target.execute(command.clone());
        }
    }
}

impl LightTarget for CommandList {
    fn execute(&mut self, command: LightCommand<'_>) {
        self.commands.push(command.into_owned());
    }
}

/// Renders lights with hard shadows through the stencil buffer.
///
/// For every light, the stencil buffer is cleared, the light's shadow quads
/// are written into it with color writes disabled, and finally the light's
/// sprite is blended additively onto the pixels that remained unmarked.
#[derive(Debug, Clone)]
pub struct StencilCompositor {
    pixels_per_unit: f32,
}

impl StencilCompositor {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self { pixels_per_unit }
    }

    pub fn render_light<T>(&self, target: &mut T, light: &LightSource, quads: &[ShadowQuad])
    where
        T: LightTarget + ?Sized,
    {
        // A marker from the previous light must never mask this one.
        target.execute(LightCommand::ClearStencil);

        target.execute(LightCommand::ColorMask(false));
        target.execute(LightCommand::StencilTest(Some(StencilTest::write_marker(
            SHADOW_MARKER,
        ))));
        target.execute(LightCommand::DrawShadowQuads(Cow::Borrowed(quads)));

        target.execute(LightCommand::ColorMask(true));
        target.execute(LightCommand::StencilTest(Some(StencilTest::outside_marker(
            SHADOW_MARKER,
        ))));

        match light.sprite() {
            Some(sprite) => {
                target.execute(LightCommand::Blend(Some(Blend::additive())));
                target.execute(LightCommand::DrawSprite(LightSprite {
                    sprite,
                    rect: light.sprite_rect(self.pixels_per_unit),
                    color: light.color(),
                }));
                target.execute(LightCommand::Blend(None));
            }
            None => {
                log::warn!("Light at {} has no sprite to draw", light.position());
            }
        }

        target.execute(LightCommand::StencilTest(None));
    }

    /// Renders a sequence of lights, each with its own shadow quads.
    pub fn render<'q, T, I>(&self, target: &mut T, lights: I)
    where
        T: LightTarget + ?Sized,
        I: IntoIterator<Item = (&'q LightSource, &'q [ShadowQuad])>,
    {
        for (light, quads) in lights {
            self.render_light(target, light, quads);
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point2, Vector2};

    use super::*;

    fn light(x: f32) -> LightSource {
        LightSource::new(Point2::new(x, 0.0), Some(SpriteId(1)))
            .with_sprite_size_px(Vector2::new(96.0, 48.0))
            .with_color(Color4::new(1.0, 0.5, 0.0, 0.8))
    }

    fn quad(x: f32) -> ShadowQuad {
        ShadowQuad::extrude(
            Point2::origin(),
            crate::geom::Line(Point2::new(x, 1.0), Point2::new(x, -1.0)),
            100.0,
        )
    }

    #[test]
    fn renders_one_light_in_protocol_order() {
        let mut target = CommandList::new();
        let quads = vec![quad(2.0), quad(3.0)];

        StencilCompositor::new(48.0).render_light(&mut target, &light(0.0), &quads);

        let expected = vec![
            LightCommand::ClearStencil,
            LightCommand::ColorMask(false),
            LightCommand::StencilTest(Some(StencilTest::write_marker(SHADOW_MARKER))),
            LightCommand::DrawShadowQuads(Cow::Owned(quads.clone())),
            LightCommand::ColorMask(true),
            LightCommand::StencilTest(Some(StencilTest::outside_marker(SHADOW_MARKER))),
            LightCommand::Blend(Some(Blend::additive())),
            LightCommand::DrawSprite(LightSprite {
                sprite: SpriteId(1),
                rect: Rect {
                    center: Point2::origin(),
                    size: Vector2::new(2.0, 1.0),
                },
                color: Color4::new(1.0, 0.5, 0.0, 0.8),
            }),
            LightCommand::Blend(None),
            LightCommand::StencilTest(None),
        ];

        assert_eq!(target.commands(), expected.as_slice());
        assert!(!target.stencil_enabled());
    }

    #[test]
    fn every_light_gets_a_fresh_stencil() {
        let mut target = CommandList::new();
        let compositor = StencilCompositor::new(48.0);
        let lights = [light(0.0), light(5.0), light(-5.0)];

        // Only the first light has occluders, which must not affect the
        // others.
        let quads = [vec![quad(1.0)], Vec::new(), Vec::new()];
        compositor.render(
            &mut target,
            lights.iter().zip(quads.iter().map(Vec::as_slice)),
        );

        assert_eq!(target.num_stencil_clears(), lights.len());

        let mut stencil_enabled = false;
        for command in target.commands() {
            match command {
                LightCommand::ClearStencil => assert!(!stencil_enabled),
                LightCommand::StencilTest(test) => stencil_enabled = test.is_some(),
                LightCommand::DrawSprite(_) => assert!(stencil_enabled),
                _ => (),
            }
        }
        assert!(!stencil_enabled);
    }

    #[test]
    fn stencil_pass_writes_marker_without_color() {
        let write = StencilTest::write_marker(SHADOW_MARKER);
        let read = StencilTest::outside_marker(SHADOW_MARKER);

        assert_eq!(write.reference, SHADOW_MARKER);
        assert_eq!(read.reference, 0);
        assert_eq!(read.write_mask, 0);
    }

    #[test]
    fn replay_preserves_commands() {
        let mut recorded = CommandList::new();
        StencilCompositor::new(48.0).render_light(&mut recorded, &light(0.0), &[quad(2.0)]);

        let mut replayed = CommandList::new();
        recorded.replay(&mut replayed);

        assert_eq!(recorded.commands(), replayed.commands());
    }
}
