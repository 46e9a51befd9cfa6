use nalgebra::{Point2, Vector2};

use crate::{geom::Rect, Color4};

/// Opaque handle of a light sprite texture, issued by a
/// [`SpriteLookup`](super::SpriteLookup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub usize);

/// Distance attenuation coefficients, as in
/// `1 / (constant + linear * d + quadratic * d * d)`.
///
/// The stencil path ignores these; the deferred path forwards them unchanged
/// to its shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Falloff {
    fn default() -> Self {
        Self {
            constant: 0.4,
            linear: 3.0,
            quadratic: 20.0,
        }
    }
}

impl From<Falloff> for [f32; 3] {
    fn from(f: Falloff) -> [f32; 3] {
        [f.constant, f.linear, f.quadratic]
    }
}

/// A light that casts hard shadows from `position + center_offset`.
///
/// The falloff sprite is centered on `position`, while shadows are cast from
/// the offset origin, since the visible light source (e.g. a lamp's bulb) is
/// not always in the middle of its glow texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    position: Point2<f32>,
    center_offset: Vector2<f32>,
    center_offset_px: Vector2<f32>,
    color: Color4,
    falloff: Falloff,
    sprite_size_px: Vector2<f32>,
    sprite: Option<SpriteId>,
    enabled: bool,
    max_range: f32,
}

impl LightSource {
    pub const DEFAULT_MAX_RANGE: f32 = 10.0;

    pub fn new(position: Point2<f32>, sprite: Option<SpriteId>) -> Self {
        Self {
            position,
            center_offset: Vector2::zeros(),
            center_offset_px: Vector2::zeros(),
            color: Color4::WHITE,
            falloff: Falloff::default(),
            sprite_size_px: Vector2::new(256.0, 256.0),
            sprite,
            enabled: true,
            max_range: Self::DEFAULT_MAX_RANGE,
        }
    }

    /// Sets the offset of the light origin relative to the sprite center.
    /// `pixels_per_unit` converts the pixel offset into world units.
    pub fn with_center_offset_px(mut self, offset_px: Vector2<f32>, pixels_per_unit: f32) -> Self {
        self.center_offset_px = offset_px;
        self.center_offset = offset_px / pixels_per_unit;
        self
    }

    pub fn with_color(mut self, color: Color4) -> Self {
        self.color = color;
        self
    }

    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_sprite_size_px(mut self, size_px: Vector2<f32>) -> Self {
        self.sprite_size_px = size_px;
        self
    }

    pub fn with_max_range(mut self, max_range: f32) -> Self {
        self.max_range = max_range;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    /// The point that shadows are cast from, in world units.
    pub fn origin(&self) -> Point2<f32> {
        self.position + self.center_offset
    }

    pub fn center_offset(&self) -> Vector2<f32> {
        self.center_offset
    }

    pub fn center_offset_px(&self) -> Vector2<f32> {
        self.center_offset_px
    }

    pub fn color(&self) -> Color4 {
        self.color
    }

    pub fn falloff(&self) -> Falloff {
        self.falloff
    }

    pub fn sprite(&self) -> Option<SpriteId> {
        self.sprite
    }

    pub fn sprite_size_px(&self) -> Vector2<f32> {
        self.sprite_size_px
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// World-space rectangle covered by the falloff sprite.
    pub fn sprite_rect(&self, pixels_per_unit: f32) -> Rect {
        Rect {
            center: self.position,
            size: self.sprite_size_px / pixels_per_unit,
        }
    }

    pub fn set_position(&mut self, position: Point2<f32>) {
        self.position = position;
    }

    pub fn set_color(&mut self, color: Color4) {
        self.color = color;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_max_range(&mut self, max_range: f32) {
        self.max_range = max_range;
    }

    pub fn set_sprite(&mut self, sprite: Option<SpriteId>) {
        self.sprite = sprite;
    }
}
