use std::{collections::HashMap, path::Path};

use nalgebra::{Point2, Vector2};
use thiserror::Error;

use crate::{geom::Rect, Color4};

use super::{Falloff, LightSource, SpriteId};

/// Directory that texture names in light properties are relative to.
pub const LIGHT_TEXTURE_DIR: &str = "data/light";

/// Texture used by lights that do not name one.
pub const DEFAULT_LIGHT_TEXTURE: &str = "data/light/smooth.png";

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i32),
    Float(f32),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LightDefError {
    #[error("property `{key}` should be a {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("invalid color `{0}`, expected #AARRGGBB")]
    InvalidColor(String),

    #[error("light object has an empty rectangle")]
    EmptyRect,
}

/// Authoring data of a light, as handed over by level loading.
#[derive(Debug, Clone, PartialEq)]
pub struct LightDef {
    /// Position in world units.
    pub position: Point2<f32>,
    pub size_px: Vector2<f32>,
    pub color: Color4,
    pub center_offset_px: Vector2<f32>,
    pub texture_path: String,
    pub max_range: f32,
    pub falloff: Falloff,
}

impl Default for LightDef {
    fn default() -> Self {
        Self {
            position: Point2::origin(),
            size_px: Vector2::new(256.0, 256.0),
            color: Color4::WHITE,
            center_offset_px: Vector2::zeros(),
            texture_path: DEFAULT_LIGHT_TEXTURE.into(),
            max_range: LightSource::DEFAULT_MAX_RANGE,
            falloff: Falloff::default(),
        }
    }
}

impl LightDef {
    /// Reads a light from a map object.
    ///
    /// `rect_px` is the object's rectangle in map pixels; the light sits in
    /// its center and its sprite covers it. Recognized properties are
    /// `color`, `texture`, `center_offset_x_px`, `center_offset_y_px`,
    /// `falloff_constant`, `falloff_linear`, `falloff_quadratic` and
    /// `max_range`. Unknown properties are ignored.
    pub fn from_properties(
        rect_px: Rect,
        properties: &HashMap<String, PropertyValue>,
        pixels_per_unit: f32,
    ) -> Result<Self, LightDefError> {
        if rect_px.size.x <= 0.0 || rect_px.size.y <= 0.0 {
            return Err(LightDefError::EmptyRect);
        }

        let mut def = LightDef {
            position: Point2::from(rect_px.center.coords / pixels_per_unit),
            size_px: rect_px.size,
            ..LightDef::default()
        };

        if let Some(color) = get_string(properties, "color")? {
            def.color = Color4::from_argb_hex(color)
                .ok_or_else(|| LightDefError::InvalidColor(color.into()))?;
        }

        if let Some(texture) = get_string(properties, "texture")? {
            def.texture_path = Path::new(LIGHT_TEXTURE_DIR)
                .join(texture)
                .to_string_lossy()
                .into_owned();
        }

        if let Some(x) = get_int(properties, "center_offset_x_px")? {
            def.center_offset_px.x = x as f32;
        }
        if let Some(y) = get_int(properties, "center_offset_y_px")? {
            def.center_offset_px.y = y as f32;
        }

        if let Some(constant) = get_float(properties, "falloff_constant")? {
            def.falloff.constant = constant;
        }
        if let Some(linear) = get_float(properties, "falloff_linear")? {
            def.falloff.linear = linear;
        }
        if let Some(quadratic) = get_float(properties, "falloff_quadratic")? {
            def.falloff.quadratic = quadratic;
        }

        if let Some(max_range) = get_float(properties, "max_range")? {
            def.max_range = max_range;
        }

        Ok(def)
    }

    pub fn into_source(self, sprite: Option<SpriteId>, pixels_per_unit: f32) -> LightSource {
        LightSource::new(self.position, sprite)
            .with_center_offset_px(self.center_offset_px, pixels_per_unit)
            .with_color(self.color)
            .with_falloff(self.falloff)
            .with_sprite_size_px(self.size_px)
            .with_max_range(self.max_range)
    }
}

fn get_string<'a>(
    properties: &'a HashMap<String, PropertyValue>,
    key: &str,
) -> Result<Option<&'a str>, LightDefError> {
    match properties.get(key) {
        None => Ok(None),
        Some(PropertyValue::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(wrong_type(key, "string")),
    }
}

fn get_int(
    properties: &HashMap<String, PropertyValue>,
    key: &str,
) -> Result<Option<i32>, LightDefError> {
    match properties.get(key) {
        None => Ok(None),
        Some(PropertyValue::Int(i)) => Ok(Some(*i)),
        Some(_) => Err(wrong_type(key, "int")),
    }
}

fn get_float(
    properties: &HashMap<String, PropertyValue>,
    key: &str,
) -> Result<Option<f32>, LightDefError> {
    match properties.get(key) {
        None => Ok(None),
        Some(PropertyValue::Float(f)) => Ok(Some(*f)),
        // Map editors store whole numbers as ints.
        Some(PropertyValue::Int(i)) => Ok(Some(*i as f32)),
        Some(_) => Err(wrong_type(key, "float")),
    }
}

fn wrong_type(key: &str, expected: &'static str) -> LightDefError {
    LightDefError::WrongType {
        key: key.into(),
        expected,
    }
}
