use thiserror::Error;

use crate::Color4;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("extrusion factor must be larger than one, got {0}")]
    Extrusion(f32),

    #[error("occluder search radius must be positive, got {0}")]
    SearchRadius(f32),

    #[error("circles need at least three segments, got {0}")]
    CircleSegments(usize),

    #[error("circle scale must be at least one, got {0}")]
    CircleScale(f32),

    #[error("pixels per unit must be positive, got {0}")]
    PixelsPerUnit(f32),
}

/// Parameters of shadow volume construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowParams {
    /// Factor `K` by which edge vertices are pushed away from the light. This
    /// needs to be large compared to the visible part of the world, so that
    /// the far side of a shadow never shows up on screen.
    pub extrusion: f32,

    /// Radius around the light in which occluders are considered. Edges with
    /// both vertices outside of it cast no shadow.
    pub search_radius: f32,

    /// Number of segments used to tessellate circle occluders.
    pub circle_segments: usize,

    /// Factor by which tessellated circles are enlarged, so that the
    /// silhouette fully encloses the true circle.
    pub circle_scale: f32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            extrusion: 10_000.0,
            search_radius: 10.0,
            circle_segments: 20,
            circle_scale: 1.2,
        }
    }
}

impl ShadowParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.extrusion > 1.0) {
            return Err(ParamsError::Extrusion(self.extrusion));
        }
        if !(self.search_radius > 0.0) {
            return Err(ParamsError::SearchRadius(self.search_radius));
        }
        if self.circle_segments < 3 {
            return Err(ParamsError::CircleSegments(self.circle_segments));
        }
        if !(self.circle_scale >= 1.0) {
            return Err(ParamsError::CircleScale(self.circle_scale));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightSystemParams {
    /// Conversion from authoring pixels to world units.
    pub pixels_per_unit: f32,

    pub shadow: ShadowParams,

    /// Initial ambient color of the deferred path.
    pub ambient: Color4,

    /// Height above the screen plane assumed for lights in the deferred
    /// shader.
    pub light_height: f32,
}

impl Default for LightSystemParams {
    fn default() -> Self {
        Self {
            pixels_per_unit: 48.0,
            shadow: ShadowParams::default(),
            ambient: Color4::new(1.0, 1.0, 1.0, 0.2),
            light_height: 0.075,
        }
    }
}

impl LightSystemParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.pixels_per_unit > 0.0) {
            return Err(ParamsError::PixelsPerUnit(self.pixels_per_unit));
        }

        self.shadow.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LightSystemParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_shadow_params() {
        let params = ShadowParams {
            extrusion: 1.0,
            ..ShadowParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::Extrusion(1.0)));

        let params = ShadowParams {
            circle_segments: 2,
            ..ShadowParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::CircleSegments(2)));

        let params = ShadowParams {
            search_radius: f32::NAN,
            ..ShadowParams::default()
        };
        assert!(params.validate().is_err());
    }
}
