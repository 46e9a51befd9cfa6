/// Blending of fragments onto the framebuffer, with separate factors for the
/// color and alpha channels. The equation is always addition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Blend {
    pub color: BlendFunc,
    pub alpha: BlendFunc,
}

/// `src * src_factor + dst * dst_factor`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlendFactor {
    One,
    SrcAlpha,
}

impl Blend {
    /// Accumulates light: color is weighted by the source alpha, while alpha
    /// itself is summed unweighted.
    pub fn additive() -> Self {
        Self {
            color: BlendFunc {
                src: BlendFactor::SrcAlpha,
                dst: BlendFactor::One,
            },
            alpha: BlendFunc {
                src: BlendFactor::One,
                dst: BlendFactor::One,
            },
        }
    }

    /// Arguments of `glBlendFuncSeparate`.
    pub fn to_gl(self) -> [u32; 4] {
        [
            self.color.src.to_gl(),
            self.color.dst.to_gl(),
            self.alpha.src.to_gl(),
            self.alpha.dst.to_gl(),
        ]
    }
}

impl BlendFactor {
    pub fn to_gl(self) -> u32 {
        match self {
            BlendFactor::One => glow::ONE,
            BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_sums_alpha_unweighted() {
        assert_eq!(
            Blend::additive().to_gl(),
            [glow::SRC_ALPHA, glow::ONE, glow::ONE, glow::ONE]
        );
    }
}
