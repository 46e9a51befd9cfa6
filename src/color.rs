use bytemuck_derive::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Zeroable, Pod)]
#[repr(C)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const WHITE: Color4 = Color4::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color4 = Color4::new(0.0, 0.0, 0.0, 1.0);

    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parses the `#AARRGGBB` notation used by map editors for object
    /// properties.
    pub fn from_argb_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let value = u32::from_str_radix(digits, 16).ok()?;

        Some(Self::from_u8(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
            (value >> 24) as u8,
        ))
    }

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), f(self.a))
    }
}

impl From<[f32; 4]> for Color4 {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color4> for [f32; 4] {
    fn from(c: Color4) -> [f32; 4] {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_argb_hex() {
        let color = Color4::from_argb_hex("#80ff0000").unwrap();

        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 128.0 / 255.0);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color4::from_argb_hex("ff0000").is_none());
        assert!(Color4::from_argb_hex("#ff0000").is_none());
        assert!(Color4::from_argb_hex("#zzzzzzzz").is_none());
        assert!(Color4::from_argb_hex("#+fffffff").is_none());
        assert!(Color4::from_argb_hex("#-0000000").is_none());
    }
}
