use serde::{Deserialize, Serialize};

/// Errors from parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("hex color must have 8 digits (RRGGBBAA), got {len} in {input:?}")]
    InvalidLength { input: String, len: usize },
    #[error("invalid hex byte {pair:?} in {input:?}")]
    InvalidDigit { input: String, pair: String },
}

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse an `RRGGBBAA` string. A leading `#` is accepted.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || digits.len() != 8 {
            return Err(ColorError::InvalidLength {
                input: hex.to_string(),
                len: digits.chars().count(),
            });
        }

        let mut channels = [0.0f32; 4];
        for (i, channel) in channels.iter_mut().enumerate() {
            let pair = &digits[i * 2..i * 2 + 2];
            let byte = u8::from_str_radix(pair, 16).map_err(|_| ColorError::InvalidDigit {
                input: hex.to_string(),
                pair: pair.to_string(),
            })?;
            *channel = f32::from(byte) / 255.0;
        }

        Ok(Self::new(channels[0], channels[1], channels[2], channels[3]))
    }

    /// Format as `#rrggbbaa`, rounding each channel to the nearest byte.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }

    /// Multiply the RGB channels by `factor`. Alpha is left alone.
    pub fn shaded(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn parses_robe_red() {
        let c = Color::from_hex("ff1158ff").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 0.0667));
        assert!(close(c.b, 0.345));
        assert!(close(c.a, 1.0));
    }

    #[test]
    fn accepts_leading_hash_and_uppercase() {
        let c = Color::from_hex("#FFCC00FF").unwrap();
        assert!(close(c.g, 0.8));
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn short_string_is_rejected() {
        let err = Color::from_hex("zz").unwrap_err();
        assert!(matches!(err, ColorError::InvalidLength { len: 2, .. }));
    }

    #[test]
    fn non_hex_digits_are_rejected() {
        let err = Color::from_hex("ff11zzff").unwrap_err();
        match err {
            ColorError::InvalidDigit { pair, .. } => assert_eq!(pair, "zz"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert!(Color::from_hex("ffééff").is_err());
    }

    #[test]
    fn hex_formatting_matches_parse() {
        let c = Color::from_hex("6d5858ff").unwrap();
        assert_eq!(c.to_hex(), "#6d5858ff");
    }

    #[test]
    fn shading_keeps_alpha() {
        let c = Color::new(1.0, 0.5, 0.25, 0.5).shaded(0.5);
        assert_eq!(c, Color::new(0.5, 0.25, 0.125, 0.5));
    }
}
