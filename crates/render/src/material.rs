use serde::{Deserialize, Serialize};

/// How a node's fragments are colored.
///
/// Encoded as the integer the shader expects: `-3` normal debug, `-2` flat
/// color, `-1` UV debug, `n` in `0..=65535` texture unit `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum MaterialSelector {
    NormalDebug,
    FlatColor,
    UvDebug,
    Texture(u16),
}

impl Default for MaterialSelector {
    fn default() -> Self {
        Self::FlatColor
    }
}

/// An integer that does not name any material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown material selector {0}")]
pub struct UnknownMaterial(pub i32);

impl MaterialSelector {
    pub fn code(self) -> i32 {
        match self {
            Self::NormalDebug => -3,
            Self::FlatColor => -2,
            Self::UvDebug => -1,
            Self::Texture(unit) => i32::from(unit),
        }
    }

    /// Whether drawing with this material reads texture coordinates.
    pub fn needs_uvs(self) -> bool {
        matches!(self, Self::UvDebug | Self::Texture(_))
    }

    /// Whether drawing with this material reads normals.
    pub fn needs_normals(self) -> bool {
        !matches!(self, Self::FlatColor)
    }
}

impl TryFrom<i32> for MaterialSelector {
    type Error = UnknownMaterial;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -3 => Ok(Self::NormalDebug),
            -2 => Ok(Self::FlatColor),
            -1 => Ok(Self::UvDebug),
            unit => u16::try_from(unit)
                .map(Self::Texture)
                .map_err(|_| UnknownMaterial(unit)),
        }
    }
}

impl From<MaterialSelector> for i32 {
    fn from(selector: MaterialSelector) -> Self {
        selector.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in [-3, -2, -1, 0, 3] {
            let selector = MaterialSelector::try_from(code).unwrap();
            assert_eq!(selector.code(), code);
        }
    }

    #[test]
    fn codes_below_normal_debug_are_unknown() {
        assert_eq!(MaterialSelector::try_from(-4), Err(UnknownMaterial(-4)));
    }

    #[test]
    fn texture_units_outside_u16_are_unknown() {
        assert_eq!(
            MaterialSelector::try_from(65_536),
            Err(UnknownMaterial(65_536))
        );
        assert_eq!(MaterialSelector::try_from(i32::MAX), Err(UnknownMaterial(i32::MAX)));
        let widest = MaterialSelector::Texture(u16::MAX);
        assert_eq!(widest.code(), 65_535);
        assert_eq!(MaterialSelector::try_from(widest.code()), Ok(widest));
    }

    #[test]
    fn attribute_needs() {
        assert!(!MaterialSelector::FlatColor.needs_uvs());
        assert!(!MaterialSelector::FlatColor.needs_normals());
        assert!(!MaterialSelector::NormalDebug.needs_uvs());
        assert!(MaterialSelector::NormalDebug.needs_normals());
        assert!(MaterialSelector::Texture(2).needs_uvs());
    }
}
