//! Closed vocabularies accepted by coordinate-system and texture entries.

use std::fmt;
use std::str::FromStr;

use crate::error::EggError;

/// Coordinate system declared by a `<CoordinateSystem>` entry.
///
/// Parsing is case-exact. Egg loaders assume `Y-up` when no declaration is
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinateSystem {
    /// `Y-up`
    #[default]
    YUp,
    /// `Z-up`
    ZUp,
    /// `Y-up-right`
    YUpRight,
    /// `Z-up-right`
    ZUpRight,
    /// `Y-up-left`
    YUpLeft,
    /// `Z-up-left`
    ZUpLeft,
}

impl CoordinateSystem {
    /// Every coordinate system, in declaration order.
    pub const ALL: [CoordinateSystem; 6] = [
        CoordinateSystem::YUp,
        CoordinateSystem::ZUp,
        CoordinateSystem::YUpRight,
        CoordinateSystem::ZUpRight,
        CoordinateSystem::YUpLeft,
        CoordinateSystem::ZUpLeft,
    ];

    /// The literal token.
    pub fn as_str(self) -> &'static str {
        match self {
            CoordinateSystem::YUp => "Y-up",
            CoordinateSystem::ZUp => "Z-up",
            CoordinateSystem::YUpRight => "Y-up-right",
            CoordinateSystem::ZUpRight => "Z-up-right",
            CoordinateSystem::YUpLeft => "Y-up-left",
            CoordinateSystem::ZUpLeft => "Z-up-left",
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoordinateSystem {
    type Err = EggError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|system| system.as_str() == s)
            .ok_or_else(|| EggError::invalid("CoordinateSystem", s, expected(&Self::ALL)))
    }
}

fn expected<T: fmt::Display>(all: &[T]) -> String {
    let tokens: Vec<String> = all.iter().map(ToString::to_string).collect();
    format!("should be one of {}", tokens.join(", "))
}

/// Declares an uppercase token vocabulary parsed case-insensitively.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident for $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Canonical uppercase token.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EggError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let upper = s.to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == upper)
                    .ok_or_else(|| EggError::invalid($field, s, expected(Self::ALL)))
            }
        }
    };
}

vocabulary! {
    /// Load format of a texture image (`format` scalar).
    TextureFormat for "format" {
        /// `RGBA`
        Rgba => "RGBA",
        /// `RGBM`
        Rgbm => "RGBM",
        /// `RGBA12`
        Rgba12 => "RGBA12",
        /// `RGBA8`
        Rgba8 => "RGBA8",
        /// `RGBA4`
        Rgba4 => "RGBA4",
        /// `RGB`
        Rgb => "RGB",
        /// `RGB12`
        Rgb12 => "RGB12",
        /// `RGB8`
        Rgb8 => "RGB8",
        /// `RGB5`
        Rgb5 => "RGB5",
        /// `RGB332`
        Rgb332 => "RGB332",
        /// `LUMINANCE_ALPHA`
        LuminanceAlpha => "LUMINANCE_ALPHA",
        /// `RED`
        Red => "RED",
        /// `GREEN`
        Green => "GREEN",
        /// `BLUE`
        Blue => "BLUE",
        /// `ALPHA`
        Alpha => "ALPHA",
        /// `LUMINANCE`
        Luminance => "LUMINANCE",
    }
}

vocabulary! {
    /// Real-time compression applied when the texture is uploaded (`compression` scalar).
    CompressionMode for "compression" {
        /// Follow the loader's configuration.
        Default => "DEFAULT",
        /// `OFF`
        Off => "OFF",
        /// `ON`
        On => "ON",
        /// `FXT1`
        Fxt1 => "FXT1",
        /// `DXT1`
        Dxt1 => "DXT1",
        /// `DXT2`
        Dxt2 => "DXT2",
        /// `DXT3`
        Dxt3 => "DXT3",
        /// `DXT4`
        Dxt4 => "DXT4",
        /// `DXT5`
        Dxt5 => "DXT5",
    }
}

vocabulary! {
    /// Behavior outside the 0..1 UV range (`wrap`, `wrapu`, `wrapv` scalars).
    WrapMode for "wrap" {
        /// `CLAMP`
        Clamp => "CLAMP",
        /// `REPEAT`
        Repeat => "REPEAT",
        /// `MIRROR`
        Mirror => "MIRROR",
        /// `MIRROR_ONCE`
        MirrorOnce => "MIRROR_ONCE",
        /// `BORDER_COLOR`
        BorderColor => "BORDER_COLOR",
    }
}

vocabulary! {
    /// Dimensionality of a texture (`type` scalar).
    TextureType for "type" {
        /// `1D`
        OneD => "1D",
        /// `2D`
        TwoD => "2D",
        /// `3D`
        ThreeD => "3D",
        /// `CUBE_MAP`
        CubeMap => "CUBE_MAP",
    }
}

vocabulary! {
    /// How a texture combines with the underlying color (`envtype` scalar).
    EnvType for "envtype" {
        /// `MODULATE`
        Modulate => "MODULATE",
        /// `DECAL`
        Decal => "DECAL",
        /// `BLEND`
        Blend => "BLEND",
        /// `REPLACE`
        Replace => "REPLACE",
        /// `ADD`
        Add => "ADD",
        /// `BLEND_COLOR_SCALE`
        BlendColorScale => "BLEND_COLOR_SCALE",
        /// `MODULATE_GLOW`
        ModulateGlow => "MODULATE_GLOW",
        /// `MODULATE_GLOSS`
        ModulateGloss => "MODULATE_GLOSS",
    }
}

impl Default for CompressionMode {
    fn default() -> Self {
        CompressionMode::Default
    }
}

impl Default for TextureType {
    fn default() -> Self {
        TextureType::TwoD
    }
}

impl Default for EnvType {
    fn default() -> Self {
        EnvType::Modulate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_system_tokens() {
        for system in CoordinateSystem::ALL {
            assert_eq!(system.as_str().parse::<CoordinateSystem>().unwrap(), system);
        }
        assert_eq!(CoordinateSystem::default(), CoordinateSystem::YUp);
    }

    #[test]
    fn test_coordinate_system_is_case_exact() {
        let err = "y-up".parse::<CoordinateSystem>().unwrap_err();
        assert!(matches!(err, EggError::InvalidValue { .. }));
        assert!("X-up".parse::<CoordinateSystem>().is_err());
    }

    #[test]
    fn test_wrap_modes_case_insensitive() {
        assert_eq!("repeat".parse::<WrapMode>().unwrap(), WrapMode::Repeat);
        assert_eq!("Mirror_Once".parse::<WrapMode>().unwrap(), WrapMode::MirrorOnce);
        for mode in WrapMode::ALL {
            assert_eq!(mode.to_string().parse::<WrapMode>().unwrap(), *mode);
        }
        let err = "TILE".parse::<WrapMode>().unwrap_err();
        match err {
            EggError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "wrap");
                assert_eq!(value, "TILE");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_texture_vocabularies_round_trip() {
        for format in TextureFormat::ALL {
            assert_eq!(format.as_str().parse::<TextureFormat>().unwrap(), *format);
        }
        for mode in CompressionMode::ALL {
            assert_eq!(mode.as_str().parse::<CompressionMode>().unwrap(), *mode);
        }
        for kind in TextureType::ALL {
            assert_eq!(kind.as_str().parse::<TextureType>().unwrap(), *kind);
        }
        for env in EnvType::ALL {
            assert_eq!(env.as_str().parse::<EnvType>().unwrap(), *env);
        }
        assert_eq!("cube_map".parse::<TextureType>().unwrap(), TextureType::CubeMap);
        assert_eq!("luminance_alpha".parse::<TextureFormat>().unwrap(), TextureFormat::LuminanceAlpha);
        assert!("4D".parse::<TextureType>().is_err());
        assert!("NORMAL".parse::<EnvType>().is_err());
        assert!("DXT6".parse::<CompressionMode>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CompressionMode::default().as_str(), "DEFAULT");
        assert_eq!(TextureType::default().as_str(), "2D");
        assert_eq!(EnvType::default().as_str(), "MODULATE");
    }
}
