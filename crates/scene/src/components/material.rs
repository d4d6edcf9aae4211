use foundation::color::Rgb;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Blending {
    #[default]
    Normal,
    Additive,
}

/// Which triangle faces are rasterized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Image slots resolved to files by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    EarthDay,
    EarthDisplacement,
}

/// Custom shader programs known to the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderProgram {
    Atmosphere,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MaterialKind {
    /// Unlit flat color.
    Basic,
    /// Lit surface with optional color and displacement maps.
    Standard {
        map: Option<TextureSlot>,
        displacement_map: Option<TextureSlot>,
        displacement_scale: f64,
    },
    Shader { program: ShaderProgram },
    Line,
    Points { size: f32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Rgb,
    pub blending: Blending,
    pub side: Side,
}

impl Material {
    pub fn basic(color: Rgb) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            blending: Blending::Normal,
            side: Side::Front,
        }
    }

    pub fn line(color: Rgb) -> Self {
        Self {
            kind: MaterialKind::Line,
            ..Self::basic(color)
        }
    }

    pub fn points(color: Rgb, size: f32) -> Self {
        Self {
            kind: MaterialKind::Points { size },
            ..Self::basic(color)
        }
    }

    pub fn standard_textured(
        map: TextureSlot,
        displacement_map: Option<TextureSlot>,
        displacement_scale: f64,
    ) -> Self {
        Self {
            kind: MaterialKind::Standard {
                map: Some(map),
                displacement_map,
                displacement_scale,
            },
            ..Self::basic(Rgb::WHITE)
        }
    }

    pub fn shader(program: ShaderProgram) -> Self {
        Self {
            kind: MaterialKind::Shader { program },
            ..Self::basic(Rgb::WHITE)
        }
    }

    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Blending, Material, MaterialKind, ShaderProgram, Side};

    #[test]
    fn builders_override_defaults() {
        let m = Material::shader(ShaderProgram::Atmosphere)
            .with_blending(Blending::Additive)
            .with_side(Side::Back);
        assert_eq!(m.blending, Blending::Additive);
        assert_eq!(m.side, Side::Back);
        assert!(matches!(m.kind, MaterialKind::Shader { .. }));
    }
}
