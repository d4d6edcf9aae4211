use foundation::color::Rgb;

/// Light sources. Directional lights shine from the entity's world position
/// toward the world origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Directional {
        color: Rgb,
        intensity: f32,
        cast_shadow: bool,
    },
    Ambient {
        color: Rgb,
        intensity: f32,
    },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Directional { intensity, .. } | Light::Ambient { intensity, .. } => *intensity,
        }
    }
}
