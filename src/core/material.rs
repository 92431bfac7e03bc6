use super::EmissionOptions;
use crate::error::Error;
use crate::primitives::MaterialBlock;
use nalgebra::Vector3;
use num_traits::identities::Zero;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingVariant {
    /// Raw specular intensity, separate specular color, no color override.
    Legacy,
    /// Black specular means no specular; honors the color override.
    #[default]
    Current,
}

impl FromStr for ShadingVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "a" => Ok(ShadingVariant::Legacy),
            "current" | "b" => Ok(ShadingVariant::Current),
            _ => Err(Error::InvalidOverrideValue {
                option: "variant",
                value: s.to_string(),
            }),
        }
    }
}

/// Shading attributes shared by every triangle of one material.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceAttributes {
    pub color: Vector3<f32>,
    pub specular: f32,
    pub specular_color: Option<Vector3<f32>>,
    pub shininess: f32,
    pub opacity: f32,
    pub reflectiveness: f32,
}

/// Per-run shading policy, resolved once from the emission options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shading {
    variant: ShadingVariant,
    color_override: Option<Vector3<f32>>,
    reflectiveness: f32,
}

impl Default for Shading {
    fn default() -> Self {
        Self::from(&EmissionOptions::default())
    }
}

impl From<&EmissionOptions> for Shading {
    fn from(options: &EmissionOptions) -> Self {
        Self {
            variant: options.variant,
            color_override: options.color_override,
            reflectiveness: options.reflectiveness.unwrap_or(0.0),
        }
    }
}

impl Shading {
    pub fn variant(&self) -> ShadingVariant {
        self.variant
    }

    pub fn reflectiveness(&self) -> f32 {
        self.reflectiveness
    }

    pub fn surface(&self, material: &MaterialBlock) -> SurfaceAttributes {
        let specular_rgb = material.specular.xyz();
        let intensity = material.specular.w;

        let (color, specular, specular_color) = match self.variant {
            ShadingVariant::Legacy => (material.diffuse, intensity, Some(specular_rgb)),
            ShadingVariant::Current => {
                let specular = if specular_rgb.is_zero() {
                    0.0
                } else {
                    intensity
                };
                let color = self.color_override.unwrap_or(material.diffuse);

                (color, specular, None)
            }
        };

        SurfaceAttributes {
            color,
            specular,
            specular_color,
            shininess: material.shininess,
            opacity: material.transparency,
            reflectiveness: self.reflectiveness,
        }
    }
}
