use super::ShadingVariant;
use crate::error::{Error, Result};
use nalgebra::Vector3;
use serde::Deserialize;
use std::io::Read;

/// Sentinel accepted in place of a value to leave an override unset.
pub const DEFAULT_SENTINEL: &str = "default";

#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmissionOptions {
    #[serde(rename = "color")]
    pub color_override: Option<Vector3<f32>>,
    pub reflectiveness: Option<f32>,
    pub variant: ShadingVariant,
}

impl EmissionOptions {
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let options: Self = serde_json::from_reader(reader)?;
        if let Some(reflectiveness) = options.reflectiveness {
            if !reflectiveness.is_finite() {
                return Err(invalid("reflectiveness", &reflectiveness.to_string()));
            }
        }

        Ok(options)
    }
}

fn invalid(option: &'static str, value: &str) -> Error {
    Error::InvalidOverrideValue {
        option,
        value: value.to_string(),
    }
}

fn is_default_sentinel(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(DEFAULT_SENTINEL)
}

fn parse_channel(channel: &str) -> Option<f32> {
    channel.trim().parse::<u8>().ok().map(|c| f32::from(c) / 255.0)
}

fn parse_hex_color(hex: &str) -> Option<Vector3<f32>> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|c| f32::from(c) / 255.0)
    };

    Some(Vector3::new(channel(0)?, channel(2)?, channel(4)?))
}

fn parse_rgb_color(channels: &str) -> Option<Vector3<f32>> {
    let channels: Vec<f32> = channels
        .split(',')
        .map(parse_channel)
        .collect::<Option<_>>()?;

    match channels[..] {
        [r, g, b] => Some(Vector3::new(r, g, b)),
        _ => None,
    }
}

fn parse_float_color(value: &str) -> Option<Vector3<f32>> {
    let components: Vec<f32> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|component| !component.is_empty())
        .map(|component| component.parse::<f32>().ok().filter(|c| c.is_finite()))
        .collect::<Option<_>>()?;

    match components[..] {
        [r, g, b] => Some(Vector3::new(r, g, b)),
        _ => None,
    }
}

/// Parses a color override given as `r g b` (or comma separated), `#rrggbb` or
/// `rgb(r, g, b)` with 0-255 channels. The default sentinel leaves it unset.
pub fn parse_color_override(value: &str) -> Result<Option<Vector3<f32>>> {
    let trimmed = value.trim();
    if is_default_sentinel(trimmed) {
        return Ok(None);
    }

    let color = if let Some(hex) = trimmed.strip_prefix('#') {
        parse_hex_color(hex)
    } else if let Some(channels) = trimmed
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        parse_rgb_color(channels)
    } else {
        parse_float_color(trimmed)
    };

    color
        .map(Some)
        .ok_or_else(|| invalid("color", value))
}

pub fn parse_reflectiveness_override(value: &str) -> Result<Option<f32>> {
    let trimmed = value.trim();
    if is_default_sentinel(trimmed) {
        return Ok(None);
    }

    match trimmed.parse::<f32>() {
        Ok(reflectiveness) if reflectiveness.is_finite() => Ok(Some(reflectiveness)),
        _ => Err(invalid("reflectiveness", value)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn from_value(value: serde_json::Value) -> Result<EmissionOptions> {
        EmissionOptions::from_json(value.to_string().as_bytes())
    }

    #[test]
    fn it_treats_the_sentinel_as_unset() {
        assert_eq!(parse_color_override("default").unwrap(), None);
        assert_eq!(parse_color_override(" DEFAULT ").unwrap(), None);
        assert_eq!(parse_color_override("").unwrap(), None);
        assert_eq!(parse_reflectiveness_override("default").unwrap(), None);
        assert_eq!(parse_reflectiveness_override("").unwrap(), None);
    }

    #[test]
    fn it_parses_float_colors() {
        let color = Some(Vector3::new(0.2, 0.3, 0.4));
        assert_eq!(parse_color_override("0.2 0.3 0.4").unwrap(), color);
        assert_eq!(parse_color_override("0.2,0.3,0.4").unwrap(), color);
        assert_eq!(parse_color_override("0.2, 0.3, 0.4").unwrap(), color);
    }

    #[test]
    fn it_parses_hex_and_rgb_colors() {
        assert_eq!(
            parse_color_override("#ff0000").unwrap(),
            Some(Vector3::new(1.0, 0.0, 0.0))
        );
        assert_eq!(
            parse_color_override("#00FF00").unwrap(),
            Some(Vector3::new(0.0, 1.0, 0.0))
        );
        assert_eq!(
            parse_color_override("rgb(0, 0, 255)").unwrap(),
            Some(Vector3::new(0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn it_rejects_malformed_colors() {
        for value in &[
            "0.2 0.3",
            "0.2 0.3 0.4 0.5",
            "red",
            "0.2 x 0.4",
            "#ff00",
            "#gg0000",
            "rgb(0, 0)",
            "rgb(256, 0, 0)",
            "rgb(0, 0, 0",
            "inf 0 0",
        ] {
            match parse_color_override(value) {
                Err(Error::InvalidOverrideValue { option, .. }) => assert_eq!(option, "color"),
                other => panic!("expected {} to be rejected, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn it_parses_reflectiveness() {
        assert_eq!(parse_reflectiveness_override("0.75").unwrap(), Some(0.75));
        assert_eq!(parse_reflectiveness_override(" 1 ").unwrap(), Some(1.0));
        assert!(parse_reflectiveness_override("shiny").is_err());
        assert!(parse_reflectiveness_override("NaN").is_err());
    }

    #[test]
    fn it_deserializes_defaults() {
        assert_eq!(from_value(json!({})).unwrap(), EmissionOptions::default());
        assert_eq!(
            from_value(json!({ "color": null, "reflectiveness": null })).unwrap(),
            EmissionOptions::default()
        );
    }

    #[test]
    fn it_deserializes_with_parameters() {
        assert_eq!(
            from_value(json!({
                "color": [0.2, 0.3, 0.4],
                "reflectiveness": 0.75,
                "variant": "legacy"
            }))
            .unwrap(),
            EmissionOptions {
                color_override: Some(Vector3::new(0.2, 0.3, 0.4)),
                reflectiveness: Some(0.75),
                variant: ShadingVariant::Legacy,
            }
        );
    }

    #[test]
    fn it_rejects_unknown_config_fields() {
        assert!(matches!(
            from_value(json!({ "colour": [1, 0, 0] })),
            Err(Error::Config(_))
        ));
    }
}
