//! Color specification parsing

use thiserror::Error;

use crate::models::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidColorReason {
    #[error("expected three comma-separated channels")]
    Arity,
    #[error("channels must be integers between 0 and 255")]
    Channel,
    #[error("invalid hex color")]
    Hex,
    #[error("unknown color name")]
    UnknownName,
}

/// Error raised when a color specification cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{spec}`: {reason}")]
pub struct InvalidColor {
    spec: String,
    #[source]
    reason: InvalidColorReason,
}

impl InvalidColor {
    fn new(spec: &str, reason: InvalidColorReason) -> Self {
        Self {
            spec: spec.to_owned(),
            reason,
        }
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn reason(&self) -> InvalidColorReason {
        self.reason
    }
}

fn parse_triple(spec: &str) -> Result<Color, InvalidColorReason> {
    let channels: Vec<_> = spec.split(',').collect();
    if channels.len() != 3 {
        return Err(InvalidColorReason::Arity);
    }

    let mut rgb = [0u8; 3];
    for (dst, src) in rgb.iter_mut().zip(channels) {
        *dst = src
            .trim()
            .parse()
            .map_err(|_| InvalidColorReason::Channel)?;
    }

    Ok(Color::new(rgb[0], rgb[1], rgb[2]))
}

fn parse_hex(spec: &str) -> Result<Color, InvalidColorReason> {
    let digits = spec.strip_prefix('#').unwrap_or(spec);

    let mut rgb = [0u8; 3];
    match digits.len() {
        6 => hex::decode_to_slice(digits, &mut rgb).map_err(|_| InvalidColorReason::Hex)?,
        // #rgb shorthand, only with the leading marker
        3 if digits.len() != spec.len() => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            hex::decode_to_slice(doubled, &mut rgb).map_err(|_| InvalidColorReason::Hex)?
        }
        _ => return Err(InvalidColorReason::Hex),
    }

    Ok(Color::new(rgb[0], rgb[1], rgb[2]))
}

fn parse_name(spec: &str) -> Result<Color, InvalidColorReason> {
    palette::named::from_str(&spec.trim().to_ascii_lowercase())
        .ok_or(InvalidColorReason::UnknownName)
}

/// Resolve a color specification
///
/// Accepted forms, tried in this order:
///
/// * `R,G,B` literal, each channel in 0-255
/// * hex string: `#rrggbb`, `rrggbb` or `#rgb`
/// * CSS color name, such as `red` or `cornflowerblue`
pub fn resolve(spec: &str) -> Result<Color, InvalidColor> {
    let triple = parse_triple(spec);
    if let Ok(color) = triple {
        return Ok(color);
    }

    let hex = parse_hex(spec);
    if let Ok(color) = hex {
        return Ok(color);
    }

    parse_name(spec).map_err(|name| {
        let reason = if spec.contains(',') {
            triple.err().unwrap_or(name)
        } else if spec.starts_with('#') {
            hex.err().unwrap_or(name)
        } else {
            name
        };

        InvalidColor::new(spec, reason)
    })
}
