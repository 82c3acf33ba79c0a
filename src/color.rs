//! # Color Utilities
//!
//! Designs carry colors as strings (`#RRGGBB`, `rgb(...)`, `rgba(...)`,
//! a few keywords). Two directions are needed:
//!
//! - [`to_hex`] normalizes any accepted form to `#rrggbb` for color inputs
//!   that only understand hex.
//! - [`parse`] resolves a string to an [`Rgba`] value for painting.
//!
//! ```
//! use signboard::color::{parse, to_hex};
//!
//! assert_eq!(to_hex(Some("rgb(255, 195, 0)")), "#ffc300");
//! assert_eq!(to_hex(Some("#C41E3A")), "#c41e3a");
//! assert_eq!(parse("rgba(0,0,0,0.5)").unwrap().a, 0.5);
//! ```

use serde::Serialize;

/// Fallback for anything that cannot be read as a color.
pub const FALLBACK_HEX: &str = "#000000";

/// An 8-bit RGB color with a floating point alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Canonical `#rrggbb` form (alpha is dropped).
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Same color with its alpha multiplied by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

/// Normalize a color string to `#rrggbb`.
///
/// Unreadable input maps to [`FALLBACK_HEX`] rather than failing, so a
/// color control always has a value to show.
pub fn to_hex(color: Option<&str>) -> String {
    let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) else {
        return FALLBACK_HEX.to_string();
    };

    if let Some(digits) = color.strip_prefix('#') {
        return parse_hex_digits(digits)
            .map(|c| c.hex())
            .unwrap_or_else(|| FALLBACK_HEX.to_string());
    }

    if color.len() == 6 {
        if let Some(c) = parse_hex_digits(color) {
            return c.hex();
        }
    }

    let numbers = numeric_components(color);
    if numbers.len() < 3 {
        return FALLBACK_HEX.to_string();
    }
    Rgba::opaque(
        channel(numbers[0]),
        channel(numbers[1]),
        channel(numbers[2]),
    )
    .hex()
}

/// Resolve a color string for painting.
///
/// Accepts `#rgb`, `#rrggbb`, bare `rrggbb`, `rgb(r,g,b)`,
/// `rgba(r,g,b,a)` and the keywords `white`, `black` and `transparent`.
pub fn parse(color: &str) -> Option<Rgba> {
    let color = color.trim();
    if let Some(digits) = color.strip_prefix('#') {
        return parse_hex_digits(digits);
    }

    match color.to_ascii_lowercase().as_str() {
        "white" => return Some(Rgba::WHITE),
        "black" => return Some(Rgba::BLACK),
        "transparent" => return Some(Rgba::TRANSPARENT),
        _ => {}
    }

    if color.len() == 6 {
        if let Some(c) = parse_hex_digits(color) {
            return Some(c);
        }
    }

    let lower = color.to_ascii_lowercase();
    if !(lower.starts_with("rgb(") || lower.starts_with("rgba(")) {
        return None;
    }

    let numbers = numeric_components(color);
    if numbers.len() < 3 {
        return None;
    }
    let a = numbers.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);
    Some(Rgba {
        r: channel(numbers[0]),
        g: channel(numbers[1]),
        b: channel(numbers[2]),
        a,
    })
}

/// Like [`parse`], but unreadable colors paint as `fallback`.
pub fn parse_or(color: &str, fallback: Rgba) -> Rgba {
    parse(color).unwrap_or(fallback)
}

fn parse_hex_digits(digits: &str) -> Option<Rgba> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(Rgba::opaque(out[0], out[1], out[2]))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some(Rgba::opaque(r, g, b))
        }
        _ => None,
    }
}

/// Pull the numbers out of a functional color like `rgba(10, 20, 30, 0.5)`.
fn numeric_components(color: &str) -> Vec<f32> {
    color
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<f32>().ok())
        .collect()
}

fn channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
