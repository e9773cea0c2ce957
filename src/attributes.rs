//! Declarative attribute sets, as written in a layout file.
//!
//! A layout entry for a ripple view is a list of `name="value"` pairs:
//!
//! ```text
//! app:rb_color="#0099CC" app:rb_radius="32dp" app:rb_rippleAmount="4"
//! ```
//!
//! [`AttributeSet`] keeps the raw strings; typed accessors resolve them on
//! demand (dimensions against [`DisplayMetrics`]) and report
//! [`RippleError::InvalidAttribute`] for values that do not parse.

use std::collections::BTreeMap;

use crate::error::{Result, RippleError};
use crate::widgets::Color;

/// Screen density used to resolve density-independent dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Physical pixels per `dp`
    pub density: f32,
}

impl DisplayMetrics {
    pub fn new(density: f32) -> Self {
        Self { density }
    }

    pub fn dp(&self, value: f32) -> f32 {
        value * self.density
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

/// Raw attribute values keyed by their bare name (`radius`, `color`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    values: BTreeMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.values
            .insert(normalize_name(name.as_ref()).to_string(), value.into());
        self
    }

    /// Parse whitespace-separated `name=value` pairs. Values may be quoted.
    pub fn parse(src: &str) -> Result<Self> {
        let mut set = AttributeSet::new();
        let mut rest = src.trim_start();

        while !rest.is_empty() {
            let eq = rest
                .find('=')
                .ok_or_else(|| RippleError::Layout(format!("expected `name=value` in `{}`", rest)))?;
            let name = rest[..eq].trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(RippleError::Layout(format!(
                    "invalid attribute name `{}`",
                    name
                )));
            }

            let after = &rest[eq + 1..];
            let (value, remaining) = if let Some(quoted) = after.strip_prefix('"') {
                let close = quoted.find('"').ok_or_else(|| {
                    RippleError::Layout(format!("unterminated value for `{}`", name))
                })?;
                (&quoted[..close], &quoted[close + 1..])
            } else {
                let end = after.find(char::is_whitespace).unwrap_or(after.len());
                (&after[..end], &after[end..])
            };

            set = set.with(name, value);
            rest = remaining.trim_start();
        }

        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(normalize_name(name)).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_color(&self, name: &str, default: Color) -> Result<Color> {
        match self.get(name) {
            Some(value) => parse_color(value)
                .ok_or_else(|| RippleError::invalid_attribute(name, value, "expected a color")),
            None => Ok(default),
        }
    }

    /// Resolve a dimension to pixels. `default` is already in pixels.
    pub fn get_dimension(&self, name: &str, default: f32, metrics: &DisplayMetrics) -> Result<f32> {
        match self.get(name) {
            Some(value) => parse_dimension(value, metrics).ok_or_else(|| {
                RippleError::invalid_attribute(name, value, "expected a dimension such as `16dp`")
            }),
            None => Ok(default),
        }
    }

    pub fn get_int(&self, name: &str, default: i64) -> Result<i64> {
        match self.get(name) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| RippleError::invalid_attribute(name, value, "expected an integer")),
            None => Ok(default),
        }
    }

    pub fn get_float(&self, name: &str, default: f32) -> Result<f32> {
        match self.get(name) {
            Some(value) => value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RippleError::invalid_attribute(name, value, "expected a number")),
            None => Ok(default),
        }
    }
}

/// Strip the `app:` namespace and `rb_` prefix used in layout files.
fn normalize_name(name: &str) -> &str {
    let name = name.strip_prefix("app:").unwrap_or(name);
    name.strip_prefix("rb_").unwrap_or(name)
}

/// `#RGB`, `#RRGGBB`, `#AARRGGBB` or a handful of names.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let packed = u32::from_str_radix(hex, 16).ok()?;
        return match hex.len() {
            3 => {
                let r = (packed >> 8) & 0xF;
                let g = (packed >> 4) & 0xF;
                let b = packed & 0xF;
                Some(Color::from_hex(((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)))
            }
            6 => Some(Color::from_hex(packed)),
            8 => Some(Color::from_argb_hex(packed)),
            _ => None,
        };
    }

    match value.to_ascii_lowercase().as_str() {
        "red" => Some(Color::RED),
        "white" => Some(Color::WHITE),
        "black" => Some(Color::BLACK),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

/// `<n>dp`, `<n>sp`, `<n>px` or a bare number of pixels.
pub fn parse_dimension(value: &str, metrics: &DisplayMetrics) -> Option<f32> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("dp") {
        (n, metrics.density)
    } else if let Some(n) = value.strip_suffix("dip") {
        (n, metrics.density)
    } else if let Some(n) = value.strip_suffix("sp") {
        (n, metrics.density)
    } else if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else {
        (value, 1.0)
    };

    let parsed: f32 = number.trim().parse().ok()?;
    parsed.is_finite().then_some(parsed * scale)
}
