use std::time::Duration;

use crate::attributes::{AttributeSet, DisplayMetrics};
use crate::error::{Result, RippleError};
use crate::widgets::Color;

pub const DEFAULT_RIPPLE_COUNT: u32 = 6;
pub const DEFAULT_DURATION_MS: u64 = 3000;
pub const DEFAULT_SCALE: f32 = 6.0;
pub const DEFAULT_COLOR: Color = Color::RED;
pub const DEFAULT_STROKE_WIDTH_DP: f32 = 2.0;
pub const DEFAULT_RADIUS_DP: f32 = 64.0;

/// Attribute names understood by [`RippleConfig::from_attributes`].
pub const KNOWN_ATTRIBUTES: [&str; 7] = [
    "color",
    "strokeWidth",
    "radius",
    "duration",
    "rippleAmount",
    "scale",
    "type",
];

/// Whether circles are painted as solid discs or as rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillType {
    #[default]
    Fill,
    Stroke,
}

impl FillType {
    /// Layout encoding: `0` is a filled disc, anything else a stroked ring.
    pub fn from_attribute(value: i64) -> Self {
        if value == 0 {
            FillType::Fill
        } else {
            FillType::Stroke
        }
    }
}

/// Construction-time configuration of a ripple view.
///
/// Dimensions are in pixels; use [`RippleConfig::from_attributes`] to
/// resolve `dp` values from a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RippleConfig {
    pub color: Color,
    /// Ring thickness. Ignored for [`FillType::Fill`].
    pub stroke_width: f32,
    /// Base circle radius before scaling
    pub radius: f32,
    /// Length of one grow-and-fade cycle
    pub duration: Duration,
    /// Number of concentric circles
    pub ripple_amount: u32,
    /// Scale reached by each circle at the end of its cycle
    pub scale: f32,
    pub fill_type: FillType,
}

impl RippleConfig {
    /// Default configuration with dimensions resolved for `metrics`.
    pub fn new(metrics: &DisplayMetrics) -> Self {
        Self {
            color: DEFAULT_COLOR,
            stroke_width: metrics.dp(DEFAULT_STROKE_WIDTH_DP),
            radius: metrics.dp(DEFAULT_RADIUS_DP),
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
            ripple_amount: DEFAULT_RIPPLE_COUNT,
            scale: DEFAULT_SCALE,
            fill_type: FillType::Fill,
        }
    }

    /// Read a configuration from layout attributes, falling back to the
    /// defaults for anything not given.
    pub fn from_attributes(attrs: &AttributeSet, metrics: &DisplayMetrics) -> Result<Self> {
        for name in attrs.names() {
            if !KNOWN_ATTRIBUTES.iter().any(|known| *known == name) {
                log::warn!("Ignoring unknown ripple attribute `{}`", name);
            }
        }

        let defaults = Self::new(metrics);

        let duration_ms = attrs.get_int("duration", DEFAULT_DURATION_MS as i64)?;
        let duration_ms = u64::try_from(duration_ms).map_err(|_| {
            RippleError::invalid_attribute("duration", &duration_ms.to_string(), "must not be negative")
        })?;

        let amount = attrs.get_int("rippleAmount", i64::from(DEFAULT_RIPPLE_COUNT))?;
        let ripple_amount = u32::try_from(amount).map_err(|_| {
            RippleError::invalid_attribute("rippleAmount", &amount.to_string(), "out of range")
        })?;

        Ok(Self {
            color: attrs.get_color("color", defaults.color)?,
            stroke_width: attrs.get_dimension("strokeWidth", defaults.stroke_width, metrics)?,
            radius: attrs.get_dimension("radius", defaults.radius, metrics)?,
            duration: Duration::from_millis(duration_ms),
            ripple_amount,
            scale: attrs.get_float("scale", defaults.scale)?,
            fill_type: FillType::from_attribute(attrs.get_int("type", 0)?),
        })
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn ripple_amount(mut self, amount: u32) -> Self {
        self.ripple_amount = amount;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn fill_type(mut self, fill_type: FillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    /// Check the values a ripple view cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.ripple_amount == 0 {
            return Err(RippleError::ZeroRippleAmount);
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(RippleError::InvalidConfig(format!(
                "radius must be a non-negative number, got {}",
                self.radius
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(RippleError::InvalidConfig(format!(
                "stroke width must be a non-negative number, got {}",
                self.stroke_width
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RippleError::InvalidConfig(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if self.duration.is_zero() {
            return Err(RippleError::InvalidConfig(
                "duration must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Offset between the start of consecutive circles.
    pub fn stagger_delay(&self) -> Duration {
        if self.ripple_amount == 0 {
            return Duration::ZERO;
        }
        self.duration / self.ripple_amount
    }

    /// Stroke width actually used for drawing; filled discs have none.
    pub fn effective_stroke_width(&self) -> f32 {
        match self.fill_type {
            FillType::Fill => 0.0,
            FillType::Stroke => self.stroke_width,
        }
    }

    /// Side length of each circle's square bounds.
    pub fn circle_extent(&self) -> f32 {
        2.0 * (self.radius + self.effective_stroke_width())
    }
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self::new(&DisplayMetrics::default())
    }
}
