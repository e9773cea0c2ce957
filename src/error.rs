use thiserror::Error;

#[derive(Error, Debug)]
pub enum RippleError {
    #[error("Attributes should be provided to this view")]
    MissingAttributes,
    #[error("rippleAmount must be greater than zero")]
    ZeroRippleAmount,
    #[error("Invalid ripple configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid value `{value}` for attribute `{name}`: {reason}")]
    InvalidAttribute {
        name: String,
        value: String,
        reason: String,
    },
    #[error("Malformed layout: {0}")]
    Layout(String),
    #[error("Failed to parse SVG: {0}")]
    Svg(String),
    #[error("Failed to allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RippleError>;

impl RippleError {
    pub(crate) fn invalid_attribute(
        name: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        RippleError::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
