use std::path::PathBuf;
use std::time::{Duration, Instant};

use ripple_view::{HostScreen, ScreenConfig};

use crate::{Result, VisualTestError};

/// A ripple layout rendered at a fixed point of its animation.
#[derive(Clone)]
pub struct CaptureConfig {
    /// Attribute string the ripple view is inflated from
    pub layout: String,
    /// Screen the view is hosted in
    pub width: u32,
    pub height: u32,
    /// Time since the screen was created when the frame is taken
    pub elapsed: Duration,
    /// Destroy the screen before capturing
    pub stopped: bool,
    pub output_path: PathBuf,
}

/// Render one frame of the scenario and write it as PNG.
///
/// The clock is virtual, so the same scenario always produces the same
/// pixels.
pub fn capture_layout(config: &CaptureConfig) -> Result<()> {
    let screen = ScreenConfig {
        width: config.width,
        height: config.height,
        ..ScreenConfig::default()
    };
    let mut host = HostScreen::from_layout(&config.layout, screen).map_err(capture_error)?;

    let created = Instant::now();
    host.on_create(created);
    // Settle on the intermediate frame first so stopping happens mid-cycle
    host.frame(created + config.elapsed).map_err(capture_error)?;
    if config.stopped {
        host.on_destroy();
    }

    let frame = host
        .frame(created + config.elapsed)
        .map_err(capture_error)?;
    frame.save_png(&config.output_path).map_err(capture_error)?;
    Ok(())
}

fn capture_error(err: ripple_view::RippleError) -> VisualTestError {
    VisualTestError::Capture(err.to_string())
}
