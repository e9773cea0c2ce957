use std::path::PathBuf;
use std::time::Duration;

use ripple_view::prelude::*;

const LAYOUT: &str = r##"
    app:rb_color="#3F51B5"
    app:rb_radius="32dp"
    app:rb_rippleAmount="4"
    app:rb_duration="2400"
    app:rb_scale="5"
    app:rb_type="0"
"##;

const PHONE_ICON: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
    <path fill="#FFFFFF" d="M6.6 10.8c1.4 2.8 3.8 5.1 6.6 6.6l2.2-2.2c.3-.3.7-.4 1-.2 1.1.4 2.3.6 3.6.6.6 0 1 .4 1 1V20c0 .6-.4 1-1 1C10.6 21 3 13.4 3 4c0-.6.4-1 1-1h3.5c.6 0 1 .4 1 1 0 1.3.2 2.5.6 3.6.1.3 0 .7-.2 1L6.6 10.8z"/>
</svg>"##;

fn main() -> Result<()> {
    env_logger::init();

    let screen = ScreenConfig {
        width: 480,
        height: 480,
        background_color: Color::rgb(0.08, 0.08, 0.12),
        metrics: DisplayMetrics::new(1.5),
    };

    let attrs = AttributeSet::parse(LAYOUT)?;
    let ripple = RippleView::from_attributes(Some(&attrs), &screen.metrics)?.child(
        container()
            .width(64.0)
            .height(64.0)
            .background(Color::from_hex(0x3F51B5))
            .corner_radius(32.0)
            .child(icon(PHONE_ICON)?.width(36.0)),
    );

    let out_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/ripple_frames");
    std::fs::create_dir_all(&out_dir)?;

    // 30 fps for one full cycle
    let frame_interval = Duration::from_millis(33);
    let frames = 73;

    let mut host = HostScreen::with_view(ripple, screen)?;
    host.run(frames, frame_interval, |index, frame| {
        frame.save_png(out_dir.join(format!("frame_{:03}.png", index)))
    })?;

    log::info!("Wrote {} frames to {}", frames, out_dir.display());
    Ok(())
}
