//! Directional Toggle Demo
//!
//! Drives a horizontal and a vertical toggle headlessly:
//! - taps and drags fed as pointer events
//! - animation advanced frame by frame
//! - change notifications delivered on the main cycle
//! - draw calls printed through a text painter
//!
//! Run with: RUST_LOG=directional_toggle=debug cargo run -p directional-toggle --example demo

use std::time::Duration;

use directional_toggle::{
    Color, DirectionalToggle, EventLoop, Painter, PointerEvent, Rect, RoundedRect, Size,
    ToggleConfig, ToggleOption,
};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

const VERTICAL_CONFIG: &str = r##"
orientation = "vertical"
value = "right"
options = [
    { label = "Left", value = "left" },
    { label = "Center", value = "center" },
    { label = "Right", value = "right" },
]

[style]
height = 20

[animation]
duration = 200
damping = 30
"##;

/// Painter that prints every draw call.
struct TextPainter;

fn hex(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a)
    )
}

impl Painter for TextPainter {
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        let r = rect.rect;
        println!(
            "  rect   ({:6.1}, {:6.1}) {:6.1} x {:6.1} r={:4.1} {}",
            r.left(),
            r.top(),
            r.width(),
            r.height(),
            rect.radius,
            hex(color)
        );
    }

    fn draw_text(&mut self, text: &str, bounds: Rect, font_size: f32, color: Color) {
        println!(
            "  text   ({:6.1}, {:6.1}) {:>8} {}pt {}",
            bounds.left(),
            bounds.top(),
            text,
            font_size,
            hex(color)
        );
    }
}

fn run_frames(name: &str, toggle: &mut DirectionalToggle) {
    let mut frames = 0;
    while toggle.tick(FRAME) {
        frames += 1;
    }
    println!("{name}: settled at offset {:.1} after {frames} frames", toggle.offset());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let main_loop = EventLoop::new();

    // Horizontal toggle built in code.
    let mut horizontal = DirectionalToggle::new(vec![
        ToggleOption::text("Day"),
        ToggleOption::text("Week"),
        ToggleOption::text("Month"),
    ])
    .with_value("Week");
    horizontal.on_change(|value| println!("horizontal changed to {value}"));
    horizontal.resize(Size::new(240.0, horizontal.size_hint().height));

    println!("horizontal initial:");
    horizontal.paint(&mut TextPainter);

    // Tap "Month".
    horizontal.handle_pointer(&PointerEvent::started(200.0, 18.0));
    horizontal.handle_pointer(&PointerEvent::ended(201.0, 18.0));
    run_frames("horizontal tap", &mut horizontal);
    main_loop.process_pending();

    // Drag back most of the way to "Day".
    horizontal.handle_pointer(&PointerEvent::started(200.0, 18.0));
    horizontal.handle_pointer(&PointerEvent::moved(150.0, 20.0));
    horizontal.handle_pointer(&PointerEvent::moved(70.0, 22.0));
    println!("horizontal mid-drag:");
    horizontal.paint(&mut TextPainter);
    horizontal.handle_pointer(&PointerEvent::ended(70.0, 22.0));
    run_frames("horizontal drag", &mut horizontal);
    main_loop.process_pending();

    // Vertical toggle loaded from configuration.
    let config = ToggleConfig::from_toml_str(VERTICAL_CONFIG)?;
    let mut vertical = DirectionalToggle::from_config(config);
    vertical.on_change(|value| println!("vertical changed to {value}"));
    vertical.resize(vertical.size_hint());

    println!("vertical initial:");
    vertical.paint(&mut TextPainter);

    vertical.press(0);
    run_frames("vertical tap", &mut vertical);
    main_loop.process_pending();

    println!("vertical final:");
    vertical.paint(&mut TextPainter);

    Ok(())
}
