//! Drives a seekbar through scripted gestures and animations and prints
//! each frame as text.
//!
//! Run with `RUST_LOG=seekbar_ranged=trace` to see the gesture tracking.
//! Pass a png or jpeg path to use it as the thumb image.

mod surface;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use seekbar_ranged::{
    Bound, DimensionValue, Pointer, PointerEvent, SeekBarConfig, SeekBarError, SeekBarRanged,
    Thumb, ThumbImage,
};
use tracing::info;

use crate::surface::AsciiSurface;

const COLUMN_WIDTH: f32 = 6.0;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("info,seekbar_ranged=debug") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("info"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Default)]
struct Log {
    changed: Vec<(f32, f32)>,
    changing: usize,
}

fn frame(seekbar: &mut SeekBarRanged, label: &str) {
    let (width, height) = seekbar.size();
    let mut surface = AsciiSurface::new(width, height, COLUMN_WIDTH);
    seekbar.draw(&mut surface);
    println!(
        "{:<28} |{}| {:>6.1} .. {:<6.1}",
        label,
        surface.render(),
        seekbar.selected_min_value(),
        seekbar.selected_max_value()
    );
}

fn drag(seekbar: &mut SeekBarRanged, thumb: Thumb, to: f32) {
    let from = seekbar.thumb_x(thumb);
    seekbar.handle_event(&PointerEvent::down(0, from));
    let steps = 4;
    for i in 1..=steps {
        let x = from + (to - from) * i as f32 / steps as f32;
        seekbar.handle_event(&PointerEvent::moved(0, x));
    }
    seekbar.handle_event(&PointerEvent::up(0, to));
}

fn run() -> Result<(), SeekBarError> {
    let mut config = SeekBarConfig::default()
        .min(0.0)
        .max(100.0)
        .current_min(20.0)
        .current_max(80.0)
        .rounded(true);
    if let Some(path) = std::env::args().nth(1) {
        info!(%path, "loading thumb image");
        config = config.thumb_normal_image(ThumbImage::open(path)?);
    }

    let mut seekbar = SeekBarRanged::new(config)?;
    let log = Arc::new(Mutex::new(Log::default()));
    let (changed, changing) = (Arc::clone(&log), Arc::clone(&log));
    seekbar.set_listener(
        move |min, max| changed.lock().changed.push((min, max)),
        move |_, _| changing.lock().changing += 1,
    );

    let (width, height) = seekbar.measure(
        DimensionValue::Fill { max: Some(420.0) },
        DimensionValue::WRAP,
    );
    seekbar.set_size(width, height);
    info!(width, height, "measured");
    frame(&mut seekbar, "initial");

    let target = seekbar.thumb_x(Thumb::Min) + 60.0;
    drag(&mut seekbar, Thumb::Min, target);
    frame(&mut seekbar, "drag min right");

    drag(&mut seekbar, Thumb::Max, 0.0);
    frame(&mut seekbar, "drag max past min");

    // Two fingers: the second one takes over the held thumb.
    let max_x = seekbar.thumb_x(Thumb::Max);
    seekbar.handle_event(&PointerEvent::down(0, max_x));
    seekbar.handle_event(&PointerEvent::moved(0, max_x + 30.0));
    seekbar.handle_event(&PointerEvent::pointer_down(
        1,
        [
            Pointer::new(0, max_x + 30.0, 0.0),
            Pointer::new(1, width - 40.0, 0.0),
        ],
    ));
    seekbar.handle_event(&PointerEvent::new(
        seekbar_ranged::PointerAction::Move,
        0,
        [
            Pointer::new(0, max_x + 30.0, 0.0),
            Pointer::new(1, width - 20.0, 0.0),
        ],
    ));
    seekbar.handle_event(&PointerEvent::up(1, width - 20.0));
    frame(&mut seekbar, "second finger");

    let start = Instant::now();
    seekbar.animate_selected(Bound::Min, 10.0, Duration::from_millis(600), start);
    seekbar.animate_selected(Bound::Max, 50.0, Duration::from_millis(300), start);
    let mut elapsed = Duration::ZERO;
    while seekbar.is_animating() {
        elapsed += Duration::from_millis(150);
        seekbar.tick(start + elapsed);
        frame(&mut seekbar, &format!("animate +{}ms", elapsed.as_millis()));
    }

    seekbar.enable_progress_by_steps(true);
    seekbar.set_progress_steps(&[25.0, 50.0, 75.0]);
    frame(&mut seekbar, "steps");
    let target = seekbar.thumb_x(Thumb::Max) + 70.0;
    drag(&mut seekbar, Thumb::Max, target);
    frame(&mut seekbar, "drag max with steps");
    if !seekbar.set_max_value(1000.0) {
        info!("domain is locked while steps are enabled");
    }

    let state = seekbar.save_state(None);
    let mut restored = SeekBarRanged::default();
    restored.set_size(width, height);
    restored.restore_state(&state);
    frame(&mut restored, "restored copy");

    seekbar.cancel_animations();
    let log = log.lock();
    info!(
        changed = log.changed.len(),
        changing = log.changing,
        last = ?log.changed.last(),
        "listener summary"
    );
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        tracing::error!(%err, "example failed");
        std::process::exit(1);
    }
}
