//! Headless Driver Demo
//!
//! Drives a handful of tweens at a fixed 60 Hz step and logs their values.
//! Pass a TOML file to load scheduler settings and presets from it.
//!
//! Run with: RUST_LOG=glide_animation=trace cargo run -p glide_animation --example headless_driver [config.toml]

use anyhow::{Context, Result};
use glide_animation::{Color, Easing, SchedulerConfig, TweenConfig, TweenScheduler, Vec2};

const FRAME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SchedulerConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => SchedulerConfig::default(),
    };
    let pulse = config
        .preset("pulse")
        .copied()
        .unwrap_or_else(|| TweenConfig::new(0.4).with_loops(2).with_ping_pong(true));

    let mut scheduler = TweenScheduler::with_config(config);

    scheduler
        .value(Vec2::ZERO, Vec2::new(320.0, 180.0), 1.0, |pos| {
            tracing::debug!(x = pos.x, y = pos.y, "slide");
        })
        .ease(Easing::EaseOutBack)
        .on_complete(|ctx| tracing::info!(id = ctx.id(), "slide finished"))
        .start()?;

    scheduler
        .value(Color::BLACK, Color::from_hex(0x3366ff), 0.4, |color| {
            tracing::debug!(r = color.r, g = color.g, b = color.b, "pulse");
        })
        .with_config(pulse)
        .on_loop_reset(|ctx| tracing::info!(pairs = ctx.ping_pong_count(), "pulse reversed"))
        .start()?;

    scheduler.exec_later(0.5, || tracing::info!("half a second in"))?;

    let mut frames = 0u32;
    while scheduler.tick(FRAME) {
        frames += 1;
    }
    tracing::info!(frames, pooled = scheduler.pooled_count(), "all tweens finished");
    Ok(())
}
