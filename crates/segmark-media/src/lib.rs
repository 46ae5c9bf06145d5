// crates/segmark-media/src/lib.rs
//
// Host-side media collaborators. No egui dependency.
//
//   probe   FFmpeg container probing (duration)
//   player  ClockPlayer, the MediaPlayer the app drives each frame

pub mod player;
pub mod probe;

pub use player::ClockPlayer;
pub use probe::probe_duration_ms;

use anyhow::Context;

/// Must run once before any probe call.
pub fn init() -> anyhow::Result<()> {
    ffmpeg_the_third::init().context("FFmpeg init failed")?;
    log::debug!("[media] ffmpeg initialised");
    Ok(())
}
