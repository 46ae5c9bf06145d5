// crates/segmark-media/src/probe.rs
//
// In-process FFmpeg probing. Only the container duration is needed: the
// timeline maps milliseconds, it never decodes frames.

use std::path::Path;
use anyhow::{bail, Context};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::input;
use ffmpeg::media::Type;

/// Media duration in whole milliseconds.
///
/// Reads the container duration first and falls back to the best video (or
/// audio) stream's duration when the container does not carry one.
pub fn probe_duration_ms(path: &Path) -> anyhow::Result<u64> {
    let path_buf = path.to_path_buf();
    let ctx = input(&path_buf)
        .with_context(|| format!("cannot open {}", path.display()))?;

    let dur = ctx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
    if dur > 0.0 {
        log::info!("[media] duration {dur:.3}s <- {}", path.display());
        return Ok(seconds_to_ms(dur));
    }

    // Fall back to stream duration
    if let Some(stream) = ctx.streams().best(Type::Video)
        .or_else(|| ctx.streams().best(Type::Audio))
    {
        let tb = stream.time_base();
        let d  = stream.duration() as f64 * tb.numerator() as f64
            / tb.denominator() as f64;
        if d > 0.0 {
            log::info!("[media] stream duration {d:.3}s <- {}", path.display());
            return Ok(seconds_to_ms(d));
        }
    }

    log::warn!("[media] duration unknown for {}", path.display());
    bail!("duration unknown for {}", path.display())
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_to_nearest_ms() {
        assert_eq!(seconds_to_ms(12.3456), 12_346);
        assert_eq!(seconds_to_ms(0.0), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        crate::init().unwrap();
        assert!(probe_duration_ms(Path::new("/definitely/not/here.mp4")).is_err());
    }
}
