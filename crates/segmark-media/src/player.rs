// crates/segmark-media/src/player.rs
//
// ClockPlayer: a wall-clock playhead. The app calls advance() once per UI
// frame with the frame's dt; while playing, the position moves forward in
// real time and stops (paused) at the end of the media.
//
// Position is kept as f64 ms so sub-millisecond frame times accumulate
// instead of being truncated away every frame.

use segmark_core::player::MediaPlayer;

#[derive(Debug, Clone, Default)]
pub struct ClockPlayer {
    position_ms: f64,
    duration_ms: u64,
    playing:     bool,
}

impl ClockPlayer {
    pub fn new(duration_ms: u64) -> Self {
        Self { position_ms: 0.0, duration_ms, playing: false }
    }

    /// Swap in new media: rewinds and pauses.
    pub fn load(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.position_ms = 0.0;
        self.playing     = false;
    }

    /// Move the playhead by `dt` seconds of wall time.
    ///
    /// Returns the new whole-ms position when it changed, which is the
    /// position-changed notification the session listens for.
    pub fn advance(&mut self, dt: f64) -> Option<u64> {
        if !self.playing || !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        let before = self.current_position();
        let end    = self.duration_ms as f64;
        self.position_ms = (self.position_ms + dt * 1000.0).min(end);
        if self.position_ms >= end {
            self.playing = false;
            log::debug!("[player] reached end at {} ms", self.duration_ms);
        }
        let after = self.current_position();
        (after != before).then_some(after)
    }
}

impl MediaPlayer for ClockPlayer {
    fn current_position(&self) -> u64 {
        self.position_ms as u64
    }

    fn duration(&self) -> u64 {
        self.duration_ms
    }

    fn seek(&mut self, ms: u64) {
        self.position_ms = ms.min(self.duration_ms) as f64;
    }

    fn play(&mut self) {
        if self.duration_ms == 0 {
            return;
        }
        // Restart from the top when parked at the end.
        if self.current_position() >= self.duration_ms {
            self.position_ms = 0.0;
        }
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_player_does_not_move() {
        let mut p = ClockPlayer::new(10_000);
        assert_eq!(p.advance(0.5), None);
        assert_eq!(p.current_position(), 0);
    }

    #[test]
    fn advances_in_real_time() {
        let mut p = ClockPlayer::new(10_000);
        p.play();
        assert_eq!(p.advance(0.25), Some(250));
        assert_eq!(p.advance(0.25), Some(500));
        assert_eq!(p.advance(0.0), None);
    }

    #[test]
    fn small_steps_accumulate() {
        let mut p = ClockPlayer::new(10_000);
        p.play();
        assert_eq!(p.advance(0.0004), None);
        assert_eq!(p.advance(0.0004), None);
        assert_eq!(p.advance(0.0004), Some(1));
    }

    #[test]
    fn stops_at_end() {
        let mut p = ClockPlayer::new(1_000);
        p.play();
        assert_eq!(p.advance(5.0), Some(1_000));
        assert!(!p.is_playing());
        p.play();
        assert_eq!(p.current_position(), 0);
    }

    #[test]
    fn seek_clamps_and_toggle_flips() {
        let mut p = ClockPlayer::new(1_000);
        p.seek(5_000);
        assert_eq!(p.current_position(), 1_000);
        p.seek(300);
        p.toggle();
        assert!(p.is_playing());
        assert_eq!(p.current_position(), 300);
        p.toggle();
        assert!(!p.is_playing());
    }

    #[test]
    fn empty_media_never_plays() {
        let mut p = ClockPlayer::default();
        p.play();
        assert!(!p.is_playing());
    }
}
