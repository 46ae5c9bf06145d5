// crates/segmark-core/src/player.rs
//
// The narrow view the app has of whatever plays the video.
// All positions are milliseconds from the start of the media.

pub trait MediaPlayer {
    fn current_position(&self) -> u64;
    fn duration(&self) -> u64;
    /// Clamped to `[0, duration]` by the implementation.
    fn seek(&mut self, ms: u64);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;

    fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }
}
