use crate::foundation::error::PanecastResult;

/// Background track playback.
///
/// Nothing is read back: audio and video each derive their timing from the same start instant,
/// so synchronization is open loop.
pub trait AudioSink {
    /// Start playing `clip` asynchronously.
    fn play(&mut self, clip: &[u8]) -> PanecastResult<()>;

    fn stop(&mut self);
}

impl<A: AudioSink + ?Sized> AudioSink for &mut A {
    fn play(&mut self, clip: &[u8]) -> PanecastResult<()> {
        (**self).play(clip)
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Accepts the track and discards it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio {
    playing: bool,
    plays: u64,
}

impl SilentAudio {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn plays(&self) -> u64 {
        self.plays
    }
}

impl AudioSink for SilentAudio {
    fn play(&mut self, clip: &[u8]) -> PanecastResult<()> {
        tracing::info!(bytes = clip.len(), "audio output disabled; track discarded");
        self.playing = true;
        self.plays += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/audio.rs"]
mod tests;
