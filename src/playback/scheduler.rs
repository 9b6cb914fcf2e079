use std::time::Instant;

use crate::foundation::core::FrameIndex;

/// What the playback loop should do on this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// The target frame is already on screen; wait briefly and retry.
    Idle,
    /// Show this frame. Indices are strictly increasing across a run.
    Advance(FrameIndex),
    /// Elapsed time has passed the last frame. Terminal.
    Finished,
}

/// Wall-clock driven frame selection.
///
/// The target frame is `floor(elapsed * fps)` rather than "previous + 1", so a slow tick skips
/// frames instead of accumulating drift. The clock origin is the first call to [`Self::tick`].
#[derive(Clone, Debug)]
pub struct PlaybackScheduler {
    fps: u32,
    frame_count: u64,
    start: Option<Instant>,
    last_shown: Option<FrameIndex>,
    finished: bool,
    dropped_frames: u64,
}

impl PlaybackScheduler {
    pub fn new(fps: u32, frame_count: u64) -> Self {
        Self {
            fps,
            frame_count,
            start: None,
            last_shown: None,
            finished: false,
            dropped_frames: 0,
        }
    }

    pub fn tick(&mut self, now: Instant) -> PlaybackSignal {
        if self.finished {
            return PlaybackSignal::Finished;
        }

        let start = *self.start.get_or_insert(now);
        let target = self.target_index(now.saturating_duration_since(start).as_secs_f64());

        if target >= self.frame_count {
            self.finished = true;
            tracing::debug!(
                frames = self.frame_count,
                dropped = self.dropped_frames,
                "playback finished"
            );
            return PlaybackSignal::Finished;
        }

        let target = FrameIndex(target);
        match self.last_shown {
            Some(last) if last == target => PlaybackSignal::Idle,
            last => {
                let expected = last.map_or(0, |l| l.0 + 1);
                let skipped = target.0.saturating_sub(expected);
                if skipped > 0 {
                    tracing::trace!(target = target.0, skipped, "dropping frames");
                }
                self.dropped_frames += skipped;
                self.last_shown = Some(target);
                PlaybackSignal::Advance(target)
            }
        }
    }

    fn target_index(&self, elapsed_secs: f64) -> u64 {
        (elapsed_secs * f64::from(self.fps)).floor().max(0.0) as u64
    }

    pub fn last_shown(&self) -> Option<FrameIndex> {
        self.last_shown
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frames that were due but never shown because a later frame was already due.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    pub fn start(&self) -> Option<Instant> {
        self.start
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
