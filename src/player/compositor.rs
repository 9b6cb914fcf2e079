use std::time::Duration;

use crate::{
    codec::model::VideoModel,
    foundation::{
        core::FrameIndex,
        error::{PanecastError, PanecastResult},
    },
    host::events::{HostEvents, HostSignal},
    playback::{
        clock::Clock,
        scheduler::{PlaybackScheduler, PlaybackSignal},
    },
    render::raster::{VectorRasterizer, draw_frame},
    surface::{
        host::SurfaceHost,
        pool::{PoolStats, PoolUpdate, SurfacePool},
    },
};

/// Result of one [`Compositor::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The host asked to stop.
    Quit,
    /// The current frame is still on screen; the loop slept.
    Idle,
    /// A new frame was drawn and the pool updated.
    Rendered {
        index: FrameIndex,
        fills: usize,
        update: PoolUpdate,
    },
    /// The last frame's time has passed.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    Finished,
    Quit,
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackReport {
    pub exit: ExitReason,
    pub frames_rendered: u64,
    pub frames_dropped: u64,
    pub idle_ticks: u64,
    pub last_frame: Option<u64>,
    pub overlay_fills: u64,
    pub refresh_failures: u64,
    /// Playback clock time from the first frame to exit.
    pub elapsed_secs: f64,
    pub pool: PoolStats,
}

/// The playback loop: host events, frame selection, the exact overlay, then the surface pool.
///
/// Within one rendered tick the order is fixed: the overlay is drawn, the loop waits for the
/// display refresh, and only then is the surface batch applied, so surface moves land on the
/// same refresh as the overlay.
pub struct Compositor<R, H, E, C>
where
    R: VectorRasterizer,
    H: SurfaceHost,
    E: HostEvents,
    C: Clock,
{
    video: VideoModel,
    rasterizer: R,
    pool: SurfacePool<H>,
    events: E,
    clock: C,
    scheduler: PlaybackScheduler,
    idle_sleep: Duration,
    frames_rendered: u64,
    idle_ticks: u64,
    overlay_fills: u64,
    refresh_failures: u64,
}

impl<R, H, E, C> Compositor<R, H, E, C>
where
    R: VectorRasterizer,
    H: SurfaceHost,
    E: HostEvents,
    C: Clock,
{
    pub fn new(
        video: VideoModel,
        rasterizer: R,
        pool: SurfacePool<H>,
        events: E,
        clock: C,
        idle_sleep: Duration,
    ) -> PanecastResult<Self> {
        if video.fps == 0 && !video.frames.is_empty() {
            return Err(PanecastError::validation(
                "video declares fps 0 but has frames",
            ));
        }
        let scheduler = PlaybackScheduler::new(video.fps, video.frame_count());
        Ok(Self {
            video,
            rasterizer,
            pool,
            events,
            clock,
            scheduler,
            idle_sleep,
            frames_rendered: 0,
            idle_ticks: 0,
            overlay_fills: 0,
            refresh_failures: 0,
        })
    }

    /// Run one iteration of the loop.
    ///
    /// Only rasterizer failures are returned as errors; a refused surface batch or a failed
    /// refresh wait is logged and playback continues.
    pub fn tick(&mut self) -> PanecastResult<TickOutcome> {
        let now = self.clock.now();
        if self.events.drain(now) == HostSignal::Quit {
            return Ok(TickOutcome::Quit);
        }

        let index = match self.scheduler.tick(now) {
            PlaybackSignal::Finished => return Ok(TickOutcome::Finished),
            PlaybackSignal::Idle => {
                self.idle_ticks += 1;
                self.clock.sleep(self.idle_sleep);
                return Ok(TickOutcome::Idle);
            }
            PlaybackSignal::Advance(index) => index,
        };

        let frame = self.video.frame(index).ok_or_else(|| {
            PanecastError::validation(format!("frame {} out of range", index.0))
        })?;
        let scale = self.pool.opts().transform.scale;
        let fills = draw_frame(
            &mut self.rasterizer,
            frame,
            self.video.width,
            self.video.height,
            scale,
        )?;

        if let Err(err) = self.pool.wait_for_refresh() {
            self.refresh_failures += 1;
            tracing::warn!(frame = index.0, error = %err, "refresh wait failed");
        }
        let update = self.pool.update(frame);

        self.frames_rendered += 1;
        self.overlay_fills += fills as u64;
        if update.overflow > 0 {
            tracing::trace!(
                frame = index.0,
                overflow = update.overflow,
                "rectangles beyond pool capacity"
            );
        }

        Ok(TickOutcome::Rendered {
            index,
            fills,
            update,
        })
    }

    /// Tick until the video finishes or the host quits.
    #[tracing::instrument(skip(self), fields(frames = self.video.frame_count(), fps = self.video.fps))]
    pub fn run(&mut self) -> PanecastResult<PlaybackReport> {
        let exit = loop {
            match self.tick()? {
                TickOutcome::Quit => break ExitReason::Quit,
                TickOutcome::Finished => break ExitReason::Finished,
                TickOutcome::Idle | TickOutcome::Rendered { .. } => {}
            }
        };

        let report = self.report(exit);
        tracing::info!(
            exit = ?report.exit,
            rendered = report.frames_rendered,
            dropped = report.frames_dropped,
            failed_batches = report.pool.failed_batches,
            "playback stopped"
        );
        Ok(report)
    }

    pub fn report(&mut self, exit: ExitReason) -> PlaybackReport {
        let elapsed_secs = match self.scheduler.start() {
            Some(start) => self
                .clock
                .now()
                .saturating_duration_since(start)
                .as_secs_f64(),
            None => 0.0,
        };
        PlaybackReport {
            exit,
            frames_rendered: self.frames_rendered,
            frames_dropped: self.scheduler.dropped_frames(),
            idle_ticks: self.idle_ticks,
            last_frame: self.scheduler.last_shown().map(|i| i.0),
            overlay_fills: self.overlay_fills,
            refresh_failures: self.refresh_failures,
            elapsed_secs,
            pool: self.pool.stats(),
        }
    }

    pub fn video(&self) -> &VideoModel {
        &self.video
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn pool(&self) -> &SurfacePool<H> {
        &self.pool
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_parts(self) -> (R, SurfacePool<H>) {
        (self.rasterizer, self.pool)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/compositor.rs"]
mod tests;
