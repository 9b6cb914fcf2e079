use crate::{
    codec::{decode::decode_video, model::VideoModel},
    foundation::{core::DisplayTransform, error::PanecastResult},
    host::{
        audio::AudioSink,
        events::HostEvents,
        resources::{ResourceId, ResourceProvider},
    },
    playback::clock::{Clock, SystemClock},
    player::{
        compositor::{Compositor, PlaybackReport},
        opts::PlayerOpts,
    },
    render::cpu::{CpuRasterizer, RasterStyle},
    surface::{
        host::SurfaceHost,
        pool::{SurfacePool, SurfacePoolOpts},
    },
};

/// A fully initialized player: resources loaded, video decoded, surfaces allocated.
///
/// Every startup failure happens in [`PlaybackSession::prepare`]; nothing is shown before it
/// succeeds.
pub struct PlaybackSession<H, E, C = SystemClock>
where
    H: SurfaceHost,
    E: HostEvents,
    C: Clock,
{
    compositor: Compositor<CpuRasterizer, H, E, C>,
    transform: DisplayTransform,
    audio_clip: Option<Vec<u8>>,
}

impl<H, E, C> PlaybackSession<H, E, C>
where
    H: SurfaceHost,
    E: HostEvents,
    C: Clock,
{
    #[tracing::instrument(skip_all, fields(capacity = opts.pool_capacity))]
    pub fn prepare<P: ResourceProvider + ?Sized>(
        opts: &PlayerOpts,
        resources: &P,
        host: H,
        events: E,
        clock: C,
    ) -> PanecastResult<Self> {
        opts.validate()?;

        let bytes = resources.load(ResourceId::Video)?;
        let video = decode_video(&bytes)?;
        let transform = DisplayTransform::fit(opts.screen, video.width, video.height)?;
        tracing::info!(
            width = video.width,
            height = video.height,
            fps = video.fps,
            frames = video.frame_count(),
            scale = transform.scale,
            "video loaded"
        );

        let audio_clip = if opts.audio {
            Some(resources.load(ResourceId::Audio)?)
        } else {
            None
        };

        let rasterizer =
            CpuRasterizer::new(transform.out_width, transform.out_height, RasterStyle::default())?;
        let pool = SurfacePool::new(
            host,
            SurfacePoolOpts {
                capacity: opts.pool_capacity,
                transform,
                video_width: video.width,
                video_height: video.height,
            },
        )?;
        let compositor =
            Compositor::new(video, rasterizer, pool, events, clock, opts.idle_sleep())?;

        Ok(Self {
            compositor,
            transform,
            audio_clip,
        })
    }

    /// Start the background track, run the loop to completion, then stop the track.
    ///
    /// The track is stopped on every exit path, including a failed run.
    pub fn run<A: AudioSink + ?Sized>(&mut self, audio: &mut A) -> PanecastResult<PlaybackReport> {
        if let Some(clip) = &self.audio_clip {
            audio.play(clip)?;
        }
        let result = self.compositor.run();
        audio.stop();
        result
    }

    pub fn video(&self) -> &VideoModel {
        self.compositor.video()
    }

    pub fn transform(&self) -> DisplayTransform {
        self.transform
    }

    pub fn compositor(&self) -> &Compositor<CpuRasterizer, H, E, C> {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor<CpuRasterizer, H, E, C> {
        &mut self.compositor
    }
}

/// Prepare and run a session against the system clock.
pub fn play<P, H, E, A>(
    opts: &PlayerOpts,
    resources: &P,
    host: H,
    events: E,
    audio: &mut A,
) -> PanecastResult<PlaybackReport>
where
    P: ResourceProvider + ?Sized,
    H: SurfaceHost,
    E: HostEvents,
    A: AudioSink + ?Sized,
{
    PlaybackSession::prepare(opts, resources, host, events, SystemClock)?.run(audio)
}

#[cfg(test)]
#[path = "../../tests/unit/player/session.rs"]
mod tests;
