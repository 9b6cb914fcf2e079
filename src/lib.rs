//! Panecast plays pre-encoded black-and-white animation through two layers at once:
//!
//! - an exact vector overlay that fills every rectangle and run of each frame
//! - a fixed pool of physical surfaces approximating the frame's large rectangles, moved with one
//!   batched transaction per frame and only where something changed
//!
//! The public API is session-oriented:
//!
//! - Decode frame data with [`decode_video`]
//! - Prepare a [`PlaybackSession`] against a [`SurfaceHost`] and [`ResourceProvider`]
//! - Run it, or drive a [`Compositor`] tick by tick
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod codec;
pub(crate) mod host;
pub(crate) mod playback;
pub(crate) mod player;
pub(crate) mod render;
pub(crate) mod surface;

pub use crate::foundation::core::{DisplayTransform, FrameIndex, Rect, ScreenMetrics};
pub use crate::foundation::error::{PanecastError, PanecastResult};

pub use crate::codec::decode::{HEADER_LEN, decode_video, probe_header};
pub use crate::codec::model::{Frame, RectRecord, RunRecord, VideoHeader, VideoModel, VideoStats};
pub use crate::host::audio::{AudioSink, SilentAudio};
pub use crate::host::events::{HostEvents, HostSignal, NoEvents, QuitAfter, QuitAt, QuitFlag};
pub use crate::host::headless::{
    BatchRecord, HeadlessBatch, HeadlessHost, HeadlessSurface, HeadlessSurfaceId,
};
pub use crate::host::resources::{
    DirResources, FileResources, MemoryResources, ResourceId, ResourceProvider,
};
pub use crate::playback::clock::{Clock, ManualClock, SystemClock};
pub use crate::playback::scheduler::{PlaybackScheduler, PlaybackSignal};
pub use crate::player::compositor::{Compositor, ExitReason, PlaybackReport, TickOutcome};
pub use crate::player::opts::{ENV_IDLE_SLEEP_MS, ENV_POOL_CAPACITY, PlayerOpts};
pub use crate::player::session::{PlaybackSession, play};
pub use crate::render::cpu::{CpuRasterizer, OverlayImage, RasterStyle};
pub use crate::render::raster::{VectorRasterizer, draw_frame};
pub use crate::surface::host::{Placement, PlacementOps, SurfaceGeometry, SurfaceHost};
pub use crate::surface::pool::{
    BatchOutcome, DEFAULT_POOL_CAPACITY, PoolStats, PoolUpdate, SurfacePool, SurfacePoolOpts,
};
pub use crate::surface::slot::{DirtyFlags, SlotState};
