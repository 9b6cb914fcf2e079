use crate::foundation::core::FrameIndex;

/// Axis-aligned rectangle covering a large contiguous black region, in video pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RectRecord {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl RectRecord {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Whether any part of the record lies outside `[0, width) x [0, height)`.
    pub fn is_out_of_bounds(self, width: u32, height: u32) -> bool {
        u32::from(self.x) + u32::from(self.w) > width
            || u32::from(self.y) + u32::from(self.h) > height
    }

    /// Intersection with `[0, width) x [0, height)`, or `None` when nothing remains.
    pub fn clamped(self, width: u32, height: u32) -> Option<Self> {
        let (x, w) = clamp_span(self.x, self.w, width)?;
        let (y, h) = clamp_span(self.y, self.h, height)?;
        Some(Self { x, y, w, h })
    }

    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.w),
            f64::from(self.y) + f64::from(self.h),
        )
    }
}

/// Horizontal one-pixel-tall span of black pixels, used only by the vector overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
    pub y: u16,
    pub x: u16,
    pub len: u16,
}

impl RunRecord {
    pub const fn new(y: u16, x: u16, len: u16) -> Self {
        Self { y, x, len }
    }

    pub fn is_out_of_bounds(self, width: u32, height: u32) -> bool {
        u32::from(self.x) + u32::from(self.len) > width || u32::from(self.y) >= height
    }

    pub fn clamped(self, width: u32, height: u32) -> Option<Self> {
        if u32::from(self.y) >= height {
            return None;
        }
        let (x, len) = clamp_span(self.x, self.len, width)?;
        Some(Self { y: self.y, x, len })
    }

    pub fn to_kurbo(self) -> kurbo::Rect {
        self.as_rect().to_kurbo()
    }

    fn as_rect(self) -> RectRecord {
        RectRecord::new(self.x, self.y, self.len, 1)
    }
}

fn clamp_span(start: u16, len: u16, limit: u32) -> Option<(u16, u16)> {
    let start32 = u32::from(start);
    if start32 >= limit || len == 0 {
        return None;
    }
    let end = (start32 + u32::from(len)).min(limit);
    // end > start32 and end <= start32 + len, so the difference fits in u16.
    Some((start, (end - start32) as u16))
}

/// One instant of the video: two independent sparse encodings of the same black-pixel mask.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Coarse regions, each intended to become one physical surface.
    pub big_rects: Vec<RectRecord>,
    /// Fine detail, drawn only by the exact vector overlay.
    pub runs: Vec<RunRecord>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.big_rects.is_empty() && self.runs.is_empty()
    }
}

/// Decoded video, immutable after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoModel {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Frames in presentation order.
    pub frames: Vec<Frame>,
}

/// The fixed-size prefix of an encoded video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoHeader {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub frame_count: u32,
}

/// Aggregate counts over a decoded video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct VideoStats {
    pub frame_count: u64,
    pub total_rects: u64,
    pub total_runs: u64,
    pub max_rects_per_frame: usize,
    pub max_runs_per_frame: usize,
    /// Frames whose rectangle count exceeds the surface pool capacity.
    pub frames_over_capacity: u64,
    /// Rectangles and runs that reach outside the declared video bounds.
    pub out_of_bounds_records: u64,
}

impl VideoModel {
    pub fn header(&self) -> VideoHeader {
        VideoHeader {
            width: self.width,
            height: self.height,
            fps: self.fps,
            frame_count: u32::try_from(self.frames.len()).unwrap_or(u32::MAX),
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    pub fn frame(&self, index: FrameIndex) -> Option<&Frame> {
        self.frames.get(index.as_usize())
    }

    /// Playback length in seconds; zero when `fps` is zero.
    pub fn duration_secs(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / f64::from(self.fps)
    }

    pub fn stats(&self, pool_capacity: usize) -> VideoStats {
        let mut stats = VideoStats {
            frame_count: self.frame_count(),
            ..VideoStats::default()
        };
        for frame in &self.frames {
            stats.total_rects += frame.big_rects.len() as u64;
            stats.total_runs += frame.runs.len() as u64;
            stats.max_rects_per_frame = stats.max_rects_per_frame.max(frame.big_rects.len());
            stats.max_runs_per_frame = stats.max_runs_per_frame.max(frame.runs.len());
            if frame.big_rects.len() > pool_capacity {
                stats.frames_over_capacity += 1;
            }
            stats.out_of_bounds_records += frame
                .big_rects
                .iter()
                .filter(|r| r.is_out_of_bounds(self.width, self.height))
                .count() as u64;
            stats.out_of_bounds_records += frame
                .runs
                .iter()
                .filter(|r| r.is_out_of_bounds(self.width, self.height))
                .count() as u64;
        }
        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/model.rs"]
mod tests;
