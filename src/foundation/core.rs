use crate::foundation::error::{PanecastError, PanecastResult};

pub use kurbo::Rect;

/// Presentation-order index of a frame in a [`crate::VideoModel`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Index as a `usize` for slice access.
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

/// Size of the display the playback surface is centered on, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl std::str::FromStr for ScreenMetrics {
    type Err = PanecastError;

    /// Parse `"WIDTHxHEIGHT"`, e.g. `"1920x1080"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| PanecastError::validation(format!("screen size '{s}' is not WxH")))?;
        let parse = |v: &str| {
            v.trim().parse::<u32>().map_err(|e| {
                PanecastError::validation(format!("screen size '{s}' has a bad dimension: {e}"))
            })
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

/// Mapping from video pixel space to screen space, computed once at startup.
///
/// The video is scaled uniformly to fit the screen and centered; the overlay and the surface pool
/// both use the same transform so the two representations line up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayTransform {
    pub scale: f64,
    pub origin_x: i32,
    pub origin_y: i32,
    pub out_width: u32,
    pub out_height: u32,
}

impl DisplayTransform {
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            scale: 1.0,
            origin_x: 0,
            origin_y: 0,
            out_width: width,
            out_height: height,
        }
    }

    pub fn fit(screen: ScreenMetrics, video_width: u32, video_height: u32) -> PanecastResult<Self> {
        if video_width == 0 || video_height == 0 {
            return Err(PanecastError::validation(format!(
                "video dimensions must be non-zero, got {video_width}x{video_height}"
            )));
        }
        if screen.width == 0 || screen.height == 0 {
            return Err(PanecastError::validation(format!(
                "screen dimensions must be non-zero, got {}x{}",
                screen.width, screen.height
            )));
        }

        let scale = (f64::from(screen.width) / f64::from(video_width))
            .min(f64::from(screen.height) / f64::from(video_height));
        let out_width = (f64::from(video_width) * scale) as u32;
        let out_height = (f64::from(video_height) * scale) as u32;

        Ok(Self {
            scale,
            origin_x: ((i64::from(screen.width) - i64::from(out_width)) / 2) as i32,
            origin_y: ((i64::from(screen.height) - i64::from(out_height)) / 2) as i32,
            out_width,
            out_height,
        })
    }

    /// Scale a video-space coordinate, truncating toward zero.
    pub fn scale_len(self, v: u16) -> i32 {
        (f64::from(v) * self.scale) as i32
    }

    /// Screen-space position of a video-space point.
    pub fn to_screen(self, x: u16, y: u16) -> (i32, i32) {
        (
            self.origin_x.saturating_add(self.scale_len(x)),
            self.origin_y.saturating_add(self.scale_len(y)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
