use crate::{
    codec::model::{Frame, RectRecord, RunRecord, VideoHeader, VideoModel},
    foundation::error::{PanecastError, PanecastResult},
};

/// Size in bytes of the `width, height, fps, frame_count` prefix.
pub const HEADER_LEN: usize = 16;

/// Forward-only little-endian reader; every read checks the remaining length first.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> PanecastResult<[u8; N]> {
        let truncated = || PanecastError::TruncatedInput {
            offset: self.pos,
            needed: N,
            len: self.buf.len(),
        };
        let end = self.pos.checked_add(N).ok_or_else(truncated)?;
        let bytes: [u8; N] = self
            .buf
            .get(self.pos..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(truncated)?;
        self.pos = end;
        Ok(bytes)
    }

    fn u32(&mut self) -> PanecastResult<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn u16(&mut self) -> PanecastResult<u16> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

fn read_header(r: &mut ByteReader<'_>) -> PanecastResult<VideoHeader> {
    Ok(VideoHeader {
        width: r.u32()?,
        height: r.u32()?,
        fps: r.u32()?,
        frame_count: r.u32()?,
    })
}

/// Read only the fixed header of an encoded video.
pub fn probe_header(bytes: &[u8]) -> PanecastResult<VideoHeader> {
    read_header(&mut ByteReader::new(bytes))
}

/// Decode an encoded video in a single forward pass.
///
/// The only failure is [`PanecastError::TruncatedInput`]. Geometry is not validated against the
/// declared dimensions; see [`RectRecord::clamped`] and [`RunRecord::clamped`].
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_video(bytes: &[u8]) -> PanecastResult<VideoModel> {
    let mut r = ByteReader::new(bytes);
    let header = read_header(&mut r)?;

    // Counts are untrusted: cap the up-front reservation by what the buffer could possibly hold.
    let mut frames = Vec::with_capacity(bounded_capacity(header.frame_count, r.remaining(), 8));
    for _ in 0..header.frame_count {
        frames.push(read_frame(&mut r)?);
    }

    let video = VideoModel {
        width: header.width,
        height: header.height,
        fps: header.fps,
        frames,
    };

    if r.remaining() != 0 {
        tracing::debug!(trailing = r.remaining(), "ignoring trailing bytes after last frame");
    }
    tracing::debug!(
        width = video.width,
        height = video.height,
        fps = video.fps,
        frames = video.frames.len(),
        "decoded video"
    );
    Ok(video)
}

fn read_frame(r: &mut ByteReader<'_>) -> PanecastResult<Frame> {
    let rect_count = r.u32()?;
    let mut big_rects = Vec::with_capacity(bounded_capacity(rect_count, r.remaining(), 8));
    for _ in 0..rect_count {
        big_rects.push(RectRecord {
            x: r.u16()?,
            y: r.u16()?,
            w: r.u16()?,
            h: r.u16()?,
        });
    }

    let run_count = r.u32()?;
    let mut runs = Vec::with_capacity(bounded_capacity(run_count, r.remaining(), 6));
    for _ in 0..run_count {
        runs.push(RunRecord {
            y: r.u16()?,
            x: r.u16()?,
            len: r.u16()?,
        });
    }

    Ok(Frame { big_rects, runs })
}

fn bounded_capacity(count: u32, remaining: usize, record_len: usize) -> usize {
    usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(remaining / record_len)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
