use crate::{codec::model::Frame, foundation::error::PanecastResult};

/// The exact vector overlay: a retained-mode rectangle filler with a uniform scale.
///
/// Calls for one frame are always `begin_frame`, `clear`, `set_scale`, any number of
/// `fill_rect`, then `end_frame`.
pub trait VectorRasterizer {
    fn begin_frame(&mut self) -> PanecastResult<()>;

    fn clear(&mut self) -> PanecastResult<()>;

    /// Uniform video-to-output scale applied to subsequent fills.
    fn set_scale(&mut self, factor: f64) -> PanecastResult<()>;

    /// Fill a rectangle given in video pixel coordinates.
    fn fill_rect(&mut self, rect: kurbo::Rect) -> PanecastResult<()>;

    fn end_frame(&mut self) -> PanecastResult<()>;
}

impl<R: VectorRasterizer + ?Sized> VectorRasterizer for &mut R {
    fn begin_frame(&mut self) -> PanecastResult<()> {
        (**self).begin_frame()
    }

    fn clear(&mut self) -> PanecastResult<()> {
        (**self).clear()
    }

    fn set_scale(&mut self, factor: f64) -> PanecastResult<()> {
        (**self).set_scale(factor)
    }

    fn fill_rect(&mut self, rect: kurbo::Rect) -> PanecastResult<()> {
        (**self).fill_rect(rect)
    }

    fn end_frame(&mut self) -> PanecastResult<()> {
        (**self).end_frame()
    }
}

/// Draw every rectangle and run of `frame` exactly, in list order.
///
/// Records are clamped to the `width x height` video bounds first; records with nothing left
/// inside the bounds are skipped. Returns the number of rectangles filled.
pub fn draw_frame<R: VectorRasterizer + ?Sized>(
    rasterizer: &mut R,
    frame: &Frame,
    width: u32,
    height: u32,
    scale: f64,
) -> PanecastResult<usize> {
    rasterizer.begin_frame()?;
    rasterizer.clear()?;
    rasterizer.set_scale(scale)?;

    let mut filled = 0usize;
    for rect in frame.big_rects.iter().filter_map(|r| r.clamped(width, height)) {
        rasterizer.fill_rect(rect.to_kurbo())?;
        filled += 1;
    }
    for run in frame.runs.iter().filter_map(|r| r.clamped(width, height)) {
        rasterizer.fill_rect(run.to_kurbo())?;
        filled += 1;
    }

    rasterizer.end_frame()?;
    Ok(filled)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
