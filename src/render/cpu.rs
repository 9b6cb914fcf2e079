use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{PanecastError, PanecastResult},
    render::raster::VectorRasterizer,
};

/// Colors used by [`CpuRasterizer`], as straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterStyle {
    pub ink: [u8; 4],
    pub clear: [u8; 4],
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            ink: [255, 255, 255, 255],
            clear: [0, 0, 0, 0],
        }
    }
}

/// Copy of the overlay pixmap: premultiplied RGBA8, row-major, no row padding.
#[derive(Clone, Debug)]
pub struct OverlayImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl OverlayImage {
    /// Composite over an opaque background, yielding straight opaque RGBA8.
    pub fn flatten_over(&self, bg: [u8; 3]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(4) {
            let inv = 255 - u16::from(px[3]);
            for (c, &b) in px[..3].iter().zip(&bg) {
                let v = u16::from(*c) + (u16::from(b) * inv + 127) / 255;
                out.push(v.min(255) as u8);
            }
            out.push(255);
        }
        out
    }

    /// Premultiplied RGBA at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(i..i + 4)?.try_into().ok()
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|px| px[3])
    }
}

/// CPU vector overlay powered by `vello_cpu`, rendering into a premultiplied RGBA8 pixmap.
pub struct CpuRasterizer {
    width: u16,
    height: u16,
    style: RasterStyle,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    open: bool,
    frames_drawn: u64,
}

impl CpuRasterizer {
    pub fn new(width: u32, height: u32, style: RasterStyle) -> PanecastResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| PanecastError::validation("overlay width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| PanecastError::validation("overlay height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(PanecastError::validation("overlay size must be non-zero"));
        }

        Ok(Self {
            width,
            height,
            style,
            pixmap: vello_cpu::Pixmap::new(width, height),
            ctx: None,
            open: false,
            frames_drawn: 0,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Copy of the last completed frame.
    pub fn snapshot(&self) -> OverlayImage {
        OverlayImage {
            width: self.width(),
            height: self.height(),
            pixels: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }

    /// Write the last completed frame as an opaque PNG over `bg`.
    pub fn save_png(&self, path: &Path, bg: [u8; 3]) -> PanecastResult<()> {
        let frame = self.snapshot();
        let rgba = frame.flatten_over(bg);
        image::save_buffer_with_format(
            path,
            &rgba,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn ctx_mut(&mut self) -> PanecastResult<&mut vello_cpu::RenderContext> {
        if !self.open {
            return Err(PanecastError::host("overlay frame is not open"));
        }
        self.ctx
            .as_mut()
            .ok_or_else(|| PanecastError::host("overlay render context missing"))
    }
}

impl VectorRasterizer for CpuRasterizer {
    fn begin_frame(&mut self) -> PanecastResult<()> {
        if self.open {
            return Err(PanecastError::host("overlay frame already open"));
        }
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == self.width && ctx.height() == self.height => ctx,
            _ => vello_cpu::RenderContext::new(self.width, self.height),
        };
        ctx.reset();
        let [r, g, b, a] = self.style.ink;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx = Some(ctx);
        self.open = true;
        Ok(())
    }

    fn clear(&mut self) -> PanecastResult<()> {
        // The pixmap is overwritten on render, so the clear color has to be part of the scene.
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let [r, g, b, a] = self.style.clear;
        let [ir, ig, ib, ia] = self.style.ink;
        let ctx = self.ctx_mut()?;
        if a > 0 {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(ir, ig, ib, ia));
        }
        Ok(())
    }

    fn set_scale(&mut self, factor: f64) -> PanecastResult<()> {
        self.ctx_mut()?
            .set_transform(vello_cpu::kurbo::Affine::scale(factor));
        Ok(())
    }

    fn fill_rect(&mut self, rect: kurbo::Rect) -> PanecastResult<()> {
        self.ctx_mut()?.fill_rect(&rect_to_cpu(rect));
        Ok(())
    }

    fn end_frame(&mut self) -> PanecastResult<()> {
        if !self.open {
            return Err(PanecastError::host("overlay frame is not open"));
        }
        let ctx = self
            .ctx
            .as_mut()
            .ok_or_else(|| PanecastError::host("overlay render context missing"))?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        self.open = false;
        self.frames_drawn += 1;
        Ok(())
    }
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
