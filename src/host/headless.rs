use std::time::{Duration, Instant};

use crate::{
    foundation::error::{PanecastError, PanecastResult},
    surface::host::{Placement, PlacementOps, SurfaceGeometry, SurfaceHost},
};

/// Index of a surface owned by a [`HeadlessHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeadlessSurfaceId(pub usize);

/// Current on-"screen" state of one headless surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    pub geometry: SurfaceGeometry,
    pub visible: bool,
    /// Entries that asked for a repaint.
    pub repaints: u64,
}

/// An applied batch, kept when history recording is on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRecord {
    pub entries: Vec<(HeadlessSurfaceId, Placement)>,
}

/// Open transaction on a [`HeadlessHost`].
#[derive(Debug)]
pub struct HeadlessBatch {
    entries: Vec<(HeadlessSurfaceId, Placement)>,
}

/// In-process surface host with no windowing system behind it.
///
/// Batches are applied to a surface table on `end_batch`, all entries at once.
/// `wait_for_refresh` sleeps until the next boundary of a fixed refresh grid (or returns
/// immediately when no refresh interval is configured).
#[derive(Debug)]
pub struct HeadlessHost {
    surfaces: Vec<HeadlessSurface>,
    history: Option<Vec<BatchRecord>>,
    refresh_interval: Option<Duration>,
    epoch: Instant,
    batches_committed: u64,
    entries_applied: u64,
    refresh_waits: u64,
}

impl HeadlessHost {
    pub fn new(refresh_interval: Option<Duration>) -> Self {
        Self {
            surfaces: Vec::new(),
            history: None,
            refresh_interval: refresh_interval.filter(|d| !d.is_zero()),
            epoch: Instant::now(),
            batches_committed: 0,
            entries_applied: 0,
            refresh_waits: 0,
        }
    }

    /// Refresh grid for a display running at `hz`.
    pub fn with_refresh_hz(hz: Option<u32>) -> Self {
        Self::new(
            hz.filter(|&hz| hz > 0)
                .map(|hz| Duration::from_secs_f64(1.0 / f64::from(hz))),
        )
    }

    /// Keep a copy of every applied batch.
    pub fn record_history(mut self, on: bool) -> Self {
        self.history = on.then(Vec::new);
        self
    }

    pub fn surfaces(&self) -> &[HeadlessSurface] {
        &self.surfaces
    }

    pub fn surface(&self, id: HeadlessSurfaceId) -> Option<&HeadlessSurface> {
        self.surfaces.get(id.0)
    }

    pub fn visible_count(&self) -> usize {
        self.surfaces.iter().filter(|s| s.visible).count()
    }

    pub fn history(&self) -> &[BatchRecord] {
        self.history.as_deref().unwrap_or(&[])
    }

    pub fn batches_committed(&self) -> u64 {
        self.batches_committed
    }

    pub fn entries_applied(&self) -> u64 {
        self.entries_applied
    }

    pub fn refresh_waits(&self) -> u64 {
        self.refresh_waits
    }

    fn next_refresh(&self, now: Instant, interval: Duration) -> Instant {
        let elapsed = now.saturating_duration_since(self.epoch).as_nanos();
        let step = interval.as_nanos().max(1);
        let ticks = elapsed / step + 1;
        let offset = u64::try_from(ticks * step).unwrap_or(u64::MAX);
        self.epoch + Duration::from_nanos(offset)
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SurfaceHost for HeadlessHost {
    type Surface = HeadlessSurfaceId;
    type Batch = HeadlessBatch;

    fn create_surface(&mut self) -> PanecastResult<HeadlessSurfaceId> {
        self.surfaces.push(HeadlessSurface::default());
        Ok(HeadlessSurfaceId(self.surfaces.len() - 1))
    }

    fn begin_batch(&mut self, expected: usize) -> PanecastResult<HeadlessBatch> {
        Ok(HeadlessBatch {
            entries: Vec::with_capacity(expected),
        })
    }

    fn defer(
        &mut self,
        batch: &mut HeadlessBatch,
        surface: &HeadlessSurfaceId,
        placement: Placement,
    ) -> PanecastResult<()> {
        if surface.0 >= self.surfaces.len() {
            return Err(PanecastError::host(format!(
                "unknown headless surface {}",
                surface.0
            )));
        }
        batch.entries.push((*surface, placement));
        Ok(())
    }

    fn end_batch(&mut self, batch: HeadlessBatch) -> PanecastResult<()> {
        for &(id, Placement { geometry, ops }) in &batch.entries {
            let s = &mut self.surfaces[id.0];
            if ops.contains(PlacementOps::MOVE) {
                s.geometry.x = geometry.x;
                s.geometry.y = geometry.y;
            }
            if ops.contains(PlacementOps::RESIZE) {
                s.geometry.w = geometry.w;
                s.geometry.h = geometry.h;
            }
            if ops.contains(PlacementOps::SHOW) {
                s.visible = true;
            }
            if ops.contains(PlacementOps::HIDE) {
                s.visible = false;
            }
            if ops.contains(PlacementOps::REDRAW) {
                s.repaints += 1;
            }
        }

        self.batches_committed += 1;
        self.entries_applied += batch.entries.len() as u64;
        if let Some(history) = self.history.as_mut() {
            history.push(BatchRecord {
                entries: batch.entries,
            });
        }
        Ok(())
    }

    fn wait_for_refresh(&mut self) -> PanecastResult<()> {
        self.refresh_waits += 1;
        if let Some(interval) = self.refresh_interval {
            let now = Instant::now();
            let target = self.next_refresh(now, interval);
            std::thread::sleep(target.saturating_duration_since(now));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
