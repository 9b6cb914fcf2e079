use crate::{
    codec::model::Frame,
    foundation::{
        core::DisplayTransform,
        error::{PanecastError, PanecastResult},
    },
    surface::{
        host::SurfaceHost,
        slot::{DirtyFlags, SlotState, SurfaceSlot, surface_geometry},
    },
};

/// Default number of physical surfaces kept alive for the whole run.
pub const DEFAULT_POOL_CAPACITY: usize = 150;

/// Pool layout, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SurfacePoolOpts {
    /// Number of surfaces allocated up front.
    pub capacity: usize,
    /// Video to screen mapping shared with the vector overlay.
    pub transform: DisplayTransform,
    /// Declared video width; rectangles are clamped to it.
    pub video_width: u32,
    /// Declared video height; rectangles are clamped to it.
    pub video_height: u32,
}

/// How a frame's transaction went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Nothing changed, so no transaction was opened.
    Skipped,
    /// One batch with `dirty` entries was applied.
    Committed,
    /// The host refused the batch; committed state is unchanged.
    Failed,
}

/// Result of one [`SurfacePool::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolUpdate {
    /// Rectangles represented by a surface this frame (`min(rects, capacity)`).
    pub active: usize,
    /// Slots with at least one dirty attribute.
    pub dirty: usize,
    /// Rectangles beyond capacity, visible only through the vector overlay.
    pub overflow: usize,
    pub outcome: BatchOutcome,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PoolStats {
    pub frames: u64,
    pub batches_committed: u64,
    pub entries_applied: u64,
    pub frames_without_changes: u64,
    pub failed_batches: u64,
    /// Per-attribute totals over committed entries.
    pub moves: u64,
    pub resizes: u64,
    pub visibility_toggles: u64,
}

/// Fixed set of reusable physical surfaces approximating each frame's rectangles.
///
/// Identity is positional: slot `i` shows whichever rectangle is at `big_rects[i]` this frame, or
/// is hidden when the frame has fewer rectangles. A rectangle that changes list position between
/// frames is therefore repositioned, not tracked.
pub struct SurfacePool<H: SurfaceHost> {
    host: H,
    slots: Vec<SurfaceSlot<H::Surface>>,
    opts: SurfacePoolOpts,
    stats: PoolStats,
}

impl<H: SurfaceHost> SurfacePool<H> {
    /// Allocate every surface up front. Surfaces start hidden.
    pub fn new(mut host: H, opts: SurfacePoolOpts) -> PanecastResult<Self> {
        if opts.capacity == 0 {
            return Err(PanecastError::validation(
                "surface pool capacity must be > 0",
            ));
        }

        let mut slots = Vec::with_capacity(opts.capacity);
        for _ in 0..opts.capacity {
            slots.push(SurfaceSlot::new(host.create_surface()?));
        }
        tracing::debug!(capacity = opts.capacity, "allocated surface pool");

        Ok(Self {
            host,
            slots,
            opts,
            stats: PoolStats::default(),
        })
    }

    /// Reconcile every slot against `frame` and apply at most one batched transaction.
    pub fn update(&mut self, frame: &Frame) -> PoolUpdate {
        let capacity = self.slots.len();
        let active = frame.big_rects.len().min(capacity);
        let overflow = frame.big_rects.len() - active;
        let (w, h) = (self.opts.video_width, self.opts.video_height);
        let transform = self.opts.transform;

        let mut dirty = 0usize;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let desired = frame.big_rects[..active]
                .get(i)
                .and_then(|r| r.clamped(w, h))
                .map(|r| surface_geometry(r, transform));
            if !slot.stage(desired).is_empty() {
                dirty += 1;
            }
        }

        self.stats.frames += 1;
        let outcome = if dirty == 0 {
            self.stats.frames_without_changes += 1;
            BatchOutcome::Skipped
        } else {
            self.apply_batch(dirty)
        };

        PoolUpdate {
            active,
            dirty,
            overflow,
            outcome,
        }
    }

    fn apply_batch(&mut self, dirty: usize) -> BatchOutcome {
        match self.try_apply_batch(dirty) {
            Ok(()) => {
                let mut totals = DirtyFlags::empty();
                for slot in self.slots.iter_mut().filter(|s| s.is_dirty()) {
                    let flags = slot.dirty();
                    totals |= flags;
                    self.stats.moves += u64::from(flags.contains(DirtyFlags::POSITION));
                    self.stats.resizes += u64::from(flags.contains(DirtyFlags::SIZE));
                    self.stats.visibility_toggles +=
                        u64::from(flags.contains(DirtyFlags::VISIBILITY));
                    slot.commit();
                }
                self.stats.batches_committed += 1;
                self.stats.entries_applied += dirty as u64;
                tracing::trace!(entries = dirty, ?totals, "committed surface batch");
                BatchOutcome::Committed
            }
            Err(err) => {
                for slot in &mut self.slots {
                    slot.discard();
                }
                self.stats.failed_batches += 1;
                tracing::warn!(entries = dirty, error = %err, "surface batch refused by host");
                BatchOutcome::Failed
            }
        }
    }

    fn try_apply_batch(&mut self, dirty: usize) -> PanecastResult<()> {
        let mut batch = self.host.begin_batch(dirty)?;
        for slot in self.slots.iter().filter(|s| s.is_dirty()) {
            self.host.defer(&mut batch, &slot.surface, slot.placement())?;
        }
        self.host.end_batch(batch)
    }

    /// Block until the display's next refresh boundary.
    pub fn wait_for_refresh(&mut self) -> PanecastResult<()> {
        self.host.wait_for_refresh()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn opts(&self) -> &SurfacePoolOpts {
        &self.opts
    }

    /// Committed (on-screen) state of slot `index`.
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(SurfaceSlot::committed)
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| s.committed().visible).count()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/pool.rs"]
mod tests;
