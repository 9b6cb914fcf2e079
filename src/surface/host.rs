use crate::foundation::error::PanecastResult;

/// Screen-space rectangle of a physical surface, in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceGeometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SurfaceGeometry {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

bitflags::bitflags! {
    /// Operations a single batch entry performs on its surface.
    ///
    /// A move-only entry leaves `RESIZE` and `REDRAW` clear; an entry that makes a surface
    /// visible always carries `REDRAW` so its first paint is not skipped.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PlacementOps: u8 {
        const MOVE = 1;
        const RESIZE = 1 << 1;
        const SHOW = 1 << 2;
        const HIDE = 1 << 3;
        const REDRAW = 1 << 4;
    }
}

/// One entry of a batched positioning transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub geometry: SurfaceGeometry,
    pub ops: PlacementOps,
}

/// Host windowing capabilities the surface pool depends on.
///
/// Surfaces are created once and never destroyed by the pool. Positioning is only ever done
/// through a batch: `begin_batch`, one `defer` per changed surface, then `end_batch`, which must
/// apply every deferred entry atomically.
pub trait SurfaceHost {
    /// Handle to one physical on-screen surface.
    type Surface;
    /// An open multi-surface positioning transaction.
    type Batch;

    /// Create a hidden surface. Its initial geometry is up to the host; the first placement of
    /// every surface carries MOVE and RESIZE.
    fn create_surface(&mut self) -> PanecastResult<Self::Surface>;

    /// Open a transaction sized for `expected` entries.
    fn begin_batch(&mut self, expected: usize) -> PanecastResult<Self::Batch>;

    /// Add one surface's placement to an open transaction.
    fn defer(
        &mut self,
        batch: &mut Self::Batch,
        surface: &Self::Surface,
        placement: Placement,
    ) -> PanecastResult<()>;

    /// Apply every deferred entry as one atomic batch.
    fn end_batch(&mut self, batch: Self::Batch) -> PanecastResult<()>;

    /// Block until the display's next refresh boundary.
    fn wait_for_refresh(&mut self) -> PanecastResult<()>;
}

impl<H: SurfaceHost + ?Sized> SurfaceHost for &mut H {
    type Surface = H::Surface;
    type Batch = H::Batch;

    fn create_surface(&mut self) -> PanecastResult<Self::Surface> {
        (**self).create_surface()
    }

    fn begin_batch(&mut self, expected: usize) -> PanecastResult<Self::Batch> {
        (**self).begin_batch(expected)
    }

    fn defer(
        &mut self,
        batch: &mut Self::Batch,
        surface: &Self::Surface,
        placement: Placement,
    ) -> PanecastResult<()> {
        (**self).defer(batch, surface, placement)
    }

    fn end_batch(&mut self, batch: Self::Batch) -> PanecastResult<()> {
        (**self).end_batch(batch)
    }

    fn wait_for_refresh(&mut self) -> PanecastResult<()> {
        (**self).wait_for_refresh()
    }
}
