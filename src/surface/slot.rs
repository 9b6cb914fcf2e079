use crate::{
    codec::model::RectRecord,
    foundation::core::DisplayTransform,
    surface::host::{Placement, PlacementOps, SurfaceGeometry},
};

bitflags::bitflags! {
    /// Attributes whose desired value differs from what is committed on screen.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        const POSITION = 1;
        const SIZE = 1 << 1;
        const VISIBILITY = 1 << 2;
    }
}

/// Geometry and visibility of one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotState {
    pub geometry: SurfaceGeometry,
    pub visible: bool,
}

/// Screen geometry for a (clamped) video rectangle.
///
/// Visible surfaces are never smaller than 1x1; the host cannot show a zero-area surface.
pub(crate) fn surface_geometry(rect: RectRecord, transform: DisplayTransform) -> SurfaceGeometry {
    let (x, y) = transform.to_screen(rect.x, rect.y);
    SurfaceGeometry {
        x,
        y,
        w: transform.scale_len(rect.w).max(1),
        h: transform.scale_len(rect.h).max(1),
    }
}

/// A reusable surface handle with its committed state and the state staged for this frame.
pub(crate) struct SurfaceSlot<S> {
    pub(crate) surface: S,
    committed: SlotState,
    target: SlotState,
    dirty: DirtyFlags,
    /// False until a placement has been committed; the host's initial geometry is unknown.
    placed: bool,
}

impl<S> SurfaceSlot<S> {
    /// Wrap a freshly created, hidden surface.
    pub(crate) fn new(surface: S) -> Self {
        Self {
            surface,
            committed: SlotState::default(),
            target: SlotState::default(),
            dirty: DirtyFlags::empty(),
            placed: false,
        }
    }

    /// Stage this frame's desired state and recompute the dirty flags against what is committed.
    ///
    /// Hiding keeps the committed geometry: only visibility is compared, so hiding an already
    /// hidden slot is a no-op.
    pub(crate) fn stage(&mut self, desired: Option<SurfaceGeometry>) -> DirtyFlags {
        let mut dirty = DirtyFlags::empty();
        self.target = match desired {
            Some(geometry) => {
                if !self.committed.visible {
                    dirty |= DirtyFlags::VISIBILITY;
                }
                let current = self.committed.geometry;
                if !self.placed || (geometry.w, geometry.h) != (current.w, current.h) {
                    dirty |= DirtyFlags::SIZE;
                }
                if !self.placed || (geometry.x, geometry.y) != (current.x, current.y) {
                    dirty |= DirtyFlags::POSITION;
                }
                SlotState {
                    geometry,
                    visible: true,
                }
            }
            None => {
                if self.committed.visible {
                    dirty |= DirtyFlags::VISIBILITY;
                }
                SlotState {
                    geometry: self.committed.geometry,
                    visible: false,
                }
            }
        };
        self.dirty = dirty;
        dirty
    }

    pub(crate) fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub(crate) fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// The batch entry for the staged change, narrowed to the attributes that changed.
    pub(crate) fn placement(&self) -> Placement {
        let mut ops = PlacementOps::empty();
        if self.dirty.contains(DirtyFlags::POSITION) {
            ops |= PlacementOps::MOVE;
        }
        if self.dirty.contains(DirtyFlags::SIZE) {
            ops |= PlacementOps::RESIZE | PlacementOps::REDRAW;
        }
        if self.dirty.contains(DirtyFlags::VISIBILITY) {
            ops |= if self.target.visible {
                PlacementOps::SHOW | PlacementOps::REDRAW
            } else {
                PlacementOps::HIDE
            };
        }
        Placement {
            geometry: self.target.geometry,
            ops,
        }
    }

    /// Record the staged state as on screen. Only called once the batch has been applied.
    pub(crate) fn commit(&mut self) {
        self.placed |= self.target.visible;
        self.committed = self.target;
        self.dirty = DirtyFlags::empty();
    }

    /// Forget the staged change after a refused batch.
    pub(crate) fn discard(&mut self) {
        self.target = self.committed;
        self.dirty = DirtyFlags::empty();
    }

    pub(crate) fn committed(&self) -> SlotState {
        self.committed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/slot.rs"]
mod tests;
