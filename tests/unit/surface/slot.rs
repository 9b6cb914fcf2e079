use super::*;

fn transform(scale: f64, ox: i32, oy: i32) -> DisplayTransform {
    DisplayTransform {
        scale,
        origin_x: ox,
        origin_y: oy,
        out_width: 0,
        out_height: 0,
    }
}

#[test]
fn geometry_truncates_and_keeps_one_pixel() {
    let g = surface_geometry(RectRecord::new(3, 5, 1, 7), transform(0.5, 100, 10));
    assert_eq!(g, SurfaceGeometry::new(101, 12, 1, 3));

    let g = surface_geometry(RectRecord::new(2, 2, 3, 3), transform(1.5, 0, 0));
    assert_eq!(g, SurfaceGeometry::new(3, 3, 4, 4));
}

#[test]
fn first_show_at_origin_carries_every_attribute() {
    let mut slot = SurfaceSlot::new(());
    let dirty = slot.stage(Some(SurfaceGeometry::new(0, 0, 2, 2)));
    assert_eq!(dirty, DirtyFlags::all());
    assert_eq!(
        slot.placement().ops,
        PlacementOps::MOVE | PlacementOps::RESIZE | PlacementOps::SHOW | PlacementOps::REDRAW
    );
}

#[test]
fn refused_first_show_is_retried_in_full() {
    let mut slot = SurfaceSlot::new(());
    slot.stage(Some(SurfaceGeometry::new(0, 0, 0, 0)));
    slot.discard();
    assert_eq!(
        slot.stage(Some(SurfaceGeometry::new(0, 0, 0, 0))),
        DirtyFlags::all()
    );
}

#[test]
fn move_only_change_skips_resize_and_redraw() {
    let mut slot = SurfaceSlot::new(());
    slot.stage(Some(SurfaceGeometry::new(4, 4, 2, 2)));
    slot.commit();

    assert_eq!(
        slot.stage(Some(SurfaceGeometry::new(5, 4, 2, 2))),
        DirtyFlags::POSITION
    );
    assert_eq!(slot.placement().ops, PlacementOps::MOVE);
}

#[test]
fn hide_keeps_geometry_and_is_idempotent() {
    let mut slot = SurfaceSlot::new(());
    slot.stage(Some(SurfaceGeometry::new(4, 4, 2, 2)));
    slot.commit();

    assert_eq!(slot.stage(None), DirtyFlags::VISIBILITY);
    let p = slot.placement();
    assert_eq!(p.ops, PlacementOps::HIDE);
    assert_eq!(p.geometry, SurfaceGeometry::new(4, 4, 2, 2));
    slot.commit();

    assert!(slot.stage(None).is_empty());
    assert!(!slot.is_dirty());
}

#[test]
fn discard_restores_committed_state() {
    let mut slot = SurfaceSlot::new(());
    slot.stage(Some(SurfaceGeometry::new(1, 1, 1, 1)));
    slot.discard();
    assert!(!slot.is_dirty());
    assert_eq!(slot.committed(), SlotState::default());
    assert_eq!(slot.dirty(), DirtyFlags::empty());
}
