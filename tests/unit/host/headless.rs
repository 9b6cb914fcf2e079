use std::time::{Duration, Instant};

use super::*;

fn placement(x: i32, y: i32, w: i32, h: i32, ops: PlacementOps) -> Placement {
    Placement {
        geometry: SurfaceGeometry::new(x, y, w, h),
        ops,
    }
}

#[test]
fn batch_applies_only_requested_attributes() {
    let mut host = HeadlessHost::default().record_history(true);
    let a = host.create_surface().unwrap();
    let b = host.create_surface().unwrap();

    let mut batch = host.begin_batch(2).unwrap();
    host.defer(
        &mut batch,
        &a,
        placement(
            5,
            6,
            7,
            8,
            PlacementOps::MOVE | PlacementOps::RESIZE | PlacementOps::SHOW | PlacementOps::REDRAW,
        ),
    )
    .unwrap();
    host.defer(&mut batch, &b, placement(9, 9, 9, 9, PlacementOps::MOVE))
        .unwrap();
    // Nothing is visible until the batch is committed.
    assert_eq!(host.visible_count(), 0);
    host.end_batch(batch).unwrap();

    let sa = host.surface(a).unwrap();
    assert_eq!(sa.geometry, SurfaceGeometry::new(5, 6, 7, 8));
    assert!(sa.visible);
    assert_eq!(sa.repaints, 1);

    let sb = host.surface(b).unwrap();
    assert_eq!(sb.geometry, SurfaceGeometry::new(9, 9, 0, 0));
    assert!(!sb.visible);

    assert_eq!(host.batches_committed(), 1);
    assert_eq!(host.entries_applied(), 2);
    assert_eq!(host.history().len(), 1);
    assert_eq!(host.history()[0].entries.len(), 2);
}

#[test]
fn hide_entry_turns_surface_off() {
    let mut host = HeadlessHost::default();
    let a = host.create_surface().unwrap();
    let mut batch = host.begin_batch(1).unwrap();
    host.defer(&mut batch, &a, placement(0, 0, 1, 1, PlacementOps::SHOW))
        .unwrap();
    host.end_batch(batch).unwrap();
    assert_eq!(host.visible_count(), 1);

    let mut batch = host.begin_batch(1).unwrap();
    host.defer(&mut batch, &a, placement(0, 0, 1, 1, PlacementOps::HIDE))
        .unwrap();
    host.end_batch(batch).unwrap();
    assert_eq!(host.visible_count(), 0);
    assert!(host.history().is_empty());
}

#[test]
fn unknown_surface_is_refused() {
    let mut host = HeadlessHost::default();
    let mut batch = host.begin_batch(1).unwrap();
    assert!(
        host.defer(
            &mut batch,
            &HeadlessSurfaceId(3),
            placement(0, 0, 1, 1, PlacementOps::SHOW)
        )
        .is_err()
    );
}

#[test]
fn refresh_wait_lands_on_grid_boundary() {
    let interval = Duration::from_millis(5);
    let mut host = HeadlessHost::new(Some(interval));
    let before = Instant::now();
    host.wait_for_refresh().unwrap();
    assert!(before.elapsed() <= interval * 20);
    assert_eq!(host.refresh_waits(), 1);

    let mut unpaced = HeadlessHost::with_refresh_hz(None);
    unpaced.wait_for_refresh().unwrap();
    assert_eq!(unpaced.refresh_waits(), 1);
}
