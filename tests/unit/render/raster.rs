use super::*;
use crate::codec::model::{RectRecord, RunRecord};

#[derive(Default)]
struct MockRasterizer {
    calls: Vec<String>,
}

impl VectorRasterizer for MockRasterizer {
    fn begin_frame(&mut self) -> PanecastResult<()> {
        self.calls.push("begin".into());
        Ok(())
    }

    fn clear(&mut self) -> PanecastResult<()> {
        self.calls.push("clear".into());
        Ok(())
    }

    fn set_scale(&mut self, factor: f64) -> PanecastResult<()> {
        self.calls.push(format!("scale {factor}"));
        Ok(())
    }

    fn fill_rect(&mut self, rect: kurbo::Rect) -> PanecastResult<()> {
        self.calls.push(format!(
            "fill {} {} {} {}",
            rect.x0, rect.y0, rect.x1, rect.y1
        ));
        Ok(())
    }

    fn end_frame(&mut self) -> PanecastResult<()> {
        self.calls.push("end".into());
        Ok(())
    }
}

#[test]
fn draw_frame_feeds_rects_then_runs_in_order() {
    let frame = Frame {
        big_rects: vec![RectRecord::new(0, 0, 2, 3), RectRecord::new(4, 1, 1, 1)],
        runs: vec![RunRecord::new(7, 2, 5)],
    };
    let mut r = MockRasterizer::default();
    let filled = draw_frame(&mut r, &frame, 16, 16, 2.5).unwrap();
    assert_eq!(filled, 3);
    assert_eq!(
        r.calls,
        vec![
            "begin",
            "clear",
            "scale 2.5",
            "fill 0 0 2 3",
            "fill 4 1 5 2",
            "fill 2 7 7 8",
            "end",
        ]
    );
}

#[test]
fn draw_frame_clamps_out_of_range_records() {
    let frame = Frame {
        big_rects: vec![RectRecord::new(6, 6, 10, 10), RectRecord::new(9, 0, 1, 1)],
        runs: vec![RunRecord::new(8, 0, 1), RunRecord::new(0, 7, 4)],
    };
    let mut r = MockRasterizer::default();
    let filled = draw_frame(&mut r, &frame, 8, 8, 1.0).unwrap();
    assert_eq!(filled, 2);
    assert!(r.calls.contains(&"fill 6 6 8 8".to_string()));
    assert!(r.calls.contains(&"fill 7 0 8 1".to_string()));
}

#[test]
fn empty_frame_still_clears() {
    let mut r = MockRasterizer::default();
    draw_frame(&mut r, &Frame::default(), 4, 4, 1.0).unwrap();
    assert_eq!(r.calls, vec!["begin", "clear", "scale 1", "end"]);
}
