use super::*;
use crate::{
    codec::model::{Frame, RectRecord, RunRecord},
    render::raster::draw_frame,
};

#[test]
fn scaled_rect_and_run_cover_expected_pixels() {
    let mut r = CpuRasterizer::new(16, 16, RasterStyle::default()).unwrap();
    let frame = Frame {
        big_rects: vec![RectRecord::new(1, 1, 2, 2)],
        runs: vec![RunRecord::new(6, 0, 4)],
    };
    draw_frame(&mut r, &frame, 8, 8, 2.0).unwrap();
    let snap = r.snapshot();

    assert_eq!(snap.width, 16);
    assert_eq!(snap.alpha_at(3, 3), Some(255));
    assert_eq!(snap.alpha_at(5, 5), Some(255));
    assert_eq!(snap.alpha_at(0, 0), Some(0));
    assert_eq!(snap.alpha_at(7, 7), Some(0));
    assert_eq!(snap.alpha_at(7, 12), Some(255));
    assert_eq!(snap.alpha_at(9, 12), Some(0));
    assert_eq!(r.frames_drawn(), 1);
}

#[test]
fn next_frame_starts_from_clear() {
    let mut r = CpuRasterizer::new(4, 4, RasterStyle::default()).unwrap();
    let full = Frame {
        big_rects: vec![RectRecord::new(0, 0, 4, 4)],
        runs: vec![],
    };
    draw_frame(&mut r, &full, 4, 4, 1.0).unwrap();
    assert_eq!(r.snapshot().alpha_at(2, 2), Some(255));

    draw_frame(&mut r, &Frame::default(), 4, 4, 1.0).unwrap();
    assert!(r.snapshot().pixels.iter().all(|&b| b == 0));
}

#[test]
fn calls_outside_a_frame_are_rejected() {
    let mut r = CpuRasterizer::new(4, 4, RasterStyle::default()).unwrap();
    assert!(r.fill_rect(kurbo::Rect::new(0.0, 0.0, 1.0, 1.0)).is_err());
    assert!(r.end_frame().is_err());
    r.begin_frame().unwrap();
    assert!(r.begin_frame().is_err());
    r.end_frame().unwrap();
}

#[test]
fn oversized_overlay_is_rejected() {
    assert!(CpuRasterizer::new(70_000, 10, RasterStyle::default()).is_err());
    assert!(CpuRasterizer::new(0, 10, RasterStyle::default()).is_err());
}

#[test]
fn save_png_writes_file() {
    let dir = std::path::PathBuf::from("target").join("cpu_raster_png");
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("frame.png");
    let _ = std::fs::remove_file(&out);

    let mut r = CpuRasterizer::new(8, 8, RasterStyle::default()).unwrap();
    let frame = Frame {
        big_rects: vec![RectRecord::new(0, 0, 4, 8)],
        runs: vec![],
    };
    draw_frame(&mut r, &frame, 8, 8, 1.0).unwrap();
    r.save_png(&out, [0, 0, 0]).unwrap();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 8));
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(6, 1).0, [0, 0, 0, 255]);
}

#[test]
fn opaque_clear_color_sits_under_the_ink() {
    let style = RasterStyle {
        ink: [255, 255, 255, 255],
        clear: [0, 0, 255, 255],
    };
    let mut r = CpuRasterizer::new(8, 8, style).unwrap();

    draw_frame(&mut r, &Frame::default(), 8, 8, 1.0).unwrap();
    let snap = r.snapshot();
    assert_eq!(snap.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(snap.pixel(7, 7), Some([0, 0, 255, 255]));

    let frame = Frame {
        big_rects: vec![RectRecord::new(2, 2, 2, 2)],
        runs: vec![],
    };
    draw_frame(&mut r, &frame, 8, 8, 1.0).unwrap();
    let snap = r.snapshot();
    assert_eq!(snap.pixel(2, 3), Some([255, 255, 255, 255]));
    assert_eq!(snap.pixel(6, 6), Some([0, 0, 255, 255]));
}

#[test]
fn flatten_over_black_keeps_premultiplied_color() {
    let img = OverlayImage {
        width: 2,
        height: 1,
        pixels: vec![255, 255, 255, 255, 128, 128, 128, 128],
    };
    assert_eq!(
        img.flatten_over([0, 0, 0]),
        vec![255, 255, 255, 255, 128, 128, 128, 255]
    );
    assert_eq!(img.alpha_at(1, 0), Some(128));
    assert_eq!(img.pixel(2, 0), None);
}
