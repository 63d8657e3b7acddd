use super::*;

fn frame(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect(),
        premultiplied,
    }
}

#[test]
fn encoded_png_keeps_size_and_unpremultiplies() {
    let f = frame(8, 4, [64, 32, 0, 128], true);
    let bytes = encode_png(&f).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (8, 4));
    assert_eq!(decoded.get_pixel(3, 2).0, [128, 64, 0, 128]);
}

#[test]
fn straight_frames_are_written_as_is() {
    let f = frame(2, 2, [10, 20, 30, 40], false);
    let bytes = encode_png(&f).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30, 40]);
}

#[test]
fn transparent_pixels_stay_transparent() {
    let f = frame(2, 2, [0, 0, 0, 0], true);
    let bytes = encode_png(&f).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn bad_buffer_length_is_a_render_error() {
    let mut f = frame(2, 2, [0, 0, 0, 0], true);
    f.data.pop();
    assert!(matches!(encode_png(&f), Err(IconRingError::Render(_))));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_export_png")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let out = dir.join(DEFAULT_FILE_NAME);

    write_png(&frame(4, 4, [255, 0, 0, 255], true), &out).unwrap();
    let decoded = image::open(&out).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 4));
}
