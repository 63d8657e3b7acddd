use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();

    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_keeps_aspect() {
    let img = image::RgbaImage::from_pixel(30, 7, image::Rgba([1, 2, 3, 255]));
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!((prepared.width, prepared.height), (30, 7));
    assert_eq!(prepared.rgba8_premul.len(), 30 * 7 * 4);
}

#[test]
fn decode_garbage_is_a_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, IconRingError::Decode(_)));
}

#[test]
fn load_missing_file_reports_the_path() {
    let err = load_image(Path::new("no/such/upload.png")).unwrap_err();
    assert!(err.to_string().contains("no/such/upload.png"));
}
