use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[10, 20, 30, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[0..3].iter().zip([100u8, 50, 200]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
    assert_eq!(px[3], 128);
}

#[test]
fn premul_over_opaque_src_replaces_dst() {
    let mut dst = vec![10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[200, 100, 50, 255]).unwrap();
    assert_eq!(dst, vec![200, 100, 50, 255]);
}

#[test]
fn premul_over_transparent_src_keeps_dst() {
    let mut dst = vec![10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn premul_over_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(premul_over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn mask_apply_scales_by_mask_alpha() {
    let src = [200u8, 100, 50, 255, 200, 100, 50, 255];
    let mask = [255u8, 255, 255, 255, 0, 0, 0, 0];
    let mut dst = [1u8; 8];
    mask_apply_alpha(&src, &mask, &mut dst).unwrap();
    assert_eq!(dst, [200, 100, 50, 255, 0, 0, 0, 0]);
}
