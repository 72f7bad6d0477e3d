use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_mixes() {
    let dst = [0, 0, 0, 255];
    let src = [200, 100, 0, 255];
    let out = over(dst, src, 0.5);
    assert_eq!(out[3], 255);
    assert!((99..=101).contains(&out[0]));
    assert!((49..=51).contains(&out[1]));
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    over_in_place(&mut dst, &[9, 9, 9, 255, 9, 9, 9, 255], 1.0).unwrap();
    assert_eq!(dst, vec![9, 9, 9, 255, 9, 9, 9, 255]);
}

#[test]
fn brightness_scales_color_not_alpha() {
    let mut buf = vec![200u8, 100, 50, 255];
    brightness_in_place(&mut buf, 0.5).unwrap();
    assert_eq!(buf, vec![100, 50, 25, 255]);
}

#[test]
fn brightness_above_one_clamps_to_alpha() {
    let mut buf = vec![100u8, 20, 0, 128];
    brightness_in_place(&mut buf, 2.0).unwrap();
    assert_eq!(buf, vec![128, 40, 0, 128]);
}

#[test]
fn brightness_rejects_invalid_factor() {
    let mut buf = vec![0u8; 4];
    assert!(brightness_in_place(&mut buf, -1.0).is_err());
    assert!(brightness_in_place(&mut buf, f32::INFINITY).is_err());
    assert!(brightness_in_place(&mut [0u8; 3], 1.0).is_err());
}

#[test]
fn brightness_clamps_huge_factors() {
    let mut huge = vec![255u8, 255, 255, 255, 40, 10, 0, 255];
    brightness_in_place(&mut huge, 100_000.0).unwrap();
    let mut capped = vec![255u8, 255, 255, 255, 40, 10, 0, 255];
    brightness_in_place(&mut capped, MAX_BRIGHTNESS).unwrap();
    assert_eq!(huge, capped);
    assert_eq!(huge, vec![255, 255, 255, 255, 160, 40, 0, 255]);

    let mut max = vec![255u8, 255, 255, 255];
    brightness_in_place(&mut max, f32::MAX).unwrap();
    assert_eq!(max, vec![255, 255, 255, 255]);
}
