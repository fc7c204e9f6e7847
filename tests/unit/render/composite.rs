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
fn premultiply_roundtrips_opaque_and_clears_transparent() {
    for c in [0xFF00_0000u32, 0xFF12_3456, 0xFFFF_FFFF] {
        assert_eq!(unpremultiply(premultiply(c)), c);
    }
    assert_eq!(unpremultiply(premultiply(0x0012_3456)), 0);
}

#[test]
fn blend_half_opacity_mixes_opaque_colors() {
    let out = blend_argb(0xFF00_0000, 0xFFC8_0000, 128.0 / 255.0);
    let (r, g, b, a) = unmap_color(out);
    assert_eq!(a, 255);
    assert!((i32::from(r) - 100).abs() <= 1, "r = {r}");
    assert_eq!((g, b), (0, 0));
}

#[test]
fn blend_honors_source_pixel_alpha() {
    let out = blend_argb(0xFF00_00FF, 0x00FF_0000, 1.0);
    assert_eq!(out, 0xFF00_00FF);
    let out = blend_argb(0xFF00_00FF, 0xFFFF_0000, 1.0);
    assert_eq!(out, 0xFFFF_0000);
}
