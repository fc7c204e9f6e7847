use super::*;
use crate::foundation::core::{TRANS_COLOR, map_rgb, unmap_color};

const BG: Argb = 0xFF10_2030;
const INK: Argb = 0xFFC8_6432;

fn display(w: u32, h: u32) -> PixelSurface {
    let mut d = PixelSurface::new();
    d.resize(w, h);
    d.fill(BG);
    d
}

/// 4x4 sprite: left column keyed out, the rest solid `INK`.
fn sprite() -> PixelSurface {
    let mut s = PixelSurface::new();
    s.resize(4, 4);
    s.fill(INK);
    {
        let mut px = s.lock();
        for y in 0..4 {
            px.put_pixel(0, y, TRANS_COLOR);
        }
    }
    s
}

fn close(a: Argb, b: Argb, tol: i32) -> bool {
    let (ar, ag, ab, aa) = unmap_color(a);
    let (br, bg, bb, ba) = unmap_color(b);
    [(ar, br), (ag, bg), (ab, bb), (aa, ba)]
        .iter()
        .all(|&(x, y)| (i32::from(x) - i32::from(y)).abs() <= tol)
}

#[test]
fn path_selection_covers_all_four_states() {
    let mut s = sprite();
    assert_eq!(CompositePath::select(&s), CompositePath::Opaque);
    s.set_mask(true);
    assert_eq!(CompositePath::select(&s), CompositePath::Masked);
    s.set_alpha(100, false);
    assert_eq!(CompositePath::select(&s), CompositePath::MaskedTranslucent);
    s.set_mask(false);
    assert_eq!(CompositePath::select(&s), CompositePath::Translucent);
}

#[test]
fn opaque_blit_overwrites_footprint_only() {
    let mut d = display(10, 10);
    let out = blit(&mut d, &sprite(), &BlitRequest::at(2, 3));
    assert!(matches!(
        out,
        BlitOutcome::Drawn {
            path: CompositePath::Opaque,
            isolated: false,
            ..
        }
    ));
    assert_eq!(d.pixel(2, 3), TRANS_COLOR);
    assert_eq!(d.pixel(3, 3), INK);
    assert_eq!(d.pixel(5, 6), INK);
    assert_eq!(d.pixel(6, 3), BG);
    assert_eq!(d.pixel(1, 3), BG);
}

#[test]
fn masked_blit_leaves_keyed_pixels_untouched() {
    let mut s = sprite();
    s.set_mask(true);
    let mut d = display(6, 6);
    assert!(blit(&mut d, &s, &BlitRequest::at(1, 1)).is_drawn());
    assert_eq!(d.pixel(1, 1), BG);
    assert_eq!(d.pixel(2, 1), INK);
}

#[test]
fn translucent_blit_blends_uniformly() {
    let mut s = PixelSurface::new();
    s.resize(2, 2);
    s.fill(map_rgb(200, 0, 0));
    s.set_alpha(128, false);
    let mut d = PixelSurface::new();
    d.resize(2, 2);
    d.fill(map_rgb(0, 0, 0));

    blit(&mut d, &s, &BlitRequest::at(0, 0));
    for (x, y) in [(0, 0), (1, 1)] {
        assert!(close(d.pixel(x, y), map_rgb(100, 0, 0), 1), "{:08x}", d.pixel(x, y));
    }
}

#[test]
fn zero_alpha_paints_nothing() {
    let mut s = sprite();
    s.set_alpha(0, false);
    let mut d = display(4, 4);
    let before = d.pixels().to_vec();
    blit(&mut d, &s, &BlitRequest::at(0, 0));
    assert_eq!(d.pixels(), before.as_slice());
}

#[test]
fn masked_translucent_fades_masked_result() {
    let mut s = sprite();
    s.set_mask(true);
    s.set_alpha(128, false);
    let mut d = display(4, 4);

    let out = blit(&mut d, &s, &BlitRequest::at(0, 0));
    assert!(matches!(
        out,
        BlitOutcome::Drawn {
            path: CompositePath::MaskedTranslucent,
            ..
        }
    ));
    assert_eq!(d.pixel(0, 2), BG);
    let expected = blend_argb(BG, INK, 128.0 / 255.0);
    assert!(close(d.pixel(2, 2), expected, 1));
}

#[test]
fn truncated_clip_goes_through_isolated_layer() {
    let mut d = display(10, 10);
    let req = BlitRequest::at(2, 2).with_clip(DrawingArea::new(0, 0, 4, 10));
    let out = blit(&mut d, &sprite(), &req);
    match out {
        BlitOutcome::Drawn {
            isolated,
            resolution,
            ..
        } => {
            assert!(isolated);
            assert_eq!(resolution.dstrect, DrawingArea::new(2, 2, 2, 4));
            assert_eq!(resolution.srcrect, DrawingArea::new(0, 0, 2, 4));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(d.pixel(2, 2), TRANS_COLOR);
    assert_eq!(d.pixel(3, 5), INK);
    assert_eq!(d.pixel(4, 2), BG);
    assert_eq!(d.pixel(5, 5), BG);
}

#[test]
fn isolated_translucent_matches_direct_within_rounding() {
    let mut s = sprite();
    s.set_alpha(90, false);

    let mut direct = display(8, 8);
    blit(&mut direct, &s, &BlitRequest::at(1, 1));

    let mut clipped = display(8, 8);
    let req = BlitRequest::at(1, 1).with_clip(DrawingArea::new(0, 0, 8, 3));
    blit(&mut clipped, &s, &req);

    for x in 0..8 {
        for y in 0..3 {
            assert!(close(direct.pixel(x, y), clipped.pixel(x, y), 1), "({x},{y})");
        }
        for y in 3..8 {
            assert_eq!(clipped.pixel(x, y), BG);
        }
    }
}

#[test]
fn exact_clip_stays_single_pass() {
    let mut d = display(8, 8);
    let req = BlitRequest::at(1, 1).with_clip(DrawingArea::new(1, 1, 4, 4));
    match blit(&mut d, &sprite(), &req) {
        BlitOutcome::Drawn { isolated, .. } => assert!(!isolated),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn source_area_selects_sub_rectangle() {
    let mut d = display(6, 6);
    let req = BlitRequest::at(0, 0).with_source_area(DrawingArea::new(1, 0, 2, 2));
    blit(&mut d, &sprite(), &req);
    assert_eq!(d.pixel(0, 0), INK);
    assert_eq!(d.pixel(1, 1), INK);
    assert_eq!(d.pixel(2, 0), BG);
}

#[test]
fn blit_off_the_edge_is_clamped() {
    let mut d = display(3, 3);
    assert!(blit(&mut d, &sprite(), &BlitRequest::at(-2, 1)).is_drawn());
    assert_eq!(d.pixel(0, 1), INK);
    assert_eq!(d.pixel(2, 1), BG);
    assert_eq!(d.pixel(0, 0), BG);
}

#[test]
fn degenerate_target_and_empty_draws_are_skipped() {
    let mut nothing = PixelSurface::new();
    assert_eq!(
        blit(&mut nothing, &sprite(), &BlitRequest::at(0, 0)),
        BlitOutcome::Skipped(SkipReason::NoTarget)
    );

    let mut d = display(4, 4);
    assert_eq!(
        blit(&mut d, &PixelSurface::new(), &BlitRequest::at(0, 0)),
        BlitOutcome::Skipped(SkipReason::Empty)
    );
    let req = BlitRequest::at(0, 0).with_clip(DrawingArea::new(10, 10, 2, 2));
    assert_eq!(
        blit(&mut d, &sprite(), &req),
        BlitOutcome::Skipped(SkipReason::Empty)
    );
    assert_eq!(d.generation(), 1);
}

#[test]
fn fill_rect_overwrites_with_source_operator() {
    let mut d = PixelSurface::new();
    d.set_alpha(255, true);
    d.resize(4, 4);
    d.fill(0xFFFF_FFFF);

    let wrote = fill_rect(&mut d, DrawingArea::new(1, 1, 10, 2), 0x8000_00FF, None);
    assert_eq!(wrote, Some(DrawingArea::new(1, 1, 3, 2)));
    assert_eq!(d.pixel(1, 1), 0x8000_00FF);
    assert_eq!(d.pixel(0, 1), 0xFFFF_FFFF);
}

#[test]
fn fill_rect_respects_clip_and_target() {
    let mut d = display(5, 5);
    let wrote = fill_rect(
        &mut d,
        DrawingArea::new(0, 0, 5, 5),
        INK,
        Some(DrawingArea::new(2, 2, 1, 1)),
    );
    assert_eq!(wrote, Some(DrawingArea::new(2, 2, 1, 1)));
    assert_eq!(d.pixel(2, 2), INK);
    assert_eq!(d.pixel(1, 2), BG);

    let mut nothing = PixelSurface::new();
    assert_eq!(
        fill_rect(&mut nothing, DrawingArea::new(0, 0, 1, 1), INK, None),
        None
    );
}

#[test]
fn oversized_source_area_is_clamped_to_source() {
    let mut d = display(8, 8);
    let req = BlitRequest::at(0, 0)
        .with_source_area(DrawingArea::new(0, 0, i32::MAX, i32::MAX))
        .with_clip(DrawingArea::new(0, 0, 8, 8));
    match blit(&mut d, &sprite(), &req) {
        BlitOutcome::Drawn {
            isolated,
            resolution,
            ..
        } => {
            assert!(!isolated);
            assert_eq!(resolution.dstrect, DrawingArea::new(0, 0, 4, 4));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(d.pixel(1, 1), INK);
    assert_eq!(d.pixel(4, 4), BG);
}

#[test]
fn source_area_before_origin_keeps_pixel_placement() {
    let mut d = display(8, 8);
    let mut s = sprite();
    s.set_mask(true);
    s.set_alpha(128, false);
    let req = BlitRequest::at(2, 2)
        .with_source_area(DrawingArea::new(-2, -2, 6, 6))
        .with_clip(DrawingArea::new(0, 0, 5, 8));
    assert!(blit(&mut d, &s, &req).is_drawn());
    // Source (1, 0) lands at (2 + 2 + 1, 2 + 2 + 0), outside the clip.
    assert_eq!(d.pixel(5, 4), BG);
    // Source (0, 0) is keyed out; (4, 4) stays background.
    assert_eq!(d.pixel(4, 4), BG);
    assert_eq!(d.pixel(3, 3), BG);

    let mut d = display(8, 8);
    let req = BlitRequest::at(2, 2).with_source_area(DrawingArea::new(-2, -2, 6, 6));
    assert!(blit(&mut d, &sprite(), &req).is_drawn());
    assert_eq!(d.pixel(5, 4), INK);
    assert_eq!(d.pixel(4, 4), TRANS_COLOR);
    assert_eq!(d.pixel(3, 3), BG);
}
