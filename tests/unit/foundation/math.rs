use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn div_alpha_inverts_premultiply_at_full_alpha() {
    for c in [0u8, 1, 100, 254, 255] {
        assert_eq!(div_alpha_u8(mul_div255_u8(u16::from(c), 255), 255), c);
    }
    assert_eq!(div_alpha_u8(50, 0), 0);
}

#[test]
fn alpha_to_unit_spans_range() {
    assert_eq!(alpha_to_unit(0), 0.0);
    assert_eq!(alpha_to_unit(255), 1.0);
}
