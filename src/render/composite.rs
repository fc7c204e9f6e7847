use crate::foundation::core::{Argb, map_color, unmap_color};
use crate::foundation::math::{div_alpha_u8, mul_div255_u8};

pub type PremulRgba8 = [u8; 4];

pub fn premultiply(c: Argb) -> PremulRgba8 {
    let (r, g, b, a) = unmap_color(c);
    let a16 = u16::from(a);
    [
        mul_div255(u16::from(r), a16),
        mul_div255(u16::from(g), a16),
        mul_div255(u16::from(b), a16),
        a,
    ]
}

pub fn unpremultiply(p: PremulRgba8) -> Argb {
    let a = p[3];
    if a == 0 {
        return 0;
    }
    if a == u8::MAX {
        return map_color(p[0], p[1], p[2], a);
    }
    map_color(
        div_alpha_u8(p[0], a),
        div_alpha_u8(p[1], a),
        div_alpha_u8(p[2], a),
        a,
    )
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn blend_argb(dst: Argb, src: Argb, opacity: f32) -> Argb {
    if opacity >= 1.0 && src >> 24 == 0xFF {
        return src;
    }
    unpremultiply(over(premultiply(dst), premultiply(src), opacity))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
