pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Inverse of premultiplication: `c * 255 / a`, rounded and clamped.
pub(crate) fn div_alpha_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let c = u32::from(c);
    let a = u32::from(a);
    ((c * 255 + a / 2) / a).min(255) as u8
}

/// Scale a `0..=255` opacity into `0.0..=1.0`.
pub(crate) fn alpha_to_unit(alpha: u8) -> f32 {
    f32::from(alpha) / 255.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
