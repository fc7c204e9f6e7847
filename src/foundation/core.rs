use std::str::FromStr;

use crate::foundation::error::{SurfError, SurfResult};

pub use kurbo::{Affine, Point, Rect, Size};

/// Packed 32-bit color, `0xAARRGGBB` from most- to least-significant byte.
pub type Argb = u32;

pub const TRANS_COLOR: Argb = 0xFFFF_00FF;

pub const OPAQUE_ALPHA: Argb = 0xFF00_0000;

pub fn map_color(r: u8, g: u8, b: u8, a: u8) -> Argb {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn map_rgb(r: u8, g: u8, b: u8) -> Argb {
    map_color(r, g, b, 0xFF)
}

pub fn unmap_color(argb: Argb) -> (u8, u8, u8, u8) {
    (
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    )
}

/// Parse `RRGGBB`/`AARRGGBB` hex, with an optional `0x` or `#` prefix.
///
/// Six-digit input is treated as opaque.
pub fn parse_argb(s: &str) -> SurfResult<Argb> {
    let t = s.trim();
    let digits = t
        .strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .or_else(|| t.strip_prefix('#'))
        .unwrap_or(t);
    let v = u32::from_str_radix(digits, 16)
        .map_err(|e| SurfError::validation(format!("invalid color '{s}': {e}")))?;
    match digits.len() {
        6 => Ok(OPAQUE_ALPHA | v),
        8 => Ok(v),
        _ => Err(SurfError::validation(format!(
            "invalid color '{s}': expected 6 or 8 hex digits"
        ))),
    }
}

/// Integer rectangle in some surface's coordinate space.
///
/// `length` is the horizontal extent and `height` the vertical one; both are
/// kept non-negative.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DrawingArea {
    pub x: i32,
    pub y: i32,
    pub length: i32,
    pub height: i32,
}

impl DrawingArea {
    pub const fn new(x: i32, y: i32, length: i32, height: i32) -> Self {
        Self {
            x,
            y,
            length: if length < 0 { 0 } else { length },
            height: if height < 0 { 0 } else { height },
        }
    }

    pub const fn of_size(length: i32, height: i32) -> Self {
        Self::new(0, 0, length, height)
    }

    pub fn right(self) -> i32 {
        self.x.saturating_add(self.length)
    }

    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.length <= 0 || self.height <= 0
    }

    pub fn contains(self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    pub fn intersect(self, other: Self) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    pub fn is_truncated_by(self, inner: Self) -> bool {
        inner.x > self.x
            || inner.y > self.y
            || inner.right() < self.right()
            || inner.bottom() < self.bottom()
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

impl FromStr for DrawingArea {
    type Err = SurfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = parse_ints::<4>(s, "x,y,length,height")?;
        if v[2] < 0 || v[3] < 0 {
            return Err(SurfError::validation(format!(
                "area '{s}' has a negative extent"
            )));
        }
        Ok(Self::new(v[0], v[1], v[2], v[3]))
    }
}

/// Integer point in model space (x right, y back, z up).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn min(self, o: Self) -> Self {
        Self::new(self.x.min(o.x), self.y.min(o.y), self.z.min(o.z))
    }

    pub fn max(self, o: Self) -> Self {
        Self::new(self.x.max(o.x), self.y.max(o.y), self.z.max(o.z))
    }
}

impl std::ops::Add for Point3 {
    type Output = Self;

    fn add(self, o: Self) -> Self {
        Self::new(
            self.x.saturating_add(o.x),
            self.y.saturating_add(o.y),
            self.z.saturating_add(o.z),
        )
    }
}

impl std::ops::Sub for Point3 {
    type Output = Self;

    fn sub(self, o: Self) -> Self {
        Self::new(
            self.x.saturating_sub(o.x),
            self.y.saturating_sub(o.y),
            self.z.saturating_sub(o.z),
        )
    }
}

impl FromStr for Point3 {
    type Err = SurfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = parse_ints::<3>(s, "x,y,z")?;
        Ok(Self::new(v[0], v[1], v[2]))
    }
}

pub(crate) fn parse_ints<const N: usize>(s: &str, shape: &str) -> SurfResult<[i32; N]> {
    let mut out = [0i32; N];
    let mut parts = s.split(',');
    for slot in &mut out {
        let part = parts
            .next()
            .ok_or_else(|| SurfError::validation(format!("expected '{shape}', got '{s}'")))?;
        *slot = part
            .trim()
            .parse::<i32>()
            .map_err(|e| SurfError::validation(format!("invalid integer in '{s}': {e}")))?;
    }
    if parts.next().is_some() {
        return Err(SurfError::validation(format!(
            "expected '{shape}', got '{s}'"
        )));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
