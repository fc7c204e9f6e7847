use crate::foundation::core::Point3;
use crate::foundation::error::{SurfError, SurfResult};

/// One of the eight corners of an axis-aligned box.
///
/// The discriminant doubles as the corner index: bit 0 selects the right
/// (max x) face, bit 1 the back (max y) face and bit 2 the top (max z) face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum Corner {
    /// min x, min y, min z.
    BottomFrontLeft = 0,
    /// max x, min y, min z.
    BottomFrontRight = 1,
    /// min x, max y, min z.
    BottomBackLeft = 2,
    /// max x, max y, min z.
    BottomBackRight = 3,
    /// min x, min y, max z.
    TopFrontLeft = 4,
    /// max x, min y, max z.
    TopFrontRight = 5,
    /// min x, max y, max z.
    TopBackLeft = 6,
    /// max x, max y, max z.
    TopBackRight = 7,
}

impl Corner {
    /// All corners in index order.
    pub const ALL: [Corner; 8] = [
        Corner::BottomFrontLeft,
        Corner::BottomFrontRight,
        Corner::BottomBackLeft,
        Corner::BottomBackRight,
        Corner::TopFrontLeft,
        Corner::TopFrontRight,
        Corner::TopBackLeft,
        Corner::TopBackRight,
    ];

    /// Index in `0..8`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Corner for an index, if in range.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// On the max-x face.
    pub fn is_right(self) -> bool {
        self.index() & 1 != 0
    }

    /// On the max-y face.
    pub fn is_back(self) -> bool {
        self.index() & 2 != 0
    }

    /// On the max-z face.
    pub fn is_top(self) -> bool {
        self.index() & 4 != 0
    }
}

/// Box geometry owned by the host's model objects.
///
/// Editing is a two-step protocol: mutate corners with
/// [`set_point`](Self::set_point), then call
/// [`recompute_bbox`](Self::recompute_bbox). Until the recompute, `min` and
/// `max` keep returning the previous (stale) extents.
pub trait BoxGeometry {
    /// Current position of `corner`.
    fn point(&self, corner: Corner) -> Point3;

    /// Move `corner` without touching the cached extents.
    fn set_point(&mut self, corner: Corner, p: Point3);

    /// Cached per-axis minimum.
    fn min(&self) -> Point3;

    /// Cached per-axis maximum.
    fn max(&self) -> Point3;

    /// Refresh `min`/`max` from the corner points.
    fn recompute_bbox(&mut self);

    /// `max - min` per axis.
    fn extent(&self) -> Point3 {
        self.max() - self.min()
    }
}

/// Plain eight-point box implementing [`BoxGeometry`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapeBox {
    points: [Point3; 8],
    min: Point3,
    max: Point3,
}

impl ShapeBox {
    /// Box spanning `min..=max`. Every component of `min` must not exceed `max`.
    pub fn from_extents(min: Point3, max: Point3) -> SurfResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(SurfError::geometry(format!(
                "box min {min:?} exceeds max {max:?}"
            )));
        }
        let points = Corner::ALL.map(|c| {
            Point3::new(
                if c.is_right() { max.x } else { min.x },
                if c.is_back() { max.y } else { min.y },
                if c.is_top() { max.z } else { min.z },
            )
        });
        Ok(Self { points, min, max })
    }

    /// Corner points in [`Corner`] index order.
    pub fn points(&self) -> &[Point3; 8] {
        &self.points
    }
}

impl BoxGeometry for ShapeBox {
    fn point(&self, corner: Corner) -> Point3 {
        self.points[corner.index()]
    }

    fn set_point(&mut self, corner: Corner, p: Point3) {
        self.points[corner.index()] = p;
    }

    fn min(&self) -> Point3 {
        self.min
    }

    fn max(&self) -> Point3 {
        self.max
    }

    fn recompute_bbox(&mut self) {
        let first = self.points[0];
        let (min, max) = self.points[1..]
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        self.min = min;
        self.max = max;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/shape.rs"]
mod tests;
