use crate::foundation::core::DrawingArea;

/// Rectangles resolved for a single draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClipResolution {
    /// Full draw footprint before clipping, in target space.
    pub requested: DrawingArea,
    /// Region of the source surface to read, in source space.
    pub srcrect: DrawingArea,
    /// Region of the destination to write, in target space.
    pub dstrect: DrawingArea,
    /// `true` when the clip cut at least one edge of `requested`; the paint
    /// must then be built offscreen before it is clipped.
    pub truncated: bool,
}

impl ClipResolution {
    /// Return `true` when the draw paints nothing.
    pub fn is_empty(&self) -> bool {
        self.dstrect.is_empty()
    }
}

/// Resolve a draw of `source` (a sub-rectangle of the source surface) whose
/// top-left lands at `(x, y)` on the target.
///
/// `clip` is expressed in target space. `dstrect` is always `srcrect`
/// translated back by the draw position (`(x, y)` minus the source offset).
pub fn resolve_clip(
    x: i32,
    y: i32,
    source: DrawingArea,
    clip: Option<DrawingArea>,
) -> ClipResolution {
    let requested = DrawingArea::new(x, y, source.length, source.height);
    let visible = match clip {
        Some(c) => requested.intersect(c),
        None => requested,
    };

    let (dx, dy) = (x.saturating_sub(source.x), y.saturating_sub(source.y));
    let srcrect = visible.translate(-dx, -dy);
    let dstrect = srcrect.translate(dx, dy);

    ClipResolution {
        requested,
        srcrect,
        dstrect,
        truncated: !visible.is_empty() && requested.is_truncated_by(visible),
    }
}

/// Resolve a fill of `area`, optionally restricted to `clip`.
pub fn resolve_fill(area: DrawingArea, clip: Option<DrawingArea>) -> DrawingArea {
    match clip {
        Some(c) => area.intersect(c),
        None => area,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/clip.rs"]
mod tests;
