use crate::editor::handles::HandleKind;
use crate::editor::shape::{BoxGeometry, Corner};
use crate::foundation::core::Point3;

/// Screen-space drag of one handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drag {
    /// Handle being dragged.
    pub kind: HandleKind,
    /// Horizontal screen delta in pixels.
    pub dx: i32,
    /// Vertical screen delta in pixels (down is positive).
    pub dy: i32,
    /// Current zoom; deltas are divided by it before reaching model space.
    pub scale: i32,
    /// Route the horizontal delta to Z instead (position and corner handles).
    pub depth: bool,
}

impl Drag {
    /// Model-space offset this drag applies to each affected corner.
    ///
    /// Integer division truncates toward zero, so small deltas at high zoom
    /// produce [`Point3::ZERO`].
    pub fn offset(&self) -> Point3 {
        let s = self.scale.max(1);
        let (mx, my) = (self.dx / s, self.dy / s);
        match self.kind {
            HandleKind::Position | HandleKind::Corner(_) if self.depth => Point3::new(0, 0, mx),
            HandleKind::Position | HandleKind::Corner(_) => Point3::new(mx, my, 0),
            HandleKind::Length => Point3::new(mx, 0, 0),
            HandleKind::Width => Point3::new(0, my, 0),
            // Screen y grows downward, model z grows upward.
            HandleKind::Height => Point3::new(0, 0, -my),
        }
    }

    /// Return `true` if `corner` moves under this drag.
    pub fn moves(&self, corner: Corner) -> bool {
        match self.kind {
            HandleKind::Position => true,
            HandleKind::Length => corner.is_right(),
            HandleKind::Width => corner.is_back(),
            HandleKind::Height => corner.is_top(),
            HandleKind::Corner(c) => c == corner,
        }
    }

    /// Apply to `shape` and recompute its bounding box.
    ///
    /// Returns `false` without touching the shape when the offset truncates
    /// to zero; callers skip the redraw in that case.
    pub fn apply<G: BoxGeometry + ?Sized>(&self, shape: &mut G) -> bool {
        let off = self.offset();
        if off.is_zero() {
            return false;
        }
        for c in Corner::ALL {
            if self.moves(c) {
                let p = shape.point(c);
                shape.set_point(c, p + off);
            }
        }
        shape.recompute_bbox();
        tracing::debug!(kind = ?self.kind, ?off, "shape edited");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/drag.rs"]
mod tests;
