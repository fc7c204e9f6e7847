use smallvec::SmallVec;

use crate::editor::shape::{BoxGeometry, Corner};
use crate::foundation::config::RenderConfig;
use crate::foundation::core::{DrawingArea, Point, Rect, Size};

/// Which handle set the shape editor shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EditMode {
    /// Four handles: position plus one per axis extent.
    #[default]
    BoundingBox,
    /// One handle per corner point.
    Points,
}

/// Degree of freedom a handle edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HandleKind {
    /// Moves the whole box.
    Position,
    /// Right face along X.
    Length,
    /// Back face along Y.
    Width,
    /// Top face along Z.
    Height,
    /// A single corner (point mode).
    Corner(Corner),
}

/// A handle marker's top-left corner in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Handle {
    /// What dragging this handle edits.
    pub kind: HandleKind,
    /// Marker left edge.
    pub x: i32,
    /// Marker top edge.
    pub y: i32,
}

impl Handle {
    /// Square marker area of edge `size`.
    pub fn marker(&self, size: i32) -> DrawingArea {
        DrawingArea::new(self.x, self.y, size, size)
    }

    /// Hit region of edge `size`, half-open.
    pub fn hit_rect(&self, size: i32) -> Rect {
        Rect::from_origin_size(
            Point::new(f64::from(self.x), f64::from(self.y)),
            Size::new(f64::from(size), f64::from(size)),
        )
    }
}

/// Screen-space handle positions for one box at one zoom level.
///
/// Handles are ephemeral: call [`compute`](Self::compute) again whenever the
/// shape, the anchor or the zoom changes.
#[derive(Clone, Debug)]
pub struct HandleLayout {
    mode: EditMode,
    handle_size: i32,
    scale: i32,
    handles: SmallVec<[Handle; 8]>,
}

impl HandleLayout {
    /// Empty layout for `mode` with square markers of edge `handle_size`.
    pub fn new(mode: EditMode, handle_size: i32) -> Self {
        Self {
            mode,
            handle_size,
            scale: 1,
            handles: SmallVec::new(),
        }
    }

    /// Empty layout sized from `config`.
    pub fn from_config(mode: EditMode, config: &RenderConfig) -> Self {
        Self::new(mode, config.handle_size)
    }

    /// Active mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switch mode. Clears the handles until the next `compute`.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode != self.mode {
            self.mode = mode;
            self.handles.clear();
        }
    }

    /// Marker edge in pixels.
    pub fn handle_size(&self) -> i32 {
        self.handle_size
    }

    /// Zoom used by the last `compute`.
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Handles from the last `compute`, in hit-test priority order.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Handle of the given kind, if present in the current mode.
    pub fn handle(&self, kind: HandleKind) -> Option<&Handle> {
        self.handles.iter().find(|h| h.kind == kind)
    }

    /// Recompute handle positions for `shape` drawn with its origin at
    /// `(anchor_x, anchor_y)` and zoom `scale` (clamped to at least 1).
    pub fn compute<G: BoxGeometry + ?Sized>(
        &mut self,
        shape: &G,
        anchor_x: i32,
        anchor_y: i32,
        scale: i32,
    ) {
        self.scale = scale.max(1);
        let offset = self.handle_size / 2;
        self.handles = match self.mode {
            EditMode::BoundingBox => bbox_handles(shape, anchor_x, anchor_y, self.scale, offset),
            EditMode::Points => point_handles(shape, anchor_x, anchor_y, self.scale, offset),
        };
    }

    /// First handle whose marker contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<HandleKind> {
        self.handles
            .iter()
            .find(|h| h.hit_rect(self.handle_size).contains(p))
            .map(|h| h.kind)
    }
}

fn bbox_handles<G: BoxGeometry + ?Sized>(
    shape: &G,
    x: i32,
    y: i32,
    scale: i32,
    offset: i32,
) -> SmallVec<[Handle; 8]> {
    let (min, max) = (shape.min(), shape.max());
    let length = (max.x - min.x) * scale;
    let width = (max.y - min.y) * scale;
    let height = (max.z - min.z) * scale;

    // Top of the box on screen: anchor raised by the box height.
    let left = x - offset;
    let top = y - offset - height;

    smallvec::smallvec![
        Handle {
            kind: HandleKind::Position,
            x: left,
            y: top,
        },
        Handle {
            kind: HandleKind::Length,
            x: left + length,
            y: top + width / 2,
        },
        Handle {
            kind: HandleKind::Width,
            x: left + length / 2,
            y: top + width,
        },
        Handle {
            kind: HandleKind::Height,
            x: left + length / 2,
            y: top,
        },
    ]
}

fn point_handles<G: BoxGeometry + ?Sized>(
    shape: &G,
    x: i32,
    y: i32,
    scale: i32,
    offset: i32,
) -> SmallVec<[Handle; 8]> {
    Corner::ALL
        .iter()
        .map(|&c| {
            let p = shape.point(c);
            Handle {
                kind: HandleKind::Corner(c),
                x: x - offset + p.x * scale,
                y: y - offset + (p.y - p.z) * scale,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/editor/handles.rs"]
mod tests;
