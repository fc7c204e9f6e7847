use crate::editor::drag::Drag;
use crate::editor::handles::{EditMode, HandleKind, HandleLayout};
use crate::editor::shape::BoxGeometry;
use crate::foundation::config::RenderConfig;
use crate::foundation::core::{Argb, DrawingArea, Point};
use crate::render::blit::fill_rect;
use crate::surface::pixel::PixelSurface;

/// Interactive shape-edit overlay: handle layout, picking and dragging.
///
/// The editor never owns the shape; the host passes it in on every call.
#[derive(Clone, Debug)]
pub struct ShapeEditor {
    layout: HandleLayout,
    anchor: (i32, i32),
    scale: i32,
    active: Option<HandleKind>,
    last: (i32, i32),
}

impl ShapeEditor {
    /// Editor in `mode` using the handle size from `config`.
    pub fn new(mode: EditMode, config: &RenderConfig) -> Self {
        Self {
            layout: HandleLayout::from_config(mode, config),
            anchor: (0, 0),
            scale: 1,
            active: None,
            last: (0, 0),
        }
    }

    /// Current handle layout.
    pub fn layout(&self) -> &HandleLayout {
        &self.layout
    }

    /// Handle being dragged, if any.
    pub fn active(&self) -> Option<HandleKind> {
        self.active
    }

    /// Zoom factor in effect.
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Move the screen anchor or change zoom, then re-layout.
    pub fn set_view<G: BoxGeometry + ?Sized>(
        &mut self,
        shape: &G,
        anchor_x: i32,
        anchor_y: i32,
        scale: i32,
    ) {
        self.anchor = (anchor_x, anchor_y);
        self.scale = scale.max(1);
        self.relayout(shape);
    }

    /// Change zoom only, keeping the anchor.
    pub fn set_scale<G: BoxGeometry + ?Sized>(&mut self, shape: &G, scale: i32) {
        let (x, y) = self.anchor;
        self.set_view(shape, x, y, scale);
    }

    /// Switch between box and point editing. Cancels any drag in progress.
    pub fn set_mode<G: BoxGeometry + ?Sized>(&mut self, shape: &G, mode: EditMode) {
        self.active = None;
        self.layout.set_mode(mode);
        self.relayout(shape);
    }

    /// Recompute handle positions for the shape's current extents.
    pub fn relayout<G: BoxGeometry + ?Sized>(&mut self, shape: &G) {
        let (x, y) = self.anchor;
        self.layout.compute(shape, x, y, self.scale);
    }

    /// Start a drag if `(x, y)` is over a handle.
    pub fn press(&mut self, x: i32, y: i32) -> Option<HandleKind> {
        self.active = self
            .layout
            .hit_test(Point::new(f64::from(x), f64::from(y)));
        self.last = (x, y);
        self.active
    }

    /// Continue the active drag to `(x, y)`.
    ///
    /// Returns `true` when the shape changed and the overlay needs a redraw.
    /// Motion too small to move the shape at the current zoom is kept and
    /// added to the next call.
    pub fn drag_to<G: BoxGeometry + ?Sized>(
        &mut self,
        shape: &mut G,
        x: i32,
        y: i32,
        depth: bool,
    ) -> bool {
        let Some(kind) = self.active else {
            return false;
        };
        let drag = Drag {
            kind,
            dx: x - self.last.0,
            dy: y - self.last.1,
            scale: self.scale,
            depth,
        };
        if !drag.apply(shape) {
            return false;
        }
        // Keep the remainder lost to zoom truncation for the next call.
        let s = self.scale;
        self.last.0 += drag.dx / s * s;
        self.last.1 += drag.dy / s * s;
        self.relayout(shape);
        true
    }

    /// End the active drag.
    pub fn release(&mut self) -> Option<HandleKind> {
        self.active.take()
    }

    /// Paint every handle as an opaque square of `color` onto `target`.
    ///
    /// Returns how many markers were at least partly visible.
    pub fn draw_handles(
        &self,
        target: &mut PixelSurface,
        color: Argb,
        clip: Option<DrawingArea>,
    ) -> usize {
        let size = self.layout.handle_size();
        self.layout
            .handles()
            .iter()
            .filter(|h| fill_rect(target, h.marker(size), color, clip).is_some())
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
