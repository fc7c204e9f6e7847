//! surfkit is the raster layer shared by content editors.
//!
//! - [`PixelSurface`]: pixel buffer with optional color-keyed mask, per-surface
//!   opacity, mirroring and PNG codec glue
//! - [`resolve_clip`]: source/destination rectangles for a clipped draw
//! - [`blit`] / [`fill_rect`]: compositing onto another surface or the display
//! - [`HandleLayout`] / [`ShapeEditor`]: screen-space handles for editing a 3D box
//!
//! Everything is synchronous and single-threaded from the caller's point of view.
#![forbid(unsafe_code)]

mod editor;
mod foundation;
mod render;
mod surface;

pub use crate::foundation::config::{
    ENV_HANDLE_SIZE, ENV_TRANS_COLOR, RenderConfig, RenderContext,
};
pub use crate::foundation::core::{
    Argb, DrawingArea, OPAQUE_ALPHA, Point, Point3, Rect, TRANS_COLOR, map_color, map_rgb,
    parse_argb, unmap_color,
};
pub use crate::foundation::error::{SurfError, SurfResult};

pub use crate::surface::pixel::{
    COVERAGE_CLEAR, COVERAGE_OPAQUE, PixelFormat, PixelLock, PixelSurface,
};

pub use crate::render::blit::{
    BlitOutcome, BlitRequest, CompositePath, SkipReason, blit, fill_rect,
};
pub use crate::render::clip::{ClipResolution, resolve_clip, resolve_fill};
pub use crate::render::composite::blend_argb;

pub use crate::editor::drag::Drag;
pub use crate::editor::handles::{EditMode, Handle, HandleKind, HandleLayout};
pub use crate::editor::session::ShapeEditor;
pub use crate::editor::shape::{BoxGeometry, Corner, ShapeBox};
