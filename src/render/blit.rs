use crate::foundation::core::{Argb, DrawingArea};
use crate::foundation::math::alpha_to_unit;
use crate::render::clip::{ClipResolution, resolve_clip, resolve_fill};
use crate::render::composite::blend_argb;
use crate::surface::pixel::{COVERAGE_CLEAR, PixelSurface};

/// Where and how much of a source surface to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlitRequest {
    /// Target-space x of the drawn region's left edge.
    pub x: i32,
    /// Target-space y of the drawn region's top edge.
    pub y: i32,
    /// Sub-rectangle of the source to draw; the whole source when `None`.
    pub source_area: Option<DrawingArea>,
    /// Target-space clip rectangle.
    pub clip: Option<DrawingArea>,
}

impl BlitRequest {
    /// Draw the whole source at `(x, y)`, unclipped.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Draw only `area` of the source.
    pub fn with_source_area(mut self, area: DrawingArea) -> Self {
        self.source_area = Some(area);
        self
    }

    /// Restrict writes to `clip` (target space).
    pub fn with_clip(mut self, clip: DrawingArea) -> Self {
        self.clip = Some(clip);
        self
    }
}

/// Compositing strategy picked from the source surface's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CompositePath {
    /// No mask, full opacity: paint straight over the destination.
    Opaque,
    /// Mask, full opacity: pixels with zero coverage leave the destination untouched.
    Masked,
    /// No mask, partial opacity: uniform blend by the surface alpha.
    Translucent,
    /// Mask and partial opacity: masked result built opaque first, then faded as a whole.
    MaskedTranslucent,
}

impl CompositePath {
    /// Pick the path for drawing `src`.
    pub fn select(src: &PixelSurface) -> Self {
        match (src.is_masked(), src.alpha() == u8::MAX) {
            (false, true) => Self::Opaque,
            (true, true) => Self::Masked,
            (false, false) => Self::Translucent,
            (true, false) => Self::MaskedTranslucent,
        }
    }
}

/// Why a draw painted nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SkipReason {
    /// Destination has no backing buffer.
    NoTarget,
    /// Resolved rectangle (or the source) has no area.
    Empty,
}

/// Result of a [`blit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum BlitOutcome {
    /// Nothing was painted.
    Skipped(SkipReason),
    /// Pixels were composited.
    Drawn {
        /// Strategy used.
        path: CompositePath,
        /// `true` if the paint went through an offscreen group because the
        /// clip truncated the request.
        isolated: bool,
        /// Rectangles used.
        resolution: ClipResolution,
    },
}

impl BlitOutcome {
    /// Return `true` if any pixel was composited.
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

/// Composite `src` onto `dst` as described by `req`.
///
/// When the clip truncates the request the whole requested region is first
/// painted into an isolated transparent layer, and only the visible part of
/// that layer is composited onto `dst`.
#[tracing::instrument(level = "debug", skip(dst, src))]
pub fn blit(dst: &mut PixelSurface, src: &PixelSurface, req: &BlitRequest) -> BlitOutcome {
    if dst.is_degenerate() {
        tracing::warn!("blit target has no backing buffer; skipping draw");
        return BlitOutcome::Skipped(SkipReason::NoTarget);
    }
    if src.is_degenerate() {
        return BlitOutcome::Skipped(SkipReason::Empty);
    }

    // Only pixels the source actually has can land; shift the draw position
    // by whatever was cut off the leading edges.
    let (source_area, x, y) = match req.source_area {
        Some(area) => {
            let kept = area.intersect(src.area());
            (
                kept,
                req.x.saturating_add(kept.x.saturating_sub(area.x)),
                req.y.saturating_add(kept.y.saturating_sub(area.y)),
            )
        }
        None => (src.area(), req.x, req.y),
    };
    if source_area.is_empty() {
        return BlitOutcome::Skipped(SkipReason::Empty);
    }
    let resolution = resolve_clip(x, y, source_area, req.clip);
    if resolution.is_empty() {
        return BlitOutcome::Skipped(SkipReason::Empty);
    }

    let path = CompositePath::select(src);
    if resolution.truncated {
        let requested = resolution.requested;
        let mut group = scratch_layer(requested, src);
        paint(&mut group, src, path, source_area, 0, 0);
        let visible = resolution
            .dstrect
            .translate(-requested.x, -requested.y);
        paint_pixels(
            dst,
            &group,
            visible,
            resolution.dstrect.x,
            resolution.dstrect.y,
            false,
            1.0,
        );
    } else {
        paint(
            dst,
            src,
            path,
            resolution.srcrect,
            resolution.dstrect.x,
            resolution.dstrect.y,
        );
    }

    tracing::debug!(?path, isolated = resolution.truncated, "blit drawn");
    BlitOutcome::Drawn {
        path,
        isolated: resolution.truncated,
        resolution,
    }
}

/// SOURCE-fill an area of `dst` with `color`, optionally clipped.
///
/// Returns the area actually written, or `None` when nothing was painted.
pub fn fill_rect(
    dst: &mut PixelSurface,
    area: DrawingArea,
    color: Argb,
    clip: Option<DrawingArea>,
) -> Option<DrawingArea> {
    if dst.is_degenerate() {
        tracing::warn!("fill target has no backing buffer; skipping draw");
        return None;
    }
    let target = resolve_fill(area, clip).intersect(dst.area());
    if target.is_empty() {
        return None;
    }
    dst.lock().fill_area(target, color);
    Some(target)
}

fn paint(
    dst: &mut PixelSurface,
    src: &PixelSurface,
    path: CompositePath,
    srcrect: DrawingArea,
    dst_x: i32,
    dst_y: i32,
) {
    let opacity = alpha_to_unit(src.alpha());
    match path {
        CompositePath::Opaque => paint_pixels(dst, src, srcrect, dst_x, dst_y, false, 1.0),
        CompositePath::Masked => paint_pixels(dst, src, srcrect, dst_x, dst_y, true, 1.0),
        CompositePath::Translucent => {
            paint_pixels(dst, src, srcrect, dst_x, dst_y, false, opacity)
        }
        CompositePath::MaskedTranslucent => {
            let mut layer = scratch_layer(srcrect, src);
            paint_pixels(&mut layer, src, srcrect, 0, 0, true, 1.0);
            let whole = layer.area();
            paint_pixels(dst, &layer, whole, dst_x, dst_y, false, opacity);
        }
    }
}

fn paint_pixels(
    dst: &mut PixelSurface,
    src: &PixelSurface,
    srcrect: DrawingArea,
    dst_x: i32,
    dst_y: i32,
    masked: bool,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    // Only pixels that exist on both sides are touched.
    let (ox, oy) = (dst_x - srcrect.x, dst_y - srcrect.y);
    let writable = srcrect
        .intersect(src.area())
        .translate(ox, oy)
        .intersect(dst.area());
    if writable.is_empty() {
        return;
    }

    let mut px = dst.lock();
    for y in writable.y..writable.bottom() {
        for x in writable.x..writable.right() {
            let (sx, sy) = (x - ox, y - oy);
            if masked && src.coverage(sx, sy) == COVERAGE_CLEAR {
                continue;
            }
            let out = blend_argb(px.get_pixel(x, y), src.pixel(sx, sy), opacity);
            px.put_pixel(x, y, out);
        }
    }
}

fn scratch_layer(size: DrawingArea, like: &PixelSurface) -> PixelSurface {
    let mut layer = PixelSurface::with_trans_color(like.trans_color());
    layer.set_alpha(u8::MAX, true);
    layer.resize(size.length.max(0) as u32, size.height.max(0) as u32);
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
