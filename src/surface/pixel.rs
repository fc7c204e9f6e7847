use rayon::prelude::*;

use crate::foundation::core::{Affine, Argb, DrawingArea, OPAQUE_ALPHA, Point, TRANS_COLOR};

/// Mask coverage for a fully transparent pixel.
pub const COVERAGE_CLEAR: u8 = 0;
/// Mask coverage for a fully opaque pixel.
pub const COVERAGE_OPAQUE: u8 = u8::MAX;

/// Storage layout of a surface's pixel words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// `0xAARRGGBB` with a meaningful (straight) alpha byte.
    Argb32,
    /// `0xXXRRGGBB`; the top byte always reads back as `0xFF`.
    Rgb24,
}

impl PixelFormat {
    /// Return `true` for formats carrying a per-pixel alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Argb32)
    }

    fn normalize(self, c: Argb) -> Argb {
        match self {
            Self::Argb32 => c,
            Self::Rgb24 => c | OPAQUE_ALPHA,
        }
    }

    fn blank(self) -> Argb {
        match self {
            Self::Argb32 => 0,
            Self::Rgb24 => OPAQUE_ALPHA,
        }
    }
}

/// In-memory raster with an optional color-keyed mask and a per-surface opacity.
///
/// Pixels are stored row-major, one [`Argb`] word each, with a stride of
/// exactly `width` words. When masking is on, the mask holds one coverage
/// byte per pixel and always has `width * height` entries.
///
/// Cloning deep-copies both the pixel and the mask buffer.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<Argb>,
    mask: Option<Vec<u8>>,
    alpha: u8,
    trans_color: Argb,
    mirrored_x: bool,
    mirrored_y: bool,
    generation: u64,
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::with_trans_color(TRANS_COLOR)
    }
}

impl PixelSurface {
    /// Empty (zero-size) opaque surface keyed to [`TRANS_COLOR`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty surface whose masks are built against `trans_color`.
    pub fn with_trans_color(trans_color: Argb) -> Self {
        Self {
            width: 0,
            height: 0,
            format: PixelFormat::Rgb24,
            pixels: Vec::new(),
            mask: None,
            alpha: u8::MAX,
            trans_color,
            mirrored_x: false,
            mirrored_y: false,
            generation: 0,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Whole-surface area at the origin.
    pub fn area(&self) -> DrawingArea {
        DrawingArea::of_size(
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    /// Return `true` if the surface has no pixels (and therefore no buffer).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel storage layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Return `true` once the buffer carries a per-pixel alpha channel.
    pub fn has_alpha_channel(&self) -> bool {
        self.format.has_alpha()
    }

    /// Per-surface opacity, `0` transparent to `255` opaque.
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Return `true` while a color-key mask is attached.
    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    /// Color-key used to build the mask.
    pub fn trans_color(&self) -> Argb {
        self.trans_color
    }

    /// Return `true` if the content has been flipped horizontally an odd number of times.
    pub fn is_mirrored_x(&self) -> bool {
        self.mirrored_x
    }

    /// Return `true` if the content has been flipped vertically an odd number of times.
    pub fn is_mirrored_y(&self) -> bool {
        self.mirrored_y
    }

    /// Counter bumped every time a pixel batch is unlocked on a non-empty surface.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Raw pixel words, row-major.
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    /// Mask coverage bytes, if masking is enabled.
    pub fn mask(&self) -> Option<&[u8]> {
        self.mask.as_deref()
    }

    /// Mask coverage at `(x, y)`; unmasked surfaces are fully opaque everywhere.
    ///
    /// Out-of-bounds coordinates report [`COVERAGE_CLEAR`].
    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        let Some(i) = self.index(x, y) else {
            return COVERAGE_CLEAR;
        };
        match &self.mask {
            Some(m) => m[i],
            None => COVERAGE_OPAQUE,
        }
    }

    /// Read a pixel without taking the lock. Out-of-bounds reads return `0`.
    pub fn pixel(&self, x: i32, y: i32) -> Argb {
        self.index(x, y)
            .map(|i| self.format.normalize(self.pixels[i]))
            .unwrap_or(0)
    }

    /// Reallocate the buffer for `length x height`.
    ///
    /// No-op if the size is unchanged. Otherwise the old content is released
    /// and the new buffer starts blank (transparent black with an alpha
    /// channel, opaque black without). An enabled mask is rebuilt from the
    /// blank content.
    pub fn resize(&mut self, length: u32, height: u32) {
        if length == self.width && height == self.height {
            return;
        }
        self.width = length;
        self.height = height;
        self.pixels = if self.is_degenerate() {
            Vec::new()
        } else {
            vec![self.format.blank(); length as usize * height as usize]
        };
        if self.mask.is_some() {
            self.rebuild_mask();
        }
    }

    /// Set the per-surface opacity and optionally upgrade to an alpha channel.
    ///
    /// The upgrade copies the old RGB content onto a fresh ARGB buffer with
    /// the SOURCE operator, so every pixel keeps its color and gains `0xFF`
    /// alpha. Passing `false` never removes an existing alpha channel.
    pub fn set_alpha(&mut self, value: u8, enable_alpha_channel: bool) {
        self.alpha = value;
        if !enable_alpha_channel || self.format.has_alpha() {
            return;
        }
        let upgraded: Vec<Argb> = self.pixels.iter().map(|&p| p | OPAQUE_ALPHA).collect();
        self.pixels = upgraded;
        self.format = PixelFormat::Argb32;
    }

    /// Attach or release the color-key mask. No-op if the state is unchanged.
    pub fn set_mask(&mut self, enable: bool) {
        if enable == self.mask.is_some() {
            return;
        }
        if enable {
            self.rebuild_mask();
        } else {
            self.mask = None;
        }
    }

    /// Reflect the content about the vertical and/or horizontal center line.
    ///
    /// Each requested axis toggles its mirrored flag. An attached mask is
    /// rebuilt from the reflected pixels.
    pub fn mirror(&mut self, flip_x: bool, flip_y: bool) {
        if !flip_x && !flip_y {
            return;
        }
        self.mirrored_x ^= flip_x;
        self.mirrored_y ^= flip_y;
        if self.is_degenerate() {
            return;
        }

        let w = self.width as usize;
        let h = self.height as usize;
        let mut flip = Affine::IDENTITY;
        if flip_x {
            flip = Affine::translate((w as f64, 0.0)) * Affine::FLIP_X * flip;
        }
        if flip_y {
            flip = Affine::translate((0.0, h as f64)) * Affine::FLIP_Y * flip;
        }

        // The flip is an involution, so it also maps destination to source.
        let src = &self.pixels;
        let mut out = vec![0; src.len()];
        out.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let p = flip * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let sx = (p.x.floor().max(0.0) as usize).min(w - 1);
                let sy = (p.y.floor().max(0.0) as usize).min(h - 1);
                *px = src[sy * w + sx];
            }
        });
        self.pixels = out;

        if self.mask.is_some() {
            self.rebuild_mask();
        }
    }

    /// SOURCE-fill the whole surface with `color`.
    pub fn fill(&mut self, color: Argb) {
        let area = self.area();
        self.lock().fill_area(area, color);
    }

    /// Drop all content: zero size, no buffers. Flags and opacity survive.
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.pixels = Vec::new();
        if self.mask.is_some() {
            self.mask = Some(Vec::new());
        }
    }

    /// Begin a batch of pixel edits. Dropping the guard ends the batch.
    pub fn lock(&mut self) -> PixelLock<'_> {
        if !self.is_degenerate() {
            tracing::trace!(w = self.width, h = self.height, "surface locked");
        }
        PixelLock { surface: self }
    }

    pub(crate) fn replace_content(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<Argb>,
    ) {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        self.width = width;
        self.height = height;
        self.format = format;
        self.pixels = pixels;
        if self.mask.is_some() {
            self.rebuild_mask();
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn rebuild_mask(&mut self) {
        let key = self.trans_color;
        let format = self.format;
        let mask = self
            .pixels
            .par_iter()
            .map(|&p| {
                if format.normalize(p) == key {
                    COVERAGE_CLEAR
                } else {
                    COVERAGE_OPAQUE
                }
            })
            .collect();
        self.mask = Some(mask);
    }
}

/// Exclusive access to a surface's pixels for one batch of edits.
///
/// Dropping the guard is the unlock: it marks the surface dirty by bumping
/// its [`generation`](PixelSurface::generation). Both steps are skipped for
/// zero-size surfaces.
pub struct PixelLock<'a> {
    surface: &'a mut PixelSurface,
}

impl PixelLock<'_> {
    /// Read a pixel. Out-of-bounds reads return `0`.
    ///
    /// Surfaces without an alpha channel always report `0xFF` alpha.
    pub fn get_pixel(&self, x: i32, y: i32) -> Argb {
        self.surface.pixel(x, y)
    }

    /// Write a pixel. Out-of-bounds writes are ignored.
    ///
    /// Surfaces without an alpha channel store the color with `0xFF` alpha.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Argb) {
        if let Some(i) = self.surface.index(x, y) {
            self.surface.pixels[i] = self.surface.format.normalize(color);
        }
    }

    /// Overwrite every pixel of `area` (clamped to the surface) with `color`.
    pub fn fill_area(&mut self, area: DrawingArea, color: Argb) {
        let area = area.intersect(self.surface.area());
        if area.is_empty() {
            return;
        }
        let color = self.surface.format.normalize(color);
        let w = self.surface.width as usize;
        let (x0, x1) = (area.x as usize, area.right() as usize);
        for y in area.y as usize..area.bottom() as usize {
            self.surface.pixels[y * w + x0..y * w + x1].fill(color);
        }
    }

    /// Surface being edited.
    pub fn surface(&self) -> &PixelSurface {
        &*self.surface
    }
}

impl Drop for PixelLock<'_> {
    fn drop(&mut self) {
        if self.surface.is_degenerate() {
            return;
        }
        self.surface.generation = self.surface.generation.wrapping_add(1);
        tracing::trace!(generation = self.surface.generation, "surface unlocked");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/pixel.rs"]
mod tests;
