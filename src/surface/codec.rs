use std::io::{Read, Write};

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::foundation::core::{Argb, map_color, unmap_color};
use crate::foundation::error::{SurfError, SurfResult};
use crate::surface::pixel::{PixelFormat, PixelSurface};

impl PixelSurface {
    /// Replace the content with a PNG read from `reader`.
    ///
    /// On failure the surface is left cleared (zero size, no buffers) and
    /// `false` is returned; the previous content does not survive.
    pub fn decode_png<R: Read>(&mut self, reader: R) -> bool {
        match read_png(reader) {
            Ok((w, h, format, pixels)) => {
                self.replace_content(w, h, format, pixels);
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "png decode failed");
                self.clear();
                false
            }
        }
    }

    /// Serialize the raw pixels as PNG into `writer`.
    ///
    /// Only RGB(A) pixels are written; per-surface alpha and the mask are not
    /// part of the format. Zero-size surfaces cannot be encoded.
    pub fn encode_png<W: Write>(&self, writer: W) -> bool {
        match write_png(self, writer) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "png encode failed");
                false
            }
        }
    }
}

fn read_png<R: Read>(mut reader: R) -> SurfResult<(u32, u32, PixelFormat, Vec<Argb>)> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("read png stream")?;
    let dyn_img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .context("decode png from memory")?;

    let format = if dyn_img.color().has_alpha() {
        PixelFormat::Argb32
    } else {
        PixelFormat::Rgb24
    };
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .as_raw()
        .chunks_exact(4)
        .map(|px| map_color(px[0], px[1], px[2], px[3]))
        .collect();
    Ok((width, height, format, pixels))
}

fn write_png<W: Write>(surface: &PixelSurface, writer: W) -> SurfResult<()> {
    if surface.is_degenerate() {
        return Err(SurfError::codec("cannot encode a zero-size surface"));
    }

    let (buf, color) = if surface.has_alpha_channel() {
        let mut buf = Vec::with_capacity(surface.pixels().len() * 4);
        for &p in surface.pixels() {
            let (r, g, b, a) = unmap_color(p);
            buf.extend_from_slice(&[r, g, b, a]);
        }
        (buf, image::ExtendedColorType::Rgba8)
    } else {
        let mut buf = Vec::with_capacity(surface.pixels().len() * 3);
        for &p in surface.pixels() {
            let (r, g, b, _) = unmap_color(p);
            buf.extend_from_slice(&[r, g, b]);
        }
        (buf, image::ExtendedColorType::Rgb8)
    };

    image::codecs::png::PngEncoder::new(writer)
        .write_image(&buf, surface.width(), surface.height(), color)
        .context("encode png")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/codec.rs"]
mod tests;
