use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Argb, TRANS_COLOR, parse_argb};
use crate::foundation::error::{SurfError, SurfResult};
use crate::surface::pixel::PixelSurface;

/// Environment override for [`RenderConfig::trans_color`] (hex).
pub const ENV_TRANS_COLOR: &str = "SURFKIT_TRANS_COLOR";
/// Environment override for [`RenderConfig::handle_size`].
pub const ENV_HANDLE_SIZE: &str = "SURFKIT_HANDLE_SIZE";

/// Rendering settings shared by every surface and editor overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color-key: pixels equal to it become transparent when a mask is built.
    pub trans_color: Argb,
    /// Edge of the square handle marker, in screen pixels.
    pub handle_size: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            trans_color: TRANS_COLOR,
            handle_size: 8,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_json_path(path: &Path) -> SurfResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `SURFKIT_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> SurfResult<Self> {
        if let Ok(v) = std::env::var(ENV_TRANS_COLOR) {
            self.trans_color = parse_argb(&v)?;
        }
        if let Ok(v) = std::env::var(ENV_HANDLE_SIZE) {
            self.handle_size = v.trim().parse::<i32>().map_err(|e| {
                SurfError::validation(format!("{ENV_HANDLE_SIZE}='{v}' is not an integer: {e}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> SurfResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Check invariants the handle layout relies on.
    pub fn validate(&self) -> SurfResult<()> {
        if self.handle_size < 2 || self.handle_size % 2 != 0 {
            return Err(SurfError::validation(format!(
                "handle_size must be an even number >= 2, got {}",
                self.handle_size
            )));
        }
        Ok(())
    }

    /// Distance from a handle's anchor point to its marker's top-left corner.
    pub fn handle_offset(&self) -> i32 {
        self.handle_size / 2
    }
}

/// Explicit rendering context: the one place the transparency key lives.
///
/// Surfaces created through a context inherit its key color; there is no
/// process-global mutable state.
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    config: RenderConfig,
}

impl RenderContext {
    /// Create a context from validated settings.
    pub fn new(config: RenderConfig) -> SurfResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings in effect.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Color-key used for masks built by surfaces of this context.
    pub fn trans_color(&self) -> Argb {
        self.config.trans_color
    }

    /// New surface of the given size, keyed to this context's transparency color.
    pub fn create_surface(&self, length: u32, height: u32, alpha_channel: bool) -> PixelSurface {
        let mut s = PixelSurface::with_trans_color(self.config.trans_color);
        if alpha_channel {
            s.set_alpha(u8::MAX, true);
        }
        s.resize(length, height);
        s
    }

    /// Opaque target surface standing in for the screen.
    ///
    /// The display is an ordinary [`PixelSurface`]; blits to it follow the
    /// same contract as surface-to-surface compositing.
    pub fn create_display(&self, length: u32, height: u32) -> PixelSurface {
        self.create_surface(length, height, false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
