pub type SurfResult<T> = Result<T, SurfError>;

/// Errors from the codec, config and geometry helpers. Drawing itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum SurfError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SurfError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
