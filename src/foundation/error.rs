/// Convenience result type used across iconring.
pub type IconRingResult<T> = Result<T, IconRingError>;

/// Top-level error taxonomy used by editor, renderer and exporter APIs.
#[derive(thiserror::Error, Debug)]
pub enum IconRingError {
    /// Invalid user-provided control values or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while rasterizing or compositing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Malformed event script line.
    #[error("script error (line {line}): {msg}")]
    Script {
        /// 1-based line number in the script.
        line: usize,
        /// What went wrong on that line.
        msg: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IconRingError {
    /// Build a [`IconRingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`IconRingError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`IconRingError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`IconRingError::Script`] value.
    pub fn script(line: usize, msg: impl Into<String>) -> Self {
        Self::Script {
            line,
            msg: msg.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
