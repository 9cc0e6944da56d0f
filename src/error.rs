//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::timeline::CurveError;

/// Errors produced by the lookup crate.
#[derive(Debug)]
pub enum LookupError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The configured timeline path could not be built.
    Curve(CurveError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Curve(e) => write!(f, "timeline path error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Curve(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for LookupError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<CurveError> for LookupError {
    fn from(e: CurveError) -> Self {
        Self::Curve(e)
    }
}

impl From<std::io::Error> for LookupError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_error_is_wrapped_with_source() {
        let err = LookupError::from(CurveError::TooFewPoints { found: 1 });
        assert!(err.to_string().starts_with("timeline path error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn options_parse_has_no_source() {
        let err = LookupError::OptionsParse("bad".into());
        assert_eq!(err.to_string(), "options parse error: bad");
        assert!(std::error::Error::source(&err).is_none());
    }
}
