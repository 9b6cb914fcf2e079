/// Convenience result type used across panecast.
pub type PanecastResult<T> = Result<T, PanecastError>;

/// Top-level error taxonomy used by playback APIs.
///
/// `ResourceUnavailable` and `TruncatedInput` are startup errors: nothing is played when either is
/// returned. Once the playback loop is running only `Host` errors can surface.
#[derive(thiserror::Error, Debug)]
pub enum PanecastError {
    /// The resource provider could not supply the requested bytes.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The frame decoder tried to read past the end of its input buffer.
    #[error("truncated input: needed {needed} byte(s) at offset {offset}, buffer is {len} byte(s)")]
    TruncatedInput {
        /// Byte offset of the read that failed.
        offset: usize,
        /// Width of the attempted read.
        needed: usize,
        /// Total buffer length.
        len: usize,
    },

    /// A decoded model or an option set cannot be used for playback.
    #[error("validation error: {0}")]
    Validation(String),

    /// A host collaborator (windowing, rasterizer, audio) refused an operation.
    #[error("host error: {0}")]
    Host(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanecastError {
    /// Build a [`PanecastError::ResourceUnavailable`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Build a [`PanecastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanecastError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Whether this error aborts startup (as opposed to a best-effort host failure).
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(
            self,
            Self::ResourceUnavailable(_) | Self::TruncatedInput { .. } | Self::Validation(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
