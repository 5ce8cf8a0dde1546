/// Convenience result type used across primkit.
pub type PrimkitResult<T> = Result<T, PrimkitError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum PrimkitError {
    /// Structurally invalid documents or geometry contract violations.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while constructing mesh geometry.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors reported by external object/part synthesis collaborators.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrimkitError {
    /// Build a [`PrimkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PrimkitError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`PrimkitError::Synthesis`] value.
    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    /// Build a [`PrimkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
