/// Convenience result type used across the renderer.
pub type RenderResult<T> = Result<T, RenderError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Invalid configuration or snapshot data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A sprite or font asset is missing or could not be decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The world model handed over state outside its documented contract.
    #[error("contract violation: {0}")]
    Contract(String),

    /// Errors when serializing or deserializing snapshots and options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    /// Build a [`RenderError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RenderError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`RenderError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`RenderError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
