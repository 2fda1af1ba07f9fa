/// Crate-wide result type.
pub type CardFxResult<T> = Result<T, CardFxError>;

/// Errors raised by fallible internals (surface allocation, config and scene loading, export).
///
/// Hover dispatch itself never returns these: a failing effect degrades to "no effect".
#[derive(thiserror::Error, Debug)]
pub enum CardFxError {
    /// Invalid input values (config, scene, geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// Drawing-surface allocation or raster failures.
    #[error("surface error: {0}")]
    Surface(String),

    /// Config or scene (de)serialization failures.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardFxError {
    /// Build a [`CardFxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardFxError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`CardFxError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for CardFxError {
    fn from(e: serde_json::Error) -> Self {
        Self::config(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
