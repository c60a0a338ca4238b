/// Crate-wide result alias.
pub type RiverGlyphResult<T> = Result<T, RiverGlyphError>;

/// Errors surfaced by loading, configuring and rendering an infographic.
#[derive(thiserror::Error, Debug)]
pub enum RiverGlyphError {
    /// Dataset missing, unreadable or lacking a required column.
    #[error("data error: {0}")]
    Data(String),

    /// Invalid configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or frame output failure.
    #[error("render error: {0}")]
    Render(String),

    /// Malformed configuration document.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RiverGlyphError {
    /// Build a [`RiverGlyphError::Data`].
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Build a [`RiverGlyphError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RiverGlyphError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RiverGlyphError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
