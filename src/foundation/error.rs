/// Convenience result type used across Storyscape.
pub type StoryscapeResult<T> = Result<T, StoryscapeError>;

/// Top-level error taxonomy used by library APIs.
///
/// None of these ever reach the viewer: the transition engine folds load and decode failures
/// into a fail-static outcome. They exist for hosts, tooling and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum StoryscapeError {
    /// Invalid caller-provided data (props, positions, shot names).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An image source could not be fetched.
    #[error("load error: {0}")]
    Load(String),

    /// Fetched bytes could not be decoded into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while compositing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryscapeError {
    /// Build a [`StoryscapeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryscapeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StoryscapeError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`StoryscapeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StoryscapeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StoryscapeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<url::ParseError> for StoryscapeError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid url: {err}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
