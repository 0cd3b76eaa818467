/// Errors that can occur while handling resource containers.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource container not found: {0}")]
    NotFound(String),

    #[error("Invalid resource container: {0}")]
    Invalid(String),

    #[error("Cannot convert legacy payload: {0}")]
    Conversion(String),
}

impl ContainerError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound(slug.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }
}
