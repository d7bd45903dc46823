pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),
    #[error("forbidden: {0}")]
    Authorization(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Stable tag for callers that render errors inline.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::AuthenticationRequired(_) => "authentication_required",
            AppError::Authorization(_) => "authorization",
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Configuration(_) => "configuration",
            AppError::Storage(_) => "storage",
            AppError::Serialization(_) => "serialization",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Storage(value.to_string())
    }
}
