use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl FilterError {
    /// Query parameter the error refers to.
    pub fn field(&self) -> &str {
        match self {
            FilterError::InvalidPage(_) => "page",
            FilterError::InvalidLimit(_) => "limit",
            FilterError::InvalidValue { field, .. } => field,
        }
    }
}
