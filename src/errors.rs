// errors.rs
use thiserror::Error;

/// Errors that end a request with an error page instead of the dashboard.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    /// The listing source could not deliver data.
    #[error("Upstream Error: {0}")]
    Upstream(String),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}
