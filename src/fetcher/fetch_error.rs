use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to fetch: {0}")]
    Status(u16),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid data source URL: {0}")]
    InvalidUrl(String),
}
