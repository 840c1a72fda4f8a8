use thiserror::Error;

/// Failure talking to the contacts API. Never leaves `MessageService`;
/// every variant is turned into a local fallback there.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure reading or writing the local store file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Contact form validation failure, shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}
