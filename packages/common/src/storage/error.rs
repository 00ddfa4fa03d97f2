use std::fmt;

/// Errors that can occur during asset storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The upload carried no bytes.
    EmptyPayload,
    /// The URL does not name a file under the asset prefix.
    InvalidUrl(String),
    /// The asset exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// An I/O error occurred.
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "asset payload is empty"),
            Self::InvalidUrl(url) => write!(f, "invalid asset url: {url}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "asset exceeds size limit ({actual} > {limit} bytes)")
            }
            Self::Io(err) => write!(f, "storage IO error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
