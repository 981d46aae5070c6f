/// Failures talking to the remote conversation store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to initialize HTTP client: {source}")]
    ClientInit {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid API host '{host}': {message}")]
    InvalidHost { host: String, message: String },

    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("{path} rejected the request: {message}")]
    Rejected { path: String, message: String },

    #[error("Invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
