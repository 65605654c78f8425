use thiserror::Error;

/// Unified error type for repository operations that application code can handle
#[derive(Error, Debug)]
pub enum StoreError {
    /// Entity not found by the given identifier
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A value could not be interpreted at the repository boundary.
    ///
    /// Raised by the wire adapter for malformed remote records and by the front desk workflows
    /// for requests that cannot be satisfied (e.g. a stay that ends before it starts).
    #[error("Invalid data: {message}")]
    Validation { message: String },

    /// The remote record service could not be reached, timed out, or failed server-side
    #[error("Backing store unavailable: {message}")]
    BackingStoreUnavailable { message: String },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound { entity, id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation { message: message.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::BackingStoreUnavailable { message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Convert from reqwest::Error, classifying transport failures as unavailability
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::unavailable(format!("request timed out: {err}"))
        } else if err.is_connect() || err.is_request() {
            StoreError::unavailable(format!("request failed: {err}"))
        } else if err.is_decode() {
            StoreError::validation(format!("undecodable response body: {err}"))
        } else if let Some(status) = err.status() {
            StoreError::unavailable(format!("remote returned {status}"))
        } else {
            // All other reqwest errors are non-recoverable - convert to anyhow
            StoreError::Other(anyhow::Error::from(err))
        }
    }
}

/// Type alias for repository operation results
pub type Result<T> = std::result::Result<T, StoreError>;
