use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Failed to store query in {store}: {message}")]
    IndexWrite { store: String, message: String },

    #[error("Failed to search {store}: {message}")]
    IndexRead { store: String, message: String },

    #[error("Failed to store response in {store}: {message}")]
    PayloadWrite { store: String, message: String },

    #[error("Failed to read response from {store}: {message}")]
    PayloadRead { store: String, message: String },

    #[error("Response not found in {store}")]
    PayloadMissing { store: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn index_write(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IndexWrite {
            store: store.into(),
            message: message.into(),
        }
    }

    pub fn index_read(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IndexRead {
            store: store.into(),
            message: message.into(),
        }
    }

    pub fn payload_write(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PayloadWrite {
            store: store.into(),
            message: message.into(),
        }
    }

    pub fn payload_read(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PayloadRead {
            store: store.into(),
            message: message.into(),
        }
    }

    pub fn payload_missing(store: impl Into<String>) -> Self {
        Self::PayloadMissing {
            store: store.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
