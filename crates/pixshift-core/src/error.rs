//! Error types module
//!
//! All failures that reach the HTTP boundary are unified under `AppError`. Each
//! variant describes its own response through `ErrorMetadata`.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like bad client input
    Debug,
    /// Client errors worth noticing
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DECODE_ERROR"), used in logs only
    fn error_code(&self) -> &'static str;

    /// Client-facing message, returned verbatim as the response body
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    UnsupportedInputFormat(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Encode(String),

    #[error("{0}")]
    InvalidDimension(String),

    #[error("{0}")]
    InvalidQuality(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),

    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MalformedRequest(_) => (400, "MALFORMED_REQUEST", LogLevel::Debug),
        AppError::UnsupportedInputFormat(_) => (400, "UNSUPPORTED_INPUT_FORMAT", LogLevel::Warn),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Warn),
        AppError::Decode(_) => (500, "DECODE_ERROR", LogLevel::Error),
        AppError::Encode(_) => (500, "ENCODE_ERROR", LogLevel::Error),
        AppError::InvalidDimension(_) => (500, "INVALID_DIMENSION", LogLevel::Error),
        AppError::InvalidQuality(_) => (500, "INVALID_QUALITY", LogLevel::Error),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MalformedRequest(_) => "MalformedRequest",
            AppError::UnsupportedInputFormat(_) => "UnsupportedInputFormat",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Decode(_) => "Decode",
            AppError::Encode(_) => "Encode",
            AppError::InvalidDimension(_) => "InvalidDimension",
            AppError::InvalidQuality(_) => "InvalidQuality",
            AppError::Storage(_) => "Storage",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
