//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Every failure is
//! rendered as `(status, text/plain message)`; the message is the error's
//! client message, unchanged.

use axum::{
    extract::multipart::MultipartError,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use pixshift_core::{AppError, ErrorMetadata, LogLevel};
use pixshift_processing::{BatchAborted, PipelineError};
use pixshift_storage::StorageError;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from pixshift-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type,
                error_code,
                details = %error.detailed_message(),
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            app_error.client_message(),
        )
            .into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::Storage(err.to_string()))
    }
}

impl From<PipelineError> for HttpAppError {
    fn from(err: PipelineError) -> Self {
        let message = err.to_string();
        let app = match err {
            PipelineError::UnsupportedInputFormat { .. } => AppError::UnsupportedInputFormat(message),
            PipelineError::MissingParameter(_) => AppError::MalformedRequest(message),
            PipelineError::Decode { .. } => AppError::Decode(message),
            PipelineError::Encode { .. } => AppError::Encode(message),
            PipelineError::InvalidDimension(_) => AppError::InvalidDimension(message),
            PipelineError::InvalidQuality(_) => AppError::InvalidQuality(message),
            PipelineError::Storage { .. } => AppError::Storage(message),
            PipelineError::Internal(_) => AppError::Internal(message),
        };
        HttpAppError(app)
    }
}

impl From<BatchAborted> for HttpAppError {
    fn from(aborted: BatchAborted) -> Self {
        let report = &aborted.report;
        tracing::debug!(
            operation = %report.operation,
            processed = report.results.len(),
            stored = report.locations().len(),
            "Discarding partial batch report"
        );
        aborted.error.into()
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let message = format!("Failed to read multipart body: {}", err.body_text());
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::MalformedRequest(message)
        };
        HttpAppError(app)
    }
}
