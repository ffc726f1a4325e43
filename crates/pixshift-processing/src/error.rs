//! Error types for the codec layer and the pipeline.

use pixshift_core::{BatchReport, ImageFormat};
use pixshift_storage::StorageError;

/// Errors raised while decoding, transforming or encoding a single image.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Encode(String),

    #[error("{0}")]
    InvalidDimension(String),
}

/// Errors that abort a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Convert received something other than PNG content
    #[error("Image file must be PNG")]
    UnsupportedInputFormat {
        file_name: String,
        detected: Option<ImageFormat>,
    },

    #[error("Couldn't read the image {file_name}: {reason}")]
    Decode { file_name: String, reason: String },

    #[error("Couldn't encode the image {file_name}: {reason}")]
    Encode { file_name: String, reason: String },

    #[error("Invalid dimensions: {0}")]
    InvalidDimension(String),

    #[error("Invalid JPEG quality: {0}")]
    InvalidQuality(String),

    #[error("Missing form field {0}")]
    MissingParameter(&'static str),

    #[error("Failed to store output for {file_name}: {source}")]
    Storage {
        file_name: String,
        #[source]
        source: StorageError,
    },

    #[error("Image processing task failed: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Attach a file name to a codec failure.
    pub fn from_codec(file_name: &str, err: CodecError) -> Self {
        match err {
            CodecError::Decode(reason) => PipelineError::Decode {
                file_name: file_name.to_string(),
                reason,
            },
            CodecError::Encode(reason) => PipelineError::Encode {
                file_name: file_name.to_string(),
                reason,
            },
            CodecError::InvalidDimension(reason) => PipelineError::InvalidDimension(reason),
        }
    }
}

/// A batch stopped at its first fatal error. `report` holds the results up to
/// and including the failing file; outputs already committed are not undone.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct BatchAborted {
    pub error: PipelineError,
    pub report: BatchReport,
}
