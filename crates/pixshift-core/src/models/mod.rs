//! Domain models for the transformation pipeline.

pub mod image;
pub mod transform;

pub use image::{ImageFormat, OutputCategory};
pub use transform::{
    BatchReport, Operation, TransformRequest, TransformResult, TransformStatus, UploadedFile,
};
