use std::fmt::{Display, Formatter, Result as FmtResult};

use bytes::Bytes;

use super::image::{ImageFormat, OutputCategory};

/// The three request types the pipeline serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Convert,
    Resize,
    Compress,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Convert => "convert",
            Operation::Resize => "resize",
            Operation::Compress => "compress",
        }
    }

    /// Where outputs of this operation are written.
    pub fn output_category(self) -> OutputCategory {
        match self {
            Operation::Convert => OutputCategory::Converted,
            Operation::Resize => OutputCategory::Resized,
            Operation::Compress => OutputCategory::Compressed,
        }
    }

    /// Body returned to the caller when the whole batch succeeds.
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::Convert => "Successfully Converted Files",
            Operation::Resize => "Successfully Resized Files",
            Operation::Compress => "Successfully Compressed Files",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A single file part received in an upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Bytes,
    /// Text after the last `.` of the final path segment of `name`, case kept;
    /// empty when there is no dot. A bare `.png` has extension `png`.
    pub declared_extension: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let declared_extension = declared_extension_of(&name).to_string();

        Self {
            name,
            data: data.into(),
            declared_extension,
        }
    }

    /// Format implied by the file name, if it is one we handle.
    pub fn declared_format(&self) -> Option<ImageFormat> {
        ImageFormat::from_extension(&self.declared_extension)
    }
}

fn declared_extension_of(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.rfind('.').map(|i| &base[i + 1..]).unwrap_or("")
}

/// Parameters of one request. Numeric values stay signed so that zero and
/// negative inputs reach validation instead of being lost in parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub operation: Operation,
    pub target_width: Option<i64>,
    pub target_height: Option<i64>,
    pub jpeg_quality: Option<i64>,
}

impl TransformRequest {
    pub fn convert() -> Self {
        Self {
            operation: Operation::Convert,
            target_width: None,
            target_height: None,
            jpeg_quality: None,
        }
    }

    pub fn resize(width: Option<i64>, height: Option<i64>) -> Self {
        Self {
            operation: Operation::Resize,
            target_width: width,
            target_height: height,
            jpeg_quality: None,
        }
    }

    pub fn compress(width: Option<i64>, height: Option<i64>, quality: Option<i64>) -> Self {
        Self {
            operation: Operation::Compress,
            target_width: width,
            target_height: height,
            jpeg_quality: quality,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStatus {
    Success,
    Skipped,
    Failed,
}

/// Outcome for one input file.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub file_name: String,
    pub output: Bytes,
    pub output_format: Option<ImageFormat>,
    pub status: TransformStatus,
    pub detail: String,
    /// Storage key of the persisted output, once committed.
    pub location: Option<String>,
}

impl TransformResult {
    pub fn success(file_name: impl Into<String>, output: Bytes, format: ImageFormat) -> Self {
        Self {
            file_name: file_name.into(),
            output,
            output_format: Some(format),
            status: TransformStatus::Success,
            detail: String::new(),
            location: None,
        }
    }

    pub fn skipped(file_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            output: Bytes::new(),
            output_format: None,
            status: TransformStatus::Skipped,
            detail: detail.into(),
            location: None,
        }
    }

    pub fn failed(file_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            output: Bytes::new(),
            output_format: None,
            status: TransformStatus::Failed,
            detail: detail.into(),
            location: None,
        }
    }
}

/// Ordered per-file results of one request.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub operation: Operation,
    pub results: Vec<TransformResult>,
}

impl BatchReport {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: TransformResult) {
        self.results.push(result);
    }

    /// False as soon as any file failed.
    pub fn success(&self) -> bool {
        !self
            .results
            .iter()
            .any(|r| r.status == TransformStatus::Failed)
    }

    pub fn count(&self, status: TransformStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Storage keys of every committed output, in batch order.
    pub fn locations(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|r| r.location.as_deref())
            .collect()
    }
}
