//! Transform pipeline
//!
//! Runs one request's batch through decode, transform, encode and persist. Files
//! are handled strictly in upload order and the first fatal error stops the
//! batch. Codec work runs on the blocking pool, one file at a time.

use crate::error::{BatchAborted, CodecError, PipelineError};
use crate::image::{FormatDetector, ImageTransformer, TargetDimensions};
use crate::traits::ImageCodec;
use bytes::Bytes;
use pixshift_core::{
    BatchReport, CommitMode, Config, ImageFormat, Operation, OutputCategory, TransformRequest,
    TransformResult, UploadedFile,
};
use pixshift_storage::Storage;
use std::sync::Arc;
use std::time::Instant;

/// Pipeline knobs taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub max_image_dimension: u32,
    pub keep_uploads: bool,
    pub commit_mode: CommitMode,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_image_dimension: config.max_image_dimension(),
            keep_uploads: config.keep_uploads(),
            commit_mode: config.commit_mode(),
        }
    }
}

/// Request parameters after the once-per-request validation.
#[derive(Debug, Clone, Copy, Default)]
struct BatchPlan {
    target: Option<TargetDimensions>,
    quality: Option<u8>,
}

/// What to do with one file.
#[derive(Debug, Clone, Copy)]
enum FileStep {
    Skip,
    Transcode {
        output_format: ImageFormat,
        target: Option<TargetDimensions>,
        quality: Option<u8>,
    },
}

/// A storage write. In buffered mode these wait until the whole batch
/// processed without error.
struct PendingWrite {
    /// Result the write belongs to
    index: usize,
    file_name: String,
    category: OutputCategory,
    extension: String,
    content_type: &'static str,
    data: Bytes,
    /// Staged raw input rather than a transformed output
    staged: bool,
}

pub struct TransformPipeline {
    codec: Arc<dyn ImageCodec>,
    storage: Arc<dyn Storage>,
    options: PipelineOptions,
}

impl TransformPipeline {
    pub fn new(
        codec: Arc<dyn ImageCodec>,
        storage: Arc<dyn Storage>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            codec,
            storage,
            options,
        }
    }

    pub async fn convert(&self, files: Vec<UploadedFile>) -> Result<BatchReport, BatchAborted> {
        self.run(&TransformRequest::convert(), files).await
    }

    pub async fn resize(
        &self,
        files: Vec<UploadedFile>,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<BatchReport, BatchAborted> {
        self.run(&TransformRequest::resize(width, height), files)
            .await
    }

    pub async fn compress(
        &self,
        files: Vec<UploadedFile>,
        width: Option<i64>,
        height: Option<i64>,
        quality: Option<i64>,
    ) -> Result<BatchReport, BatchAborted> {
        self.run(&TransformRequest::compress(width, height, quality), files)
            .await
    }

    /// Process a whole batch.
    ///
    /// On error the returned [`BatchAborted`] carries the report up to and
    /// including the failing file. In streaming mode outputs stored before the
    /// failure stay in storage. In buffered mode nothing is left behind: writes
    /// only start once every file succeeded, and a failing write removes the
    /// ones before it.
    pub async fn run(
        &self,
        request: &TransformRequest,
        files: Vec<UploadedFile>,
    ) -> Result<BatchReport, BatchAborted> {
        let operation = request.operation;
        let mut report = BatchReport::new(operation);
        let start = Instant::now();

        let plan = match self.plan(request, &files) {
            Ok(plan) => plan,
            Err(error) => {
                tracing::warn!(operation = %operation, error = %error, "Rejected request parameters");
                return Err(BatchAborted { error, report });
            }
        };

        tracing::debug!(
            operation = %operation,
            file_count = files.len(),
            commit_mode = ?self.options.commit_mode,
            "Starting batch"
        );

        let mut pending = Vec::new();

        for file in files {
            let index = report.results.len();
            match self
                .process_file(operation, &plan, &file, index, &mut pending)
                .await
            {
                Ok(None) => {
                    tracing::info!(
                        operation = %operation,
                        file_name = %file.name,
                        extension = %file.declared_extension,
                        "Skipping file with unsupported extension"
                    );
                    report.push(TransformResult::skipped(
                        &file.name,
                        format!("unsupported extension '{}'", file.declared_extension),
                    ));
                }
                Ok(Some((format, data))) => {
                    let mut result = TransformResult::success(&file.name, data.clone(), format);
                    let write = PendingWrite {
                        index,
                        file_name: file.name.clone(),
                        category: operation.output_category(),
                        extension: output_extension(operation, &file, format),
                        content_type: format.to_mime_type(),
                        data,
                        staged: false,
                    };

                    match self.submit(write, &mut pending).await {
                        Ok(key) => result.location = key,
                        Err(error) => return Err(abort(report, &file.name, error)),
                    }

                    report.push(result);
                }
                Err(error) => return Err(abort(report, &file.name, error)),
            }
        }

        if let Err(error) = self.flush(pending, &mut report).await {
            return Err(BatchAborted { error, report });
        }

        tracing::info!(
            operation = %operation,
            files = report.results.len(),
            stored = report.locations().len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Batch completed"
        );

        Ok(report)
    }

    /// Validate request parameters once, looking only at what the batch needs.
    fn plan(
        &self,
        request: &TransformRequest,
        files: &[UploadedFile],
    ) -> Result<BatchPlan, PipelineError> {
        let max = self.options.max_image_dimension;

        match request.operation {
            Operation::Convert => Ok(BatchPlan::default()),
            Operation::Resize => {
                if !files.iter().any(|f| f.declared_format().is_some()) {
                    return Ok(BatchPlan::default());
                }
                Ok(BatchPlan {
                    target: Some(target_dimensions(request, max)?),
                    quality: None,
                })
            }
            Operation::Compress => {
                let has_png = files
                    .iter()
                    .any(|f| f.declared_format() == Some(ImageFormat::Png));
                let has_jpeg = files
                    .iter()
                    .any(|f| f.declared_format() == Some(ImageFormat::Jpeg));

                let target = if has_png {
                    Some(target_dimensions(request, max)?)
                } else {
                    None
                };
                let quality = if has_jpeg {
                    Some(jpeg_quality(request)?)
                } else {
                    None
                };

                Ok(BatchPlan { target, quality })
            }
        }
    }

    fn step_for(
        &self,
        operation: Operation,
        plan: &BatchPlan,
        file: &UploadedFile,
    ) -> Result<FileStep, PipelineError> {
        match operation {
            Operation::Convert => {
                // Content decides, not the file name
                if !FormatDetector::is_png(&file.data) {
                    return Err(PipelineError::UnsupportedInputFormat {
                        file_name: file.name.clone(),
                        detected: FormatDetector::detect(&file.data),
                    });
                }
                Ok(FileStep::Transcode {
                    output_format: ImageFormat::Jpeg,
                    target: None,
                    quality: None,
                })
            }
            Operation::Resize => Ok(match file.declared_format() {
                Some(format) => FileStep::Transcode {
                    output_format: format,
                    target: plan.target,
                    quality: None,
                },
                None => FileStep::Skip,
            }),
            Operation::Compress => Ok(match file.declared_format() {
                Some(ImageFormat::Jpeg) => FileStep::Transcode {
                    output_format: ImageFormat::Jpeg,
                    target: None,
                    quality: plan.quality,
                },
                Some(ImageFormat::Png) => FileStep::Transcode {
                    output_format: ImageFormat::Png,
                    target: plan.target,
                    quality: None,
                },
                None => FileStep::Skip,
            }),
        }
    }

    /// `Ok(None)` means the file was skipped.
    async fn process_file(
        &self,
        operation: Operation,
        plan: &BatchPlan,
        file: &UploadedFile,
        index: usize,
        pending: &mut Vec<PendingWrite>,
    ) -> Result<Option<(ImageFormat, Bytes)>, PipelineError> {
        let (output_format, target, quality) = match self.step_for(operation, plan, file)? {
            FileStep::Skip => return Ok(None),
            FileStep::Transcode {
                output_format,
                target,
                quality,
            } => (output_format, target, quality),
        };

        if self.options.keep_uploads {
            let staged = staged_upload(operation, file, index);
            if let Some(key) = self.submit(staged, pending).await? {
                tracing::debug!(file_name = %file.name, key = %key, "Staged upload");
            }
        }

        let start = Instant::now();
        let codec = Arc::clone(&self.codec);
        let data = file.data.clone();

        let encoded = tokio::task::spawn_blocking(move || -> Result<Bytes, CodecError> {
            let decoded = codec.decode(&data)?;
            let image = match target {
                Some(target) => ImageTransformer::resize(decoded, target),
                None => decoded,
            };
            codec.encode(&image, output_format, quality)
        })
        .await
        .map_err(|e| PipelineError::Internal(e.to_string()))?
        .map_err(|e| PipelineError::from_codec(&file.name, e))?;

        tracing::debug!(
            operation = %operation,
            file_name = %file.name,
            output_format = %output_format,
            input_bytes = file.data.len(),
            size_bytes = encoded.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image transformed"
        );

        Ok(Some((output_format, encoded)))
    }

    /// Write now in streaming mode, or queue for [`Self::flush`] in buffered mode.
    async fn submit(
        &self,
        write: PendingWrite,
        pending: &mut Vec<PendingWrite>,
    ) -> Result<Option<String>, PipelineError> {
        match self.options.commit_mode {
            CommitMode::Streaming => self.write(write).await.map(Some),
            CommitMode::Buffered => {
                pending.push(write);
                Ok(None)
            }
        }
    }

    /// Commit queued writes. On the first failure every key already written by
    /// this flush is deleted again.
    async fn flush(
        &self,
        pending: Vec<PendingWrite>,
        report: &mut BatchReport,
    ) -> Result<(), PipelineError> {
        let mut written: Vec<String> = Vec::with_capacity(pending.len());

        for write in pending {
            let index = write.index;
            let staged = write.staged;
            let file_name = write.file_name.clone();

            match self.write(write).await {
                Ok(key) => {
                    if !staged {
                        report.results[index].location = Some(key.clone());
                    }
                    written.push(key);
                }
                Err(error) => {
                    tracing::error!(
                        operation = %report.operation,
                        file_name = %file_name,
                        error = %error,
                        rolled_back = written.len(),
                        "Buffered commit failed"
                    );
                    self.rollback(&written).await;
                    for result in report.results.iter_mut() {
                        result.location = None;
                    }
                    report.results[index] = TransformResult::failed(&file_name, error.to_string());
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    async fn rollback(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(key = %key, error = %e, "Failed to remove output of aborted batch");
            }
        }
    }

    async fn write(&self, write: PendingWrite) -> Result<String, PipelineError> {
        let stored = self
            .storage
            .store(
                write.category,
                &write.extension,
                write.content_type,
                write.data,
            )
            .await
            .map_err(|source| PipelineError::Storage {
                file_name: write.file_name,
                source,
            })?;

        Ok(stored.key)
    }
}

/// Raw input copy for the `uploads` area. Convert inputs are sniffed PNGs
/// whatever their name says.
fn staged_upload(operation: Operation, file: &UploadedFile, index: usize) -> PendingWrite {
    let (extension, content_type) = match (operation, file.declared_format()) {
        (Operation::Convert, _) => ("png".to_string(), ImageFormat::Png.to_mime_type()),
        (_, Some(format)) => (file.declared_extension.clone(), format.to_mime_type()),
        (_, None) => ("bin".to_string(), "application/octet-stream"),
    };

    PendingWrite {
        index,
        file_name: file.name.clone(),
        category: OutputCategory::Uploads,
        extension,
        content_type,
        data: file.data.clone(),
        staged: true,
    }
}

fn abort(mut report: BatchReport, file_name: &str, error: PipelineError) -> BatchAborted {
    tracing::error!(
        operation = %report.operation,
        file_name = %file_name,
        error = %error,
        "Batch aborted"
    );
    report.push(TransformResult::failed(file_name, error.to_string()));
    BatchAborted { error, report }
}

/// Resize and Compress keep the uploaded extension; Convert always writes `.jpeg`.
fn output_extension(operation: Operation, file: &UploadedFile, format: ImageFormat) -> String {
    match operation {
        Operation::Convert => format.extension().to_string(),
        Operation::Resize | Operation::Compress => file.declared_extension.clone(),
    }
}

fn target_dimensions(request: &TransformRequest, max: u32) -> Result<TargetDimensions, PipelineError> {
    let width = request
        .target_width
        .ok_or(PipelineError::MissingParameter("SizeX"))?;
    let height = request
        .target_height
        .ok_or(PipelineError::MissingParameter("SizeY"))?;

    TargetDimensions::new(width, height, max).map_err(|e| match e {
        CodecError::InvalidDimension(reason) => PipelineError::InvalidDimension(reason),
        other => PipelineError::Internal(other.to_string()),
    })
}

fn jpeg_quality(request: &TransformRequest) -> Result<u8, PipelineError> {
    let quality = request
        .jpeg_quality
        .ok_or(PipelineError::MissingParameter("SizeJPEG"))?;

    u8::try_from(quality)
        .ok()
        .filter(|q| *q <= 100)
        .ok_or_else(|| PipelineError::InvalidQuality(format!("{} (expected 0-100)", quality)))
}
