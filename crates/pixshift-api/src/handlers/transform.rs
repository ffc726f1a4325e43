//! Convert, resize and compress endpoints
//!
//! Each handler drains the multipart body, runs the batch through the shared
//! pipeline and answers with a plain-text status line.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use pixshift_core::BatchReport;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{read_transform_form, HEIGHT_FIELD, QUALITY_FIELD, WIDTH_FIELD};

fn batch_response(report: &BatchReport) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report.operation.success_message(),
    )
}

/// Convert every uploaded PNG to JPEG.
///
/// # Errors
/// - 400 when a file's content is not PNG; files before it stay stored
/// - 500 on decode, encode or storage failure
#[tracing::instrument(skip(state, multipart), fields(operation = "convert"))]
pub async fn convert_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = read_transform_form(multipart).await?;
    let report = state.pipeline.convert(form.files).await?;
    Ok(batch_response(&report))
}

/// Resize every `.png`/`.jpg`/`.jpeg` file to exactly `SizeX` x `SizeY`.
/// Other files are skipped.
#[tracing::instrument(skip(state, multipart), fields(operation = "resize"))]
pub async fn resize_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let lenient = state.config.lenient_numeric_params();
    let form = read_transform_form(multipart).await?;
    let width = form.numeric(WIDTH_FIELD, lenient)?;
    let height = form.numeric(HEIGHT_FIELD, lenient)?;

    let report = state.pipeline.resize(form.files, width, height).await?;
    Ok(batch_response(&report))
}

/// Re-encode JPEGs at quality `SizeJPEG` and shrink PNGs to `SizeX` x `SizeY`.
#[tracing::instrument(skip(state, multipart), fields(operation = "compress"))]
pub async fn compress_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let lenient = state.config.lenient_numeric_params();
    let form = read_transform_form(multipart).await?;
    let width = form.numeric(WIDTH_FIELD, lenient)?;
    let height = form.numeric(HEIGHT_FIELD, lenient)?;
    let quality = form.numeric(QUALITY_FIELD, lenient)?;

    let report = state
        .pipeline
        .compress(form.files, width, height, quality)
        .await?;
    Ok(batch_response(&report))
}
