//! Multipart intake for the transform endpoints

use crate::error::HttpAppError;
use axum::extract::Multipart;
use pixshift_core::{AppError, UploadedFile};
use std::collections::HashMap;

/// Repeated file field carrying the batch.
pub const IMAGES_FIELD: &str = "Images";
pub const WIDTH_FIELD: &str = "SizeX";
pub const HEIGHT_FIELD: &str = "SizeY";
pub const QUALITY_FIELD: &str = "SizeJPEG";

/// Files and text fields of one transform request.
#[derive(Debug, Default)]
pub struct TransformForm {
    pub files: Vec<UploadedFile>,
    fields: HashMap<String, String>,
}

impl TransformForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Read a numeric field.
    ///
    /// Strict mode rejects values that do not parse. Lenient mode maps them,
    /// and absent fields, to 0 so they fail later as an invalid dimension.
    pub fn numeric(&self, name: &str, lenient: bool) -> Result<Option<i64>, HttpAppError> {
        match self.field(name).map(str::trim) {
            None | Some("") if lenient => Ok(Some(0)),
            None | Some("") => Ok(None),
            Some(raw) => match raw.parse::<i64>() {
                Ok(value) => Ok(Some(value)),
                Err(_) if lenient => {
                    tracing::debug!(field = name, value = raw, "Unparseable numeric field, using 0");
                    Ok(Some(0))
                }
                Err(_) => Err(HttpAppError(AppError::MalformedRequest(format!(
                    "Invalid {}: {}",
                    name, raw
                )))),
            },
        }
    }
}

/// Drain the multipart body. Every `Images` part becomes one file in upload
/// order; other parts are kept as text fields (last one wins).
pub async fn read_transform_form(mut multipart: Multipart) -> Result<TransformForm, HttpAppError> {
    let mut form = TransformForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGES_FIELD {
            let file_name = field
                .file_name()
                .map(|s: &str| s.to_string())
                .unwrap_or_default();
            let data = field.bytes().await?;

            tracing::debug!(file_name = %file_name, size_bytes = data.len(), "Received image part");
            form.files.push(UploadedFile::new(file_name, data));
        } else if !field_name.is_empty() {
            let value = field.text().await?;
            form.fields.insert(field_name, value);
        }
    }

    Ok(form)
}
