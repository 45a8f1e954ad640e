//! Multipart form reading shared by the upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::models::upload::UploadedFile;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_URL_FIELD: &str = "jobUrl";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
pub const RESUME_TEXT_FIELD: &str = "resumeText";

const TEXT_FIELDS: &[&str] = &[JOB_URL_FIELD, JOB_DESCRIPTION_FIELD, RESUME_TEXT_FIELD];

/// The known parts of an upload form. Unknown fields are dropped.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// A text field, `None` when missing or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn take_resume(&mut self) -> Option<UploadedFile> {
        self.resume.take().filter(|f| !f.bytes.is_empty())
    }
}

pub async fn read_upload_form(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RESUME_FIELD {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            if bytes.len() > max_file_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Resume file is {} bytes; the limit is {max_file_bytes} bytes",
                    bytes.len()
                )));
            }
            debug!("Received resume file {file_name} ({} bytes)", bytes.len());
            form.resume = Some(UploadedFile::new(file_name, content_type, bytes));
        } else if TEXT_FIELDS.contains(&name.as_str()) {
            let value = field.text().await?;
            form.fields.insert(name, value);
        } else {
            debug!("Ignoring unknown form field '{name}'");
        }
    }

    Ok(form)
}
