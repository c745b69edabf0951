use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;

/// One job application as submitted through the form. Lives for one request.
#[derive(Debug, Clone, Default)]
pub struct ApplicationInputs {
    pub company_name: String,
    pub position: String,
    pub job_description: String,
    pub resume_pdf: Bytes,
}

impl ApplicationInputs {
    /// Names of the required fields that are missing or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.company_name.trim().is_empty() {
            missing.push("company_name");
        }
        if self.position.trim().is_empty() {
            missing.push("position");
        }
        if self.job_description.trim().is_empty() {
            missing.push("job_description");
        }
        if self.resume_pdf.is_empty() {
            missing.push("resume");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(AppError::Validation(format!(
            "Please fill in all fields and upload a PDF resume (missing: {})",
            missing.join(", ")
        )))
    }
}

/// Model selection for the completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub model: String,
    /// Documented range is 0.0–1.0; not checked locally.
    pub temperature: f32,
}

/// Generated cover letter plus request metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CoverLetter {
    pub request_id: Uuid,
    pub cover_letter: String,
    pub model: String,
    pub resume_chars: usize,
    pub generated_at: DateTime<Utc>,
}
