//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::models::application::{ApplicationInputs, CoverLetter};
use crate::state::AppState;

/// POST /api/v1/cover-letters
///
/// Multipart form with `company_name`, `position`, `job_description` and a
/// `resume` PDF file. Unknown fields are ignored.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CoverLetter>, AppError> {
    let inputs = read_application_form(multipart, state.config.max_upload_bytes).await?;
    let letter = state.cover_letters.generate(inputs).await?;
    Ok(Json(letter))
}

async fn read_application_form(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<ApplicationInputs, AppError> {
    let mut inputs = ApplicationInputs::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| form_error(e, "Invalid form submission", max_upload_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "company_name" => inputs.company_name = read_text(field, max_upload_bytes).await?,
            "position" => inputs.position = read_text(field, max_upload_bytes).await?,
            "job_description" => {
                inputs.job_description = read_text(field, max_upload_bytes).await?
            }
            "resume" => {
                debug!(
                    "Resume upload: file_name={:?}, content_type={:?}",
                    field.file_name(),
                    field.content_type()
                );
                inputs.resume_pdf = field.bytes().await.map_err(|e| {
                    form_error(e, "Could not read resume upload", max_upload_bytes)
                })?;
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(inputs)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    max_upload_bytes: usize,
) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field.text().await.map_err(|e| {
        form_error(
            e,
            &format!("Field '{name}' is not valid text"),
            max_upload_bytes,
        )
    })
}

/// Body-limit overflows surface as 413 with the limit; anything else is a malformed form.
fn form_error(e: MultipartError, context: &str, max_upload_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!(
            "The upload exceeds the {} byte limit. Please upload a smaller PDF resume.",
            max_upload_bytes
        ));
    }
    AppError::Validation(format!("{context}: {e}"))
}
