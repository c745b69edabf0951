//! Cover Letter Generation — orchestrates the full pipeline.
//!
//! Flow: validate inputs → extract résumé text → build prompt →
//!       one completion call → return the text verbatim.
//!
//! Nothing is retried and nothing is persisted. Both collaborators are
//! injected so the pipeline carries no process-wide state.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::generation::prompts::{build_cover_letter_prompt, COVER_LETTER_SYSTEM};
use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};
use crate::models::application::{ApplicationInputs, CoverLetter, ModelConfig};

/// Builds the prompt and issues exactly one completion call.
///
/// Returns the first choice's text unmodified. Inputs are assumed to be
/// validated already.
pub async fn build_and_generate(
    llm: &dyn CompletionClient,
    company_name: &str,
    position: &str,
    job_description: &str,
    resume_text: &str,
    model: &ModelConfig,
) -> Result<String, LlmError> {
    let prompt = build_cover_letter_prompt(company_name, position, job_description, resume_text);

    let request = CompletionRequest {
        model: model.model.clone(),
        temperature: model.temperature,
        system: COVER_LETTER_SYSTEM.to_string(),
        prompt,
    };

    llm.complete(&request).await
}

/// The request-scoped pipeline. Cheap to clone; holds only shared handles.
#[derive(Clone)]
pub struct CoverLetterService {
    extractor: Arc<dyn TextExtractor>,
    llm: Arc<dyn CompletionClient>,
    model: ModelConfig,
}

impl CoverLetterService {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        llm: Arc<dyn CompletionClient>,
        model: ModelConfig,
    ) -> Self {
        Self {
            extractor,
            llm,
            model,
        }
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Runs the whole pipeline for one application.
    ///
    /// Validation happens before either collaborator is touched.
    pub async fn generate(&self, inputs: ApplicationInputs) -> Result<CoverLetter, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("cover_letter", %request_id);
        self.run(request_id, inputs).instrument(span).await
    }

    async fn run(&self, request_id: Uuid, inputs: ApplicationInputs) -> Result<CoverLetter, AppError> {
        inputs.validate()?;

        info!(
            "Generating cover letter for '{}' at '{}' ({} byte resume)",
            inputs.position,
            inputs.company_name,
            inputs.resume_pdf.len()
        );

        let extractor = Arc::clone(&self.extractor);
        let pdf = inputs.resume_pdf.clone();
        let resume_text = tokio::task::spawn_blocking(move || extractor.extract(&pdf))
            .await
            .context("resume extraction task failed")??;

        info!("Extracted {} characters of resume text", resume_text.len());

        let cover_letter = build_and_generate(
            self.llm.as_ref(),
            &inputs.company_name,
            &inputs.position,
            &inputs.job_description,
            &resume_text,
            &self.model,
        )
        .await?;

        info!(
            "Cover letter generated: {} characters (model: {})",
            cover_letter.len(),
            self.model.model
        );

        Ok(CoverLetter {
            request_id,
            cover_letter,
            model: self.model.model.clone(),
            resume_chars: resume_text.chars().count(),
            generated_at: Utc::now(),
        })
    }
}
