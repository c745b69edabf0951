// Prompt text for cover letter generation.

/// System turn sent with every generation request.
pub const COVER_LETTER_SYSTEM: &str = "You are a helpful assistant that writes cover letters.";

/// Fills the cover letter template.
///
/// Inputs are inserted literally. Text that looks like a placeholder is not
/// expanded, since `format!` never re-scans its arguments.
pub fn build_cover_letter_prompt(
    company_name: &str,
    position: &str,
    job_description: &str,
    resume: &str,
) -> String {
    format!(
        r#"As an experienced professional resume writer, create a compelling cover letter
for the {position} position at {company_name}. Use the provided job
description and resume to highlight the candidate's relevant qualifications
and enthusiasm.

Job Description: {job_description}
Candidate's Resume: {resume}

Write a cover letter with:
1. Opening: Address hiring manager, mention position and company, express enthusiasm.
2. Body 1: Highlight 2-3 key qualifications aligning with job requirements. Provide examples.
3. Body 2: Discuss interest in role and company. Show company research.
4. Closing: Summarize fit, express interview eagerness, thank the reader.
5. Signature: Professional closing and [Your Name].

Guidelines:
- Concise (under 400 words)
- Professional yet engaging tone
- Tailored to job and company
- Avoid verbatim resume repetition
- Proofread for errors

Cover Letter:"#
    )
}
