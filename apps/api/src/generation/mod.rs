// Cover letter generation: prompt template, pipeline orchestration, HTTP handlers.
// All completion calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
