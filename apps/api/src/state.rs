use crate::config::Config;
use crate::generation::generator::CoverLetterService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub cover_letters: CoverLetterService,
    pub config: Config,
}
