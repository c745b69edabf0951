use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The application form. Posts multipart data to the cover letter endpoint.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
