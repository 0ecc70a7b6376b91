use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Body sent with every 403.
pub const FORBIDDEN_PAGE: &str =
    "<h3 style='color: red;'>403 - Forbidden: The requested file is not for the public.</h3>";

/// Body sent with a 404 when no custom page is configured.
pub const DEFAULT_NOT_FOUND_PAGE: &str =
    "<h3 style='color: red;'>404 - Not found: That file not found on this server.</h3>";

const HTML: &str = "text/html";

/// The single decision made for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    Forbidden,
    NotFound,
    Ok { content: Vec<u8>, mime_type: String },
}

impl ResponseOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            ResponseOutcome::Forbidden => StatusCode::Forbidden,
            ResponseOutcome::NotFound => StatusCode::NotFound,
            ResponseOutcome::Ok { .. } => StatusCode::Ok,
        }
    }

    /// Builds the HTTP response. `not_found_page` is the configured (or
    /// default) 404 body.
    pub fn into_response(self, not_found_page: &[u8]) -> Response {
        match self {
            ResponseOutcome::Forbidden => ResponseBuilder::new(StatusCode::Forbidden)
                .header("Content-Type", HTML)
                .body(FORBIDDEN_PAGE.as_bytes().to_vec())
                .build(),
            ResponseOutcome::NotFound => ResponseBuilder::new(StatusCode::NotFound)
                .header("Content-Type", HTML)
                .body(not_found_page.to_vec())
                .build(),
            ResponseOutcome::Ok { content, mime_type } => ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", mime_type)
                .body(content)
                .build(),
        }
    }
}
