//! Full pages shown in place of the requested page when something goes wrong.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The 404 page for unknown paths and missing resources.
pub struct NotFoundPage;

impl IntoResponse for NotFoundPage {
    fn into_response(self) -> Response {
        let markup = error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "Sorry, that page does not exist. Head back to the home page to find your ledger.",
        );

        (StatusCode::NOT_FOUND, Html(markup.into_string())).into_response()
    }
}

/// The 500 page for faults the user cannot fix by changing their input.
pub struct ServerErrorPage<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for ServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs.",
        }
    }
}

impl IntoResponse for ServerErrorPage<'_> {
    fn into_response(self) -> Response {
        let markup = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(markup.into_string())).into_response()
    }
}

/// The fallback route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    NotFoundPage.into_response()
}
