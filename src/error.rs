//! Defines the app level error type and its conversion to rendered HTML pages.
use axum::response::{IntoResponse, Response};

use crate::{
    category::CategoryId,
    error_page::{NotFoundPage, ServerErrorPage},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string, or a string of only whitespace, was used as a category name.
    #[error("name cannot be empty")]
    EmptyCategoryName,

    /// A category with the same name, ignoring case, already exists.
    #[error("category already exists")]
    DuplicateCategoryName(String),

    /// The amount of a movement was not a number or was not greater than zero.
    ///
    /// Holds the text that the user submitted.
    #[error("the amount must be a number greater than 0")]
    InvalidAmount(String),

    /// The category ID used to create a movement did not match a category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a category that does not exist.
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundPage.into_response(),
            Error::DatabaseLockError => ServerErrorPage {
                description: "The database is unavailable.",
                fix: "Restart the server and check the server logs.",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ServerErrorPage::default().into_response()
            }
        }
    }
}
