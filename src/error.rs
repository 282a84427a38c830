//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password do not match a registered user.
    ///
    /// The same error is used for an unknown email and a wrong password so
    /// that clients cannot find out which emails are registered.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request did not include a bearer token.
    #[error("no bearer token in the authorization header")]
    MissingToken,

    /// The bearer token could not be decoded, has expired, or refers to a
    /// user that no longer exists.
    #[error("the bearer token is invalid")]
    InvalidToken,

    /// An error occurred while signing a new token.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// The requester tried to access an expense owned by another user.
    #[error("the requester does not own the expense")]
    NotOwner,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The string is not a valid email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The email address is already used by another user.
    #[error("the email {0} is already registered")]
    DuplicateEmail(String),

    /// An empty string was used as a user's name.
    #[error("name cannot be empty")]
    EmptyName,

    /// An expense amount that is not a finite number.
    #[error("{0} is not a valid amount")]
    InvalidAmount(String),

    /// A date that could not be parsed.
    #[error("{0} is not a valid date")]
    InvalidDate(String),

    /// A category that the configured category policy does not allow.
    #[error("\"{0}\" is not an allowed category")]
    InvalidCategory(String),

    /// A budget amount that is not a positive number.
    #[error("{0} is not a valid budget, it must be greater than zero")]
    InvalidBudget(f64),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

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

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials
            | Error::MissingToken
            | Error::InvalidToken
            | Error::NotOwner => StatusCode::UNAUTHORIZED,
            Error::TooWeak(_)
            | Error::InvalidEmail(_)
            | Error::EmptyName
            | Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::InvalidCategory(_)
            | Error::InvalidBudget(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateEmail(_) => StatusCode::CONFLICT,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::TokenCreation(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Error::InvalidCredentials => "Invalid email or password".to_owned(),
            Error::MissingToken => "Not authorized, no token".to_owned(),
            Error::InvalidToken => "Not authorized, token failed".to_owned(),
            Error::NotOwner => "Not authorized".to_owned(),
            Error::NotFound => "Expense not found".to_owned(),
            Error::TokenCreation(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => {
                let message = error.to_string();
                let mut chars = message.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => message,
                }
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            // Details are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
        } else {
            tracing::debug!("Rejecting request: {}", self);
        }

        let body = Json(json!({
            "message": self.client_message(),
        }));

        (status_code, body).into_response()
    }
}
