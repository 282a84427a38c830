//! Logging in with an email and password.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Email, Error,
    auth::{AuthResponse, AuthState, token::create_token},
    db::lock_connection,
    user::get_user_by_email,
};

/// The credentials a client sends to log in.
#[derive(Debug, Deserialize)]
pub struct LogInForm {
    email: String,
    password: String,
}

/// A route handler for logging in a registered user.
///
/// Responds with the user's details and a new bearer token.
///
/// # Errors
///
/// Responds with [Error::InvalidCredentials] both when the email is not
/// registered and when the password is wrong.
pub async fn log_in(
    State(state): State<AuthState>,
    Json(form): Json<LogInForm>,
) -> Result<Json<AuthResponse>, Error> {
    let email = Email::new(&form.email).map_err(|_| Error::InvalidCredentials)?;

    let user = {
        let connection = lock_connection(&state.db_connection)?;
        get_user_by_email(&email, &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?
    };

    match user.password_hash.verify(&form.password) {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("Wrong password for user {}", user.id);
            return Err(Error::InvalidCredentials);
        }
        Err(error) => return Err(Error::HashingError(error.to_string())),
    }

    let token = create_token(user.id, state.token_duration, &state.token_keys)?;
    tracing::info!("User {} logged in", user.id);

    Ok(Json(AuthResponse::new(user, token)))
}
