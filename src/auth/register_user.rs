//! Registration of new users.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    Email, Error, PasswordHash, ValidatedPassword,
    auth::{AuthResponse, AuthState, token::create_token},
    db::lock_connection,
    user::create_user,
};

/// The details a client sends to register.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
}

/// A route handler for registering a new user.
///
/// Responds with 201 Created, the user's details and a bearer token so that
/// the client is logged in straight away.
///
/// # Errors
///
/// Responds with an error if:
/// - the name is empty,
/// - the email is invalid or already registered,
/// - or the password is too weak.
pub async fn register_user(
    State(state): State<AuthState>,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    let email = Email::new(&form.email)?;
    let password = ValidatedPassword::new(&form.password, &[name, email.as_str()])?;
    let password_hash = PasswordHash::new(password, state.password_cost)?;

    let user = {
        let connection = lock_connection(&state.db_connection)?;
        create_user(name, email, password_hash, &connection)?
    };

    let token = create_token(user.id, state.token_duration, &state.token_keys)?;
    tracing::info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}
