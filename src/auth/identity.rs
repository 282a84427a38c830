//! The identity of the user making a request.

use axum::{Extension, Json};
use serde::Serialize;

use crate::{Email, User, UserID};

/// The user a request was authenticated as.
///
/// The auth guard places this in the request extensions. Route handlers take
/// it with `Extension(identity): Extension<Identity>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    /// The ID of the authenticated user.
    #[serde(rename = "id")]
    pub user_id: UserID,
    /// The name of the authenticated user.
    pub name: String,
    /// The email of the authenticated user.
    pub email: Email,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A route handler that responds with the authenticated user's details.
pub async fn get_current_user(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}
