//! Registration, log in and the bearer token guard for protected routes.

mod identity;
mod log_in;
mod middleware;
mod register_user;
mod token;

use serde::{Deserialize, Serialize};

use crate::{Email, User, UserID};

pub use identity::{Identity, get_current_user};
pub use log_in::log_in;
pub use middleware::{AuthState, auth_guard};
pub use register_user::register_user;
pub use token::{DEFAULT_TOKEN_DURATION, TokenKeys};

/// The body sent back after registering or logging in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The user's ID.
    pub id: UserID,
    /// The user's name.
    pub name: String,
    /// The user's email.
    pub email: Email,
    /// The bearer token to send with requests to protected routes.
    pub token: String,
}

impl AuthResponse {
    fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }
    }
}
