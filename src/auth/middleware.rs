//! Authentication middleware that resolves the bearer token to a user.

use std::sync::{Arc, Mutex};

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, Error, Identity,
    auth::token::{TokenKeys, decode_token},
    db::lock_connection,
    user::get_user_by_id,
};

/// The state needed for authenticating users and issuing tokens.
#[derive(Clone)]
pub struct AuthState {
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The keys for signing and verifying tokens.
    pub token_keys: TokenKeys,
    /// How long newly issued tokens stay valid.
    pub token_duration: Duration,
    /// The bcrypt cost for hashing new passwords.
    pub password_cost: u32,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            token_keys: state.token_keys.clone(),
            token_duration: state.token_duration,
            password_cost: state.password_cost,
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// If the token is valid and belongs to a registered user, an [Identity] is
/// placed into the request and the request executed normally. Otherwise the
/// request is rejected with 401 Unauthorized and never reaches the handler.
///
/// **Note**: Route handlers can use the function argument `Extension(identity): Extension<Identity>` to receive the identity.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let identity = match authenticate(&mut parts, &state).await {
        Ok(identity) => identity,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(identity);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

async fn authenticate(parts: &mut Parts, state: &AuthState) -> Result<Identity, Error> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|rejection| {
            if rejection.is_missing() {
                Error::MissingToken
            } else {
                Error::InvalidToken
            }
        })?;

    let user_id = decode_token(bearer.token(), &state.token_keys)?;

    let connection = lock_connection(&state.db_connection)?;
    let user = get_user_by_id(user_id, &connection).map_err(|error| match error {
        Error::NotFound => {
            tracing::warn!("Token for user {user_id} who no longer exists");
            Error::InvalidToken
        }
        error => error,
    })?;

    Ok(Identity::from(user))
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Extension, Json, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use time::Duration;

    use crate::{
        Identity,
        auth::{
            AuthState,
            middleware::auth_guard,
            token::{TokenKeys, create_token},
        },
        test_utils::{must_create_test_connection, must_create_test_user},
        user::UserID,
    };

    async fn test_handler(Extension(identity): Extension<Identity>) -> Json<Identity> {
        Json(identity)
    }

    const TEST_PROTECTED_ROUTE: &str = "/protected";

    fn get_test_server() -> (TestServer, AuthState, UserID) {
        let conn = must_create_test_connection();
        let user = must_create_test_user(&conn, "alice@example.com");
        let state = AuthState {
            db_connection: std::sync::Arc::new(std::sync::Mutex::new(conn)),
            token_keys: TokenKeys::new("nafstenoas"),
            token_duration: Duration::minutes(5),
            password_cost: 4,
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            state,
            user.id,
        )
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_token() {
        let (server, state, user_id) = get_test_server();
        let token = create_token(user_id, state.token_duration, &state.token_keys).unwrap();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        let identity = response.json::<Value>();
        assert_eq!(identity["id"], user_id.as_i64());
        assert_eq!(identity["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn get_protected_route_with_missing_header() {
        let (server, _, _) = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>()["message"],
            "Not authorized, no token"
        );
    }

    #[tokio::test]
    async fn get_protected_route_with_invalid_token() {
        let (server, _, _) = get_test_server();

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer("FOOBAR")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_expired_token() {
        let (server, state, user_id) = get_test_server();
        let token = create_token(user_id, Duration::hours(-2), &state.token_keys).unwrap();

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_token_for_unknown_user() {
        let (server, state, _) = get_test_server();
        let token = create_token(
            UserID::new(999),
            state.token_duration,
            &state.token_keys,
        )
        .unwrap();

        server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
