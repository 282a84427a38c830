#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, CategoryPolicy, Email, Identity, PasswordHash, User, ValidatedPassword,
    auth::{AuthState, TokenKeys},
    build_router, create_user,
    db::initialize,
};

pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple";

pub(crate) const TEST_SECRET: &str = "a test secret that is not very secret";

/// The lowest cost bcrypt accepts, so tests do not spend seconds hashing.
pub(crate) const TEST_PASSWORD_COST: u32 = 4;

pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

/// Create a user named after the local part of `email` with the password [TEST_PASSWORD].
pub(crate) fn must_create_test_user(connection: &Connection, email: &str) -> User {
    let name = email.split('@').next().unwrap_or(email);
    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(TEST_PASSWORD),
        TEST_PASSWORD_COST,
    )
    .expect("Could not hash test password");

    create_user(name, Email::new_unchecked(email), password_hash, connection)
        .expect("Could not create test user")
}

pub(crate) fn identity_for(user: &User) -> Identity {
    Identity::from(user.clone())
}

pub(crate) fn must_create_auth_state() -> AuthState {
    AuthState {
        db_connection: Arc::new(Mutex::new(must_create_test_connection())),
        token_keys: TokenKeys::new(TEST_SECRET),
        token_duration: Duration::minutes(5),
        password_cost: TEST_PASSWORD_COST,
    }
}

pub(crate) fn must_create_app_state(category_policy: CategoryPolicy) -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, TEST_SECRET, category_policy)
        .expect("Could not create app state")
        .with_password_cost(TEST_PASSWORD_COST)
}

pub(crate) fn must_create_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server")
}
