//! Each user may set a monthly spending budget that the summary compares
//! their spending against.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, Identity, UserID, db::lock_connection};

/// Create the budget table in the database.
///
/// Each user has at most one budget, which is removed along with the user.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
            user_id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

/// Get the budget of `user_id`, or `None` if they have not set one.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_budget(user_id: UserID, connection: &Connection) -> Result<Option<f64>, Error> {
    connection
        .query_row(
            "SELECT amount FROM budget WHERE user_id = ?1",
            [user_id.as_i64()],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::from)
}

/// Set the budget of `user_id` to `amount`, replacing any previous budget.
///
/// # Errors
/// Returns [Error::InvalidBudget] if `amount` is not a finite number greater
/// than zero, or [Error::SqlError] if the query fails.
pub fn set_budget(user_id: UserID, amount: f64, connection: &Connection) -> Result<(), Error> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidBudget(amount));
    }

    connection.execute(
        "INSERT INTO budget (user_id, amount) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET amount = excluded.amount",
        (user_id.as_i64(), amount),
    )?;

    Ok(())
}

/// The state needed to read and set budgets.
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The budget as sent to and from clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBody {
    /// The budget amount, `null` when no budget is set.
    pub amount: Option<f64>,
}

/// A route handler that responds with the requester's budget.
pub async fn get_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<BudgetBody>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let amount = get_budget(identity.user_id, &connection)?;

    Ok(Json(BudgetBody { amount }))
}

/// A route handler that sets the requester's budget.
///
/// A missing amount is rejected the same way as a non-positive one.
pub async fn set_budget_endpoint(
    State(state): State<BudgetState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<BudgetBody>,
) -> Result<Json<BudgetBody>, Error> {
    let amount = body.amount.unwrap_or(f64::NAN);

    let connection = lock_connection(&state.db_connection)?;
    set_budget(identity.user_id, amount, &connection)?;
    tracing::debug!("User {} set their budget to {amount}", identity.user_id);

    Ok(Json(BudgetBody {
        amount: Some(amount),
    }))
}
