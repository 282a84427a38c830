use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error, Identity,
    database_id::ExpenseId,
    db::lock_connection,
    expense::{core::delete_expense, ownership::get_owned_expense},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The body sent back after an expense is deleted.
#[derive(Debug, PartialEq, Serialize)]
pub struct DeleteConfirmation {
    message: &'static str,
}

/// A route handler for deleting one of the requester's expenses.
///
/// Responds with a confirmation message, 404 if the expense does not exist,
/// or 401 if the requester does not own it.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Extension(identity): Extension<Identity>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<DeleteConfirmation>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_owned_expense(&identity, expense_id, &connection)?;

    match delete_expense(expense_id, &connection)? {
        // The expense was checked above while holding the lock.
        0 => Err(Error::NotFound),
        _ => {
            tracing::debug!("User {} deleted expense {expense_id}", identity.user_id);
            Ok(Json(DeleteConfirmation {
                message: "Expense removed",
            }))
        }
    }
}
