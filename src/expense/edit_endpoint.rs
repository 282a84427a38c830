use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, Identity,
    database_id::ExpenseId,
    db::lock_connection,
    expense::{
        CategoryPolicy,
        core::{Expense, update_expense},
        ownership::get_owned_expense,
        request::ExpenseRequest,
    },
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Which categories edited expenses may use.
    pub category_policy: CategoryPolicy,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            category_policy: state.category_policy,
        }
    }
}

/// A route handler for changing one of the requester's expenses.
///
/// Fields missing from the body are left unchanged. A field sent as `null`
/// counts as missing, so a title, amount or category cannot be cleared once
/// set. Responds with the updated expense, 404 if the expense does not exist,
/// or 401 if the requester does not own it.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Extension(identity): Extension<Identity>,
    Path(expense_id): Path<ExpenseId>,
    Json(request): Json<ExpenseRequest>,
) -> Result<Json<Expense>, Error> {
    let changes = request.into_expense_changes(state.category_policy)?;
    let connection = lock_connection(&state.db_connection)?;

    get_owned_expense(&identity, expense_id, &connection)?;
    let expense = update_expense(expense_id, &changes, &connection)?;
    tracing::debug!("User {} updated expense {expense_id}", identity.user_id);

    Ok(Json(expense))
}
