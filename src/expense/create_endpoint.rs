use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, Identity,
    db::lock_connection,
    expense::{
        CategoryPolicy,
        core::{Expense, create_expense},
        request::ExpenseRequest,
    },
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Which categories new expenses may use.
    pub category_policy: CategoryPolicy,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            category_policy: state.category_policy,
        }
    }
}

/// A route handler for recording a new expense owned by the requester.
///
/// Responds with 201 Created and the stored expense.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<ExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let new_expense = request.into_new_expense(state.category_policy)?;
    let connection = lock_connection(&state.db_connection)?;

    let expense = create_expense(identity.user_id, new_expense, &connection)?;
    tracing::debug!("User {} created expense {}", identity.user_id, expense.id);

    Ok((StatusCode::CREATED, Json(expense)))
}
