use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, Identity,
    database_id::ExpenseId,
    db::lock_connection,
    expense::{
        core::{Expense, ExpenseFilter, list_expenses},
        ownership::get_owned_expense,
    },
};

/// The state needed to read expenses.
#[derive(Debug, Clone)]
pub struct ViewExpensesState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ViewExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Optional filters for listing expenses. Empty values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    category: Option<String>,
    search: Option<String>,
}

impl From<ListQuery> for ExpenseFilter {
    fn from(query: ListQuery) -> Self {
        let non_empty = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        Self {
            category: non_empty(query.category),
            search: non_empty(query.search),
        }
    }
}

/// A route handler for listing the requester's expenses, most recent first.
pub async fn list_expenses_endpoint(
    State(state): State<ViewExpensesState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    list_expenses(identity.user_id, &query.into(), &connection).map(Json)
}

/// A route handler for getting one of the requester's expenses.
pub async fn get_expense_endpoint(
    State(state): State<ViewExpensesState>,
    Extension(identity): Extension<Identity>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<Expense>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_owned_expense(&identity, expense_id, &connection).map(Json)
}
