//! The summary route handler.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, Expense, Identity,
    budget::get_budget,
    db::lock_connection,
    expense::{ExpenseFilter, list_expenses},
    summary::{
        Summary,
        aggregation::{budget_progress, category_totals, monthly_totals, total_spent},
    },
};

/// The state needed for summarising spending.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading expenses and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the requester's spending summary.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Summary>, Error> {
    let (expenses, budget) = {
        let connection = lock_connection(&state.db_connection)?;
        let expenses = list_expenses(identity.user_id, &ExpenseFilter::default(), &connection)?;
        let budget = get_budget(identity.user_id, &connection)?;
        (expenses, budget)
    };

    let today = OffsetDateTime::now_utc().date();

    Ok(Json(build_summary(&expenses, budget, today)))
}

fn build_summary(expenses: &[Expense], budget: Option<f64>, today: Date) -> Summary {
    let total = total_spent(expenses);
    let category_totals = category_totals(expenses);
    let top_category = category_totals
        .first()
        .map(|category_total| category_total.category.clone());

    Summary {
        total,
        top_category,
        category_totals,
        monthly: monthly_totals(expenses, today),
        budget: budget_progress(total, budget),
    }
}
