//! Spending summary
//!
//! Totals a user's expenses overall, by category and by month, and compares
//! the total against their budget.

mod aggregation;
mod handlers;

use serde::Serialize;

pub use handlers::get_summary_endpoint;

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name, "Other" for expenses without one.
    pub category: String,
    /// The sum of the amounts in the category.
    pub total: f64,
}

/// The total spent in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The three-letter month name, e.g. "Jan".
    pub month: String,
    /// The year the month falls in.
    pub year: i32,
    /// The sum of the amounts of expenses dated in the month.
    pub total: f64,
}

/// How spending compares to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetStatus {
    /// Less than 80% of the budget is spent.
    OnTrack,
    /// At least 80% of the budget is spent.
    Warning,
    /// The whole budget is spent.
    OverBudget,
}

/// Spending against a set budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    /// The budget amount.
    pub amount: f64,
    /// The total spent.
    pub spent: f64,
    /// The budget left over, negative once the budget is exceeded.
    pub remaining: f64,
    /// The percentage of the budget spent, at most 100.
    pub spent_percent: f64,
    /// How spending compares to the budget.
    pub status: BudgetStatus,
}

/// The summary of a user's spending.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all expense amounts.
    pub total: f64,
    /// Totals per category, largest first.
    pub category_totals: Vec<CategoryTotal>,
    /// The category with the largest total, `null` without expenses.
    pub top_category: Option<String>,
    /// Totals for the last twelve months, oldest first.
    pub monthly: Vec<MonthlyTotal>,
    /// Spending against the budget, `null` when no budget is set.
    pub budget: Option<BudgetProgress>,
}
