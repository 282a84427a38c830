//! Expense aggregation for the spending summary.
//!
//! Provides functions to total expenses, group them by category and month, and
//! compare the total against a budget.

use std::collections::HashMap;

use time::{Date, Month};

use crate::Expense;

use super::{BudgetProgress, BudgetStatus, CategoryTotal, MonthlyTotal};

/// The label used for expenses without a category.
pub(super) const UNCATEGORIZED_LABEL: &str = "Other";

/// The number of months shown in the monthly trend, including the current month.
pub(super) const MONTHS_IN_TREND: usize = 12;

/// Spending at or above this percentage of the budget is a warning.
const WARNING_PERCENT: f64 = 80.0;

/// Sums the expense amounts. Expenses without an amount count as zero.
pub(super) fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().filter_map(|expense| expense.amount).sum()
}

/// Groups expenses by category and sums each group.
///
/// Expenses with a missing or blank category are grouped under
/// [UNCATEGORIZED_LABEL].
///
/// # Returns
/// The totals sorted from largest to smallest, ties sorted by category name.
pub(super) fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for expense in expenses {
        let category = expense
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED_LABEL);

        *totals.entry(category).or_insert(0.0) += expense.amount.unwrap_or(0.0);
    }

    let mut totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    totals
}

/// Totals expenses by the month of their date for the [MONTHS_IN_TREND]
/// months ending with the month of `today`.
///
/// # Returns
/// One entry per month, oldest first. Months without expenses have a total of
/// zero and expenses outside the window are ignored.
pub(super) fn monthly_totals(expenses: &[Expense], today: Date) -> Vec<MonthlyTotal> {
    let months = trailing_months(today);

    let mut totals: HashMap<(i32, Month), f64> = HashMap::new();
    for expense in expenses {
        let key = (expense.date.year(), expense.date.month());
        *totals.entry(key).or_insert(0.0) += expense.amount.unwrap_or(0.0);
    }

    months
        .into_iter()
        .map(|(year, month)| MonthlyTotal {
            month: format_month_label(month).to_owned(),
            year,
            total: totals.get(&(year, month)).copied().unwrap_or(0.0),
        })
        .collect()
}

/// The year and month of the [MONTHS_IN_TREND] months ending with `today`, oldest first.
fn trailing_months(today: Date) -> Vec<(i32, Month)> {
    let mut months = Vec::with_capacity(MONTHS_IN_TREND);
    let (mut year, mut month) = (today.year(), today.month());

    for _ in 0..MONTHS_IN_TREND {
        months.push((year, month));

        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    months.reverse();
    months
}

/// Formats a month as a three-letter abbreviation, e.g. "Jan".
pub(super) fn format_month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Compares the amount spent against the budget, if one is set.
///
/// The percentage spent is capped at 100 while the status still reports
/// spending over the budget.
pub(super) fn budget_progress(spent: f64, budget: Option<f64>) -> Option<BudgetProgress> {
    let amount = budget.filter(|amount| *amount > 0.0)?;
    let percent = spent * 100.0 / amount;

    let status = if percent >= 100.0 {
        BudgetStatus::OverBudget
    } else if percent >= WARNING_PERCENT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OnTrack
    };

    Some(BudgetProgress {
        amount,
        spent,
        remaining: amount - spent,
        spent_percent: percent.min(100.0),
        status,
    })
}
