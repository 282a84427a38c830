//! Expense management.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the database functions for storing and querying expenses
//! - The ownership check shared by every operation on an existing expense
//! - The JSON route handlers for creating, listing, editing and deleting expenses

mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod ownership;
mod request;

pub use category::{CategoryPolicy, SUGGESTED_CATEGORIES};
pub use core::{
    Expense, ExpenseFilter, NewExpense, create_expense, create_expense_table, list_expenses,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use list_endpoint::{get_expense_endpoint, list_expenses_endpoint};
