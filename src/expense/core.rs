//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row, named_params};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, UserID, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// Money spent by a user on something.
///
/// `title`, `amount` and `category` are optional because clients are not
/// required to send them, an absent value is stored as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The user that created the expense. Never changes after creation.
    pub owner: UserID,
    /// A short label, e.g. "Coffee".
    pub title: Option<String>,
    /// How much was spent.
    pub amount: Option<f64>,
    /// A free-text category, e.g. "Food".
    pub category: Option<String>,
    /// When the money was spent.
    pub date: Date,
    /// When the expense was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The fields needed to create a new [Expense].
///
/// ```ignore
/// let new_expense = NewExpense::new(date!(2025 - 10 - 05))
///     .title("Coffee")
///     .amount(5.0)
///     .category("Food");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A short label for the expense.
    pub title: Option<String>,
    /// How much was spent.
    pub amount: Option<f64>,
    /// A free-text category.
    pub category: Option<String>,
    /// When the money was spent.
    pub date: Date,
}

impl NewExpense {
    /// Start a new expense on `date` with no title, amount or category.
    pub fn new(date: Date) -> Self {
        Self {
            title: None,
            amount: None,
            category: None,
            date,
        }
    }

    /// Set the title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_owned());
        self
    }

    /// Set the amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }
}

/// Changes to apply to an existing expense. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<Date>,
}

/// Narrows down the expenses returned by [list_expenses].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Only include expenses with exactly this category.
    pub category: Option<String>,
    /// Only include expenses whose title contains this text, ignoring case.
    ///
    /// Expenses without a title are always included.
    pub search: Option<String>,
}

impl ExpenseFilter {
    /// Whether `title` contains the search text, ignoring case in any script.
    fn matches_title(&self, title: Option<&str>) -> bool {
        match (&self.search, title) {
            (Some(search), Some(title)) => title.to_lowercase().contains(&search.to_lowercase()),
            _ => true,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense owned by `owner`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error,
/// e.g. `owner` does not refer to a registered user.
pub fn create_expense(
    owner: UserID,
    new_expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(
            "INSERT INTO expense (owner_id, title, amount, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, owner_id, title, amount, category, date, created_at",
        )?
        .query_row(
            (
                owner.as_i64(),
                new_expense.title,
                new_expense.amount,
                new_expense.category,
                new_expense.date,
                OffsetDateTime::now_utc(),
            ),
            map_expense_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve an expense from the database by its `id`, regardless of owner.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "SELECT id, owner_id, title, amount, category, date, created_at
             FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| error.into())
}

/// Get the expenses owned by `owner` that match `filter`, most recent first.
///
/// Expenses on the same date are ordered by when they were created, newest
/// first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn list_expenses(
    owner: UserID,
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, owner_id, title, amount, category, date, created_at
             FROM expense
             WHERE owner_id = :owner_id
                AND (:category IS NULL OR category = :category)
             ORDER BY date DESC, id DESC",
        )?
        .query_map(
            named_params! {
                ":owner_id": owner.as_i64(),
                ":category": filter.category,
            },
            map_expense_row,
        )?
        .filter_map(|maybe_expense| match maybe_expense {
            // SQLite's lower() only folds ASCII letters.
            Ok(expense) if !filter.matches_title(expense.title.as_deref()) => None,
            maybe_expense => Some(maybe_expense.map_err(Error::from)),
        })
        .collect()
}

/// Apply `changes` to the expense `id` and return the updated expense.
///
/// The owner and creation time are never changed.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    changes: &ExpenseChanges,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(
            "UPDATE expense
             SET title = COALESCE(:title, title),
                 amount = COALESCE(:amount, amount),
                 category = COALESCE(:category, category),
                 date = COALESCE(:date, date)
             WHERE id = :id
             RETURNING id, owner_id, title, amount, category, date, created_at",
        )?
        .query_row(
            named_params! {
                ":title": changes.title,
                ":amount": changes.amount,
                ":category": changes.category,
                ":date": changes.date,
                ":id": id,
            },
            map_expense_row,
        )
        .map_err(|error| error.into())
}

/// The number of rows changed by a query.
pub type RowsAffected = usize;

/// Delete the expense `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                title TEXT,
                amount REAL,
                category TEXT,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(owner_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Listing filters by owner and sorts by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_owner_date ON expense(owner_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let owner = UserID::new(row.get(1)?);
    let title = row.get(2)?;
    let amount = row.get(3)?;
    let category = row.get(4)?;
    let date = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Expense {
        id,
        owner,
        title,
        amount,
        category,
        date,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
