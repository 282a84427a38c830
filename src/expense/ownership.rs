//! The single place where expense ownership is checked.

use rusqlite::Connection;

use crate::{
    Error, Identity,
    database_id::ExpenseId,
    expense::core::{Expense, get_expense},
};

/// Whether `identity` owns `expense`.
pub fn is_owner(identity: &Identity, expense: &Expense) -> bool {
    identity.user_id == expense.owner
}

/// Get the expense `id` on behalf of `identity`.
///
/// Every operation on a single existing expense must go through this function.
/// The caller should keep holding the database lock until it has finished
/// writing so that the check and the write happen together.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - [Error::NotOwner] if the expense belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_owned_expense(
    identity: &Identity,
    id: ExpenseId,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = get_expense(id, connection)?;

    if is_owner(identity, &expense) {
        Ok(expense)
    } else {
        tracing::warn!(
            "User {} tried to access expense {} owned by user {}",
            identity.user_id,
            id,
            expense.owner
        );
        Err(Error::NotOwner)
    }
}
