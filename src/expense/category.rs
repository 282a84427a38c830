//! Which category names an expense may use.

use crate::Error;

/// The categories offered to users when recording an expense.
pub const SUGGESTED_CATEGORIES: [&str; 5] = ["Food", "Travel", "Shopping", "Bills", "Other"];

/// Controls which category names the server accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Any category name is accepted, including none at all.
    #[default]
    Open,
    /// Only the [SUGGESTED_CATEGORIES] are accepted, ignoring case.
    ///
    /// An expense may still have no category.
    Suggested,
}

impl CategoryPolicy {
    /// Check `category` against the policy and return the name to store.
    ///
    /// Under [CategoryPolicy::Suggested] the name is replaced with the
    /// canonical spelling, e.g. "food" becomes "Food".
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if the policy does not allow `category`.
    pub fn apply(&self, category: Option<String>) -> Result<Option<String>, Error> {
        match (self, category) {
            (_, None) => Ok(None),
            (CategoryPolicy::Open, Some(category)) => Ok(Some(category)),
            (CategoryPolicy::Suggested, Some(category)) => SUGGESTED_CATEGORIES
                .iter()
                .find(|suggested| suggested.eq_ignore_ascii_case(category.trim()))
                .map(|suggested| Some((*suggested).to_owned()))
                .ok_or(Error::InvalidCategory(category)),
        }
    }
}
