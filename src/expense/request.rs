//! The JSON body accepted when creating or editing an expense.

use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    date_format::parse_date,
    expense::{
        CategoryPolicy,
        core::{ExpenseChanges, NewExpense},
    },
};

/// An amount as sent by a client, either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Convert to a number.
    ///
    /// Strings holding a number, e.g. "12.50", are coerced.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] for strings that are not numbers and for
    /// non-finite values.
    fn into_amount(self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => number,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAmount(text.clone()))?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(Error::InvalidAmount(amount.to_string()))
        }
    }
}

/// The expense fields a client may send.
///
/// Unknown fields, including `id`, `owner` and `createdAt`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl ExpenseRequest {
    fn into_changes(self, category_policy: CategoryPolicy) -> Result<ExpenseChanges, Error> {
        Ok(ExpenseChanges {
            title: self.title,
            amount: self.amount.map(AmountInput::into_amount).transpose()?,
            category: category_policy.apply(self.category)?,
            date: self.date.as_deref().map(parse_date).transpose()?,
        })
    }

    /// Validate the request as a new expense.
    ///
    /// The date defaults to today (UTC) when absent.
    pub fn into_new_expense(self, category_policy: CategoryPolicy) -> Result<NewExpense, Error> {
        let changes = self.into_changes(category_policy)?;

        Ok(NewExpense {
            title: changes.title,
            amount: changes.amount,
            category: changes.category,
            date: changes.date.unwrap_or_else(today),
        })
    }

    /// Validate the request as changes to an existing expense.
    pub fn into_expense_changes(
        self,
        category_policy: CategoryPolicy,
    ) -> Result<ExpenseChanges, Error> {
        self.into_changes(category_policy)
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        CategoryPolicy, Error,
        expense::request::{AmountInput, ExpenseRequest},
    };

    fn parse(value: serde_json::Value) -> ExpenseRequest {
        serde_json::from_value(value).expect("could not parse expense request")
    }

    #[test]
    fn numeric_string_amount_is_coerced() {
        let request = parse(json!({"amount": "12.50"}));

        let new_expense = request.into_new_expense(CategoryPolicy::Open).unwrap();

        assert_eq!(new_expense.amount, Some(12.5));
    }

    #[test]
    fn non_numeric_string_amount_is_rejected() {
        let request = parse(json!({"title": "Coffee", "amount": "five"}));

        let result = request.into_new_expense(CategoryPolicy::Open);

        assert_eq!(result, Err(Error::InvalidAmount("five".to_owned())));
    }

    #[test]
    fn negative_amount_is_accepted() {
        let amount = AmountInput::Number(-3.0).into_amount();

        assert_eq!(amount, Ok(-3.0));
    }

    #[test]
    fn owner_and_id_in_body_are_ignored() {
        let request = parse(json!({"id": 7, "owner": 2, "user": 2, "title": "Coffee"}));

        assert_eq!(request.title.as_deref(), Some("Coffee"));
        assert_eq!(request.amount, None);
    }

    #[test]
    fn date_accepts_timestamp() {
        let request = parse(json!({"date": "2025-10-05T08:30:00.000Z"}));

        let new_expense = request.into_new_expense(CategoryPolicy::Open).unwrap();

        assert_eq!(new_expense.date, date!(2025 - 10 - 05));
    }

    #[test]
    fn invalid_date_is_rejected() {
        let request = parse(json!({"date": "not a date"}));

        let result = request.into_expense_changes(CategoryPolicy::Open);

        assert_eq!(result, Err(Error::InvalidDate("not a date".to_owned())));
    }

    #[test]
    fn category_policy_is_applied() {
        let request = parse(json!({"category": "Pets"}));

        let result = request.into_new_expense(CategoryPolicy::Suggested);

        assert_eq!(result, Err(Error::InvalidCategory("Pets".to_owned())));
    }

    #[test]
    fn empty_request_leaves_everything_unchanged() {
        let changes = parse(json!({}))
            .into_expense_changes(CategoryPolicy::Open)
            .unwrap();

        assert_eq!(changes, Default::default());
    }
}
