//! The API endpoints URIs.

/// The route for registering a new user.
pub const REGISTER: &str = "/api/users/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/users/login";
/// The route for getting the logged in user's details.
pub const CURRENT_USER: &str = "/api/users/me";
/// The route to create and list expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to read, update and delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to get and set the user's budget.
pub const BUDGET: &str = "/api/budget";
/// The route for the summary of the user's spending.
pub const SUMMARY: &str = "/api/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
