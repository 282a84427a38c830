//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    auth::{auth_guard, get_current_user, log_in, register_user},
    budget::{get_budget_endpoint, set_budget_endpoint},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_expense_endpoint, list_expenses_endpoint,
    },
    not_found::get_404_not_found,
    summary::get_summary_endpoint,
};

/// Return a router with all the app's routes.
///
/// Every route except registering and logging in requires a valid bearer token.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in));

    let protected_routes = Router::new()
        .route(endpoints::CURRENT_USER, get(get_current_user))
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .put(edit_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint).put(set_budget_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        CategoryPolicy,
        endpoints::{self, format_endpoint},
        test_utils::{TEST_PASSWORD, must_create_app_state, must_create_test_server},
    };

    fn get_test_server() -> TestServer {
        must_create_test_server(must_create_app_state(CategoryPolicy::Open))
    }

    /// Register a user and return their bearer token.
    async fn register(server: &TestServer, name: &str, email: &str) -> String {
        let response = server
            .post(endpoints::REGISTER)
            .json(&json!({ "name": name, "email": email, "password": TEST_PASSWORD }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["token"]
            .as_str()
            .expect("token should be a string")
            .to_owned()
    }

    async fn create(server: &TestServer, token: &str, body: Value) -> Value {
        let response = server
            .post(endpoints::EXPENSES)
            .authorization_bearer(token)
            .json(&body)
            .await;

        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()
    }

    fn expense_route(expense: &Value) -> String {
        format_endpoint(
            endpoints::EXPENSE,
            expense["id"].as_i64().expect("id should be an integer"),
        )
    }

    #[tokio::test]
    async fn register_then_log_in() {
        let server = get_test_server();
        register(&server, "Alice", "alice@example.com").await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "alice@example.com", "password": TEST_PASSWORD }))
            .await;

        response.assert_status_ok();
        let token = response.json::<Value>()["token"]
            .as_str()
            .unwrap()
            .to_owned();
        let me = server
            .get(endpoints::CURRENT_USER)
            .authorization_bearer(token)
            .await;
        me.assert_status_ok();
        assert_eq!(me.json::<Value>()["name"], "Alice");
    }

    #[tokio::test]
    async fn log_in_with_wrong_password_is_unauthorized() {
        let server = get_test_server();
        register(&server, "Alice", "alice@example.com").await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "alice@example.com", "password": "nope" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>()["message"],
            "Invalid email or password"
        );
    }

    #[tokio::test]
    async fn expense_routes_require_token() {
        let server = get_test_server();

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>()["message"],
            "Not authorized, no token"
        );
    }

    #[tokio::test]
    async fn create_read_update_delete_expense() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;

        let created = create(
            &server,
            &token,
            json!({ "title": "Coffee", "amount": 5, "category": "Food", "date": "2025-10-05" }),
        )
        .await;
        let route = expense_route(&created);

        let fetched = server.get(&route).authorization_bearer(&token).await;
        fetched.assert_status_ok();
        fetched.assert_json(&created);

        let updated = server
            .put(&route)
            .authorization_bearer(&token)
            .json(&json!({ "amount": 6.5 }))
            .await;
        updated.assert_status_ok();
        let updated = updated.json::<Value>();
        assert_eq!(updated["amount"], 6.5);
        assert_eq!(updated["title"], "Coffee");
        assert_eq!(updated["owner"], created["owner"]);

        let deleted = server.delete(&route).authorization_bearer(&token).await;
        deleted.assert_status_ok();
        deleted.assert_json(&json!({ "message": "Expense removed" }));

        server
            .get(&route)
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn numeric_string_amount_is_coerced() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;

        let created = create(&server, &token, json!({ "title": "Lunch", "amount": "5" })).await;

        assert_eq!(created["amount"], 5.0);
    }

    #[tokio::test]
    async fn non_numeric_amount_is_rejected_and_not_stored() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;

        server
            .post(endpoints::EXPENSES)
            .authorization_bearer(&token)
            .json(&json!({ "title": "Lunch", "amount": "abc" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let list = server
            .get(endpoints::EXPENSES)
            .authorization_bearer(&token)
            .await;
        list.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn other_user_cannot_touch_expense() {
        let server = get_test_server();
        let alice_token = register(&server, "Alice", "alice@example.com").await;
        let bob_token = register(&server, "Bob", "bob@example.com").await;
        let expense = create(
            &server,
            &alice_token,
            json!({ "title": "Coffee", "amount": 5, "category": "Food" }),
        )
        .await;
        let route = expense_route(&expense);

        let response = server.delete(&route).authorization_bearer(&bob_token).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], "Not authorized");

        server
            .put(&route)
            .authorization_bearer(&bob_token)
            .json(&json!({ "title": "Mine now" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get(&route)
            .authorization_bearer(&bob_token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let alice_list = server
            .get(endpoints::EXPENSES)
            .authorization_bearer(&alice_token)
            .await;
        alice_list.assert_json(&json!([expense]));
        let bob_list = server
            .get(endpoints::EXPENSES)
            .authorization_bearer(&bob_token)
            .await;
        bob_list.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn owner_in_update_body_is_ignored() {
        let server = get_test_server();
        let alice_token = register(&server, "Alice", "alice@example.com").await;
        let bob_token = register(&server, "Bob", "bob@example.com").await;
        let bob_id = server
            .get(endpoints::CURRENT_USER)
            .authorization_bearer(&bob_token)
            .await
            .json::<Value>()["id"]
            .clone();
        let expense = create(&server, &alice_token, json!({ "title": "Coffee" })).await;
        let route = expense_route(&expense);

        let response = server
            .put(&route)
            .authorization_bearer(&alice_token)
            .json(&json!({ "owner": bob_id, "user": bob_id, "id": 999, "title": "Tea" }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["owner"], expense["owner"]);
        assert_eq!(updated["id"], expense["id"]);
        assert_eq!(updated["title"], "Tea");
        server
            .get(&route)
            .authorization_bearer(&alice_token)
            .await
            .assert_status_ok();
        server
            .get(&route)
            .authorization_bearer(&bob_token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, 999))
            .authorization_bearer(&token)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["message"], "Expense not found");
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;
        let older = create(&server, &token, json!({ "title": "A", "date": "2025-01-01" })).await;
        let newer = create(&server, &token, json!({ "title": "B", "date": "2025-03-01" })).await;
        let same_day = create(&server, &token, json!({ "title": "C", "date": "2025-03-01" })).await;

        let response = server
            .get(endpoints::EXPENSES)
            .authorization_bearer(&token)
            .await;

        response.assert_json(&json!([same_day, newer, older]));
    }

    #[tokio::test]
    async fn list_filters_by_category_and_search() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;
        let coffee = create(
            &server,
            &token,
            json!({ "title": "Morning Coffee", "category": "Food" }),
        )
        .await;
        create(&server, &token, json!({ "title": "Train", "category": "Travel" })).await;
        create(&server, &token, json!({ "title": "Groceries", "category": "Food" })).await;

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("category", "Food")
            .add_query_param("search", "coffee")
            .authorization_bearer(&token)
            .await;

        response.assert_json(&json!([coffee]));
    }

    #[tokio::test]
    async fn restricted_categories_reject_unknown_names() {
        let server =
            must_create_test_server(must_create_app_state(CategoryPolicy::Suggested));
        let token = register(&server, "Alice", "alice@example.com").await;

        server
            .post(endpoints::EXPENSES)
            .authorization_bearer(&token)
            .json(&json!({ "title": "Cat food", "category": "Pets" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        let created = create(&server, &token, json!({ "title": "Bus", "category": "travel" })).await;

        assert_eq!(created["category"], "Travel");
    }

    #[tokio::test]
    async fn budget_and_summary() {
        let server = get_test_server();
        let token = register(&server, "Alice", "alice@example.com").await;
        create(&server, &token, json!({ "title": "Rent", "amount": 900, "category": "Bills" })).await;
        create(&server, &token, json!({ "title": "Snacks", "amount": 50 })).await;

        let no_budget = server.get(endpoints::BUDGET).authorization_bearer(&token).await;
        no_budget.assert_json(&json!({ "amount": null }));
        server
            .put(endpoints::BUDGET)
            .authorization_bearer(&token)
            .json(&json!({ "amount": -5 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .put(endpoints::BUDGET)
            .authorization_bearer(&token)
            .json(&json!({ "amount": 1000 }))
            .await
            .assert_status_ok();

        let response = server
            .get(endpoints::SUMMARY)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let summary = response.json::<Value>();
        assert_eq!(summary["total"], 950.0);
        assert_eq!(summary["topCategory"], "Bills");
        assert_eq!(
            summary["categoryTotals"],
            json!([
                { "category": "Bills", "total": 900.0 },
                { "category": "Other", "total": 50.0 }
            ])
        );
        assert_eq!(summary["monthly"].as_array().map(Vec::len), Some(12));
        assert_eq!(summary["budget"]["remaining"], 50.0);
        assert_eq!(summary["budget"]["spentPercent"], 95.0);
        assert_eq!(summary["budget"]["status"], "warning");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nothing-here").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["message"], "Route not found");
    }
}
