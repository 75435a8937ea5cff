#[cfg(test)]
mod integration_tests {
    use crate::handlers::budgets::CreateBudgetRequest;
    use crate::handlers::categories::CreateCategoryRequest;
    use crate::handlers::debts::CreateDebtRequest;
    use crate::handlers::investments::CreateInvestmentRequest;
    use crate::handlers::transactions::{CreateTransactionRequest, UpdateTransactionRequest};
    use crate::handlers::users::CreateUserRequest;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Decimals cross the API as strings; parse before comparing so the
    /// stored scale does not matter.
    fn dec(value: &serde_json::Value) -> Decimal {
        Decimal::from_str(value.as_str().expect("expected decimal string")).unwrap()
    }

    async fn create_user(server: &TestServer, username: &str) -> i64 {
        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                username: username.to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_category(server: &TestServer, user_id: i64, name: &str, kind: &str) -> i64 {
        let response = server
            .post(&format!("/api/v1/users/{}/categories", user_id))
            .json(&CreateCategoryRequest {
                name: name.to_string(),
                kind: kind.to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_transaction(
        server: &TestServer,
        user_id: i64,
        category_id: i64,
        kind: &str,
        amount: Decimal,
        transaction_date: NaiveDate,
    ) -> i64 {
        let response = server
            .post(&format!("/api/v1/users/{}/transactions", user_id))
            .json(&CreateTransactionRequest {
                amount,
                description: format!("{} of {}", kind, amount),
                kind: kind.to_string(),
                category_id: category_id as i32,
                transaction_date,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "testuser").await;

        let response = server.get(&format!("/api/v1/users/{}", user_id)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["username"], "testuser");
        assert_eq!(body.data["id"], user_id);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/users/99999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_category_rejects_invalid_kind() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "testuser").await;

        let response = server
            .post(&format!("/api/v1/users/{}/categories", user_id))
            .json(&CreateCategoryRequest {
                name: "Mystery".to_string(),
                kind: "sideways".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_KIND");
    }

    #[tokio::test]
    async fn test_create_transaction_rejects_kind_mismatch() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "testuser").await;
        let salary = create_category(&server, user_id, "Salary", "income").await;

        // An expense cannot land in an income category on create.
        let response = server
            .post(&format!("/api/v1/users/{}/transactions", user_id))
            .json(&CreateTransactionRequest {
                amount: Decimal::new(1000, 2),
                description: "mismatched".to_string(),
                kind: "expense".to_string(),
                category_id: salary as i32,
                transaction_date: date(2024, 1, 10),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "CATEGORY_KIND_MISMATCH");
    }

    #[tokio::test]
    async fn test_create_transaction_rejects_foreign_category() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "testuser").await;
        let other_id = create_user(&server, "otheruser").await;
        let other_food = create_category(&server, other_id, "Food", "expense").await;

        let response = server
            .post(&format!("/api/v1/users/{}/transactions", user_id))
            .json(&CreateTransactionRequest {
                amount: Decimal::new(1000, 2),
                description: "stolen category".to_string(),
                kind: "expense".to_string(),
                category_id: other_food as i32,
                transaction_date: date(2024, 1, 10),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_CATEGORY");
    }

    #[tokio::test]
    async fn test_update_transaction_applies_sparse_patch() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "testuser").await;
        let food = create_category(&server, user_id, "Food", "expense").await;
        let tx_id = create_transaction(
            &server,
            user_id,
            food,
            "expense",
            Decimal::new(5000, 2),
            date(2024, 1, 10),
        )
        .await;

        // Patch only the amount; every other field must survive.
        let response = server
            .put(&format!("/api/v1/transactions/{}", tx_id))
            .json(&UpdateTransactionRequest {
                amount: Some(Decimal::new(7500, 2)),
                description: None,
                kind: None,
                category_id: None,
                transaction_date: None,
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(dec(&body.data["amount"]), Decimal::new(7500, 2));
        assert_eq!(body.data["description"], "expense of 50.00");
        assert_eq!(body.data["kind"], "expense");
        assert_eq!(body.data["transaction_date"], "2024-01-10");
    }

    #[tokio::test]
    async fn test_financial_summary_reports_period_totals() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "reporter").await;
        let salary = create_category(&server, user_id, "Salary", "income").await;
        let food = create_category(&server, user_id, "Food", "expense").await;

        // Income 5000 + 1200, expenses 800 + 300, all inside January.
        create_transaction(&server, user_id, salary, "income", Decimal::new(500000, 2), date(2024, 1, 15)).await;
        create_transaction(&server, user_id, salary, "income", Decimal::new(120000, 2), date(2024, 1, 20)).await;
        create_transaction(&server, user_id, food, "expense", Decimal::new(80000, 2), date(2024, 1, 10)).await;
        create_transaction(&server, user_id, food, "expense", Decimal::new(30000, 2), date(2024, 1, 25)).await;

        // Overall budget of 3000 overlapping January; another entirely in
        // February which must not appear.
        let budget_response = server
            .post(&format!("/api/v1/users/{}/budgets", user_id))
            .json(&CreateBudgetRequest {
                name: "Overall".to_string(),
                category_id: None,
                budget_amount: Decimal::new(300000, 2),
                period_type: "monthly".to_string(),
                start_date: date(2024, 1, 1),
                end_date: date(2024, 1, 31),
            })
            .await;
        budget_response.assert_status(StatusCode::CREATED);
        let february_response = server
            .post(&format!("/api/v1/users/{}/budgets", user_id))
            .json(&CreateBudgetRequest {
                name: "February".to_string(),
                category_id: None,
                budget_amount: Decimal::new(100000, 2),
                period_type: "monthly".to_string(),
                start_date: date(2024, 2, 1),
                end_date: date(2024, 2, 29),
            })
            .await;
        february_response.assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!(
                "/api/v1/users/{}/reports/summary?start_date=2024-01-01&end_date=2024-01-31",
                user_id
            ))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        let summary = &body.data;

        assert_eq!(summary["user_id"], user_id);
        assert_eq!(dec(&summary["total_income"]), Decimal::new(620000, 2));
        assert_eq!(dec(&summary["total_expenses"]), Decimal::new(110000, 2));
        assert_eq!(dec(&summary["net_income"]), Decimal::new(510000, 2));

        let budgets = summary["budget_performance"].as_array().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0]["budget_name"], "Overall");
        assert_eq!(dec(&budgets[0]["spent_amount"]), Decimal::new(110000, 2));
        assert_eq!(dec(&budgets[0]["remaining_amount"]), Decimal::new(190000, 2));
        // 1100 / 3000 * 100 = 36.67 after rounding.
        assert_eq!(dec(&budgets[0]["percentage_used"]), Decimal::new(3667, 2));
    }

    #[tokio::test]
    async fn test_summary_valuations_ignore_reporting_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "investor").await;

        let investment_response = server
            .post(&format!("/api/v1/users/{}/investments", user_id))
            .json(&CreateInvestmentRequest {
                name: "Index fund".to_string(),
                investment_type: "etf".to_string(),
                quantity: Decimal::from_str("12.50000000").unwrap(),
                purchase_price: Decimal::new(10000, 2),
                current_value: Decimal::new(180000, 2),
                purchase_date: date(2023, 6, 1),
            })
            .await;
        investment_response.assert_status(StatusCode::CREATED);
        let second_investment = server
            .post(&format!("/api/v1/users/{}/investments", user_id))
            .json(&CreateInvestmentRequest {
                name: "Brokerage".to_string(),
                investment_type: "stock".to_string(),
                quantity: Decimal::from_str("0.00000001").unwrap(),
                purchase_price: Decimal::new(1, 2),
                current_value: Decimal::new(2500000, 2),
                purchase_date: date(2023, 7, 1),
            })
            .await;
        second_investment.assert_status(StatusCode::CREATED);

        let debt_response = server
            .post(&format!("/api/v1/users/{}/debts", user_id))
            .json(&CreateDebtRequest {
                lender: "Bank".to_string(),
                debt_type: "mortgage".to_string(),
                original_amount: Decimal::new(30000000, 2),
                current_balance: Decimal::new(1200000, 2),
                interest_rate: Decimal::from_str("0.0525").unwrap(),
                minimum_payment: Decimal::new(150000, 2),
                due_date: Some(date(2024, 2, 1)),
            })
            .await;
        debt_response.assert_status(StatusCode::CREATED);

        // Two disjoint periods must report the same snapshots.
        for (start, end) in [("2024-01-01", "2024-01-31"), ("2030-06-01", "2030-06-30")] {
            let response = server
                .get(&format!(
                    "/api/v1/users/{}/reports/summary?start_date={}&end_date={}",
                    user_id, start, end
                ))
                .await;
            response.assert_status(StatusCode::OK);
            let body: ApiResponse<serde_json::Value> = response.json();

            assert_eq!(
                dec(&body.data["total_investments_value"]),
                Decimal::new(2680000, 2)
            );
            assert_eq!(dec(&body.data["total_debt_balance"]), Decimal::new(1200000, 2));
        }
    }

    #[tokio::test]
    async fn test_summary_for_unknown_user_is_all_zero() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/users/424242/reports/summary?start_date=2024-01-01&end_date=2024-01-31")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(dec(&body.data["total_income"]), Decimal::ZERO);
        assert_eq!(dec(&body.data["total_expenses"]), Decimal::ZERO);
        assert_eq!(dec(&body.data["net_income"]), Decimal::ZERO);
        assert!(body.data["budget_performance"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_spending_breakdown() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "spender").await;
        let food = create_category(&server, user_id, "Food", "expense").await;
        let transport = create_category(&server, user_id, "Transport", "expense").await;
        let salary = create_category(&server, user_id, "Salary", "income").await;

        // Food 100 + 150, Transport 50, grand total 300.
        create_transaction(&server, user_id, food, "expense", Decimal::new(10000, 2), date(2024, 1, 5)).await;
        create_transaction(&server, user_id, food, "expense", Decimal::new(15000, 2), date(2024, 1, 12)).await;
        create_transaction(&server, user_id, transport, "expense", Decimal::new(5000, 2), date(2024, 1, 20)).await;
        // Income and out-of-range expenses must not show up.
        create_transaction(&server, user_id, salary, "income", Decimal::new(500000, 2), date(2024, 1, 15)).await;
        create_transaction(&server, user_id, food, "expense", Decimal::new(9900, 2), date(2024, 2, 2)).await;

        let response = server
            .get(&format!(
                "/api/v1/users/{}/reports/category-spending?start_date=2024-01-01&end_date=2024-01-31",
                user_id
            ))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.success);
        assert_eq!(body.data.len(), 2);

        let food_row = body
            .data
            .iter()
            .find(|row| row["category_name"] == "Food")
            .unwrap();
        assert_eq!(dec(&food_row["total_amount"]), Decimal::new(25000, 2));
        assert_eq!(food_row["transaction_count"], 2);
        assert_eq!(dec(&food_row["percentage_of_total"]), Decimal::new(8333, 2));

        let transport_row = body
            .data
            .iter()
            .find(|row| row["category_name"] == "Transport")
            .unwrap();
        assert_eq!(dec(&transport_row["total_amount"]), Decimal::new(5000, 2));
        assert_eq!(transport_row["transaction_count"], 1);
        assert_eq!(dec(&transport_row["percentage_of_total"]), Decimal::new(1667, 2));

        let percentage_sum: Decimal = body
            .data
            .iter()
            .map(|row| dec(&row["percentage_of_total"]))
            .sum();
        assert_eq!(percentage_sum, Decimal::ONE_HUNDRED);
    }

    #[tokio::test]
    async fn test_category_spending_empty_for_quiet_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let user_id = create_user(&server, "spender").await;
        let food = create_category(&server, user_id, "Food", "expense").await;
        create_transaction(&server, user_id, food, "expense", Decimal::new(10000, 2), date(2024, 1, 5)).await;

        // A later period with no expenses yields an empty list.
        let response = server
            .get(&format!(
                "/api/v1/users/{}/reports/category-spending?start_date=2024-03-01&end_date=2024-03-31",
                user_id
            ))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.data.is_empty());
    }
}
