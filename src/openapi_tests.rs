#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_schema_generation() {
        // Test that the OpenAPI schema can be generated without errors
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("HealthResponse"));
        assert!(components.schemas.contains_key("FinancialSummary"));
        assert!(components.schemas.contains_key("BudgetPerformance"));
        assert!(components.schemas.contains_key("CategorySpending"));

        // Verify that the schema can be serialized to JSON without errors
        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_report_paths_are_documented() {
        let openapi = ApiDoc::openapi();

        let paths = openapi.paths.paths;
        assert!(paths.contains_key("/api/v1/users/{user_id}/reports/summary"));
        assert!(paths.contains_key("/api/v1/users/{user_id}/reports/category-spending"));
        assert!(paths.contains_key("/health"));
    }

    #[test]
    fn test_financial_summary_schema_structure() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let summary_schema = components.schemas.get("FinancialSummary").unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) =
            summary_schema
        {
            let properties = &obj.properties;
            assert!(properties.contains_key("total_income"));
            assert!(properties.contains_key("total_expenses"));
            assert!(properties.contains_key("net_income"));
            assert!(properties.contains_key("total_investments_value"));
            assert!(properties.contains_key("total_debt_balance"));
            assert!(properties.contains_key("budget_performance"));
        } else {
            panic!("FinancialSummary should be an object schema");
        }
    }
}
