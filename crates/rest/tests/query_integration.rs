//! List query integration tests.
//!
//! Exercises the full query pipeline over HTTP: free-text search,
//! equality and operator filters, sorting, field projection, and
//! pagination, plus the rejection paths for malformed queries.

use axum_test::TestServer;
use kin_persistence::backends::MemoryStore;
use kin_rest::{AppState, ServerConfig};
use serde_json::{Value, json};
use std::sync::Arc;

/// Creates a test server with a seeded `users` collection.
fn create_user_server() -> TestServer {
    let users = vec![
        json!({"id": "u1", "name": "Amina Rahman", "email": "amina@example.com",
               "mobile": "01711111111", "role": "admin", "age": 34}),
        json!({"id": "u2", "name": "Bashir Uddin", "email": "bashir@example.com",
               "mobile": "01822222222", "role": "member", "age": 28}),
        json!({"id": "u3", "name": "Chidi Okafor", "email": "chidi@example.com",
               "mobile": "01933333333", "role": "member", "age": 45}),
        json!({"id": "u4", "name": "Amin Chowdhury", "email": "amin@example.com",
               "mobile": "01644444444", "role": "member", "age": 30}),
    ];

    let store = MemoryStore::seeded(vec![("users", users), ("posts", vec![])])
        .expect("Failed to seed store");
    let state = AppState::new(Arc::new(store), ServerConfig::for_testing());
    let app = kin_rest::routing::create_routes(state);
    TestServer::new(app).expect("Failed to create test server")
}

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|r| r["name"].as_str().expect("name should be a string"))
        .collect()
}

// =============================================================================
// Pagination
// =============================================================================

mod pagination {
    use super::*;

    #[tokio::test]
    async fn test_default_page_returns_all_with_metadata() {
        let server = create_user_server();

        let response = server.get("/api/v1/users").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User data fetched successfully!");
        assert_eq!(body["pagination"]["totalDocuments"], 4);
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(body["pagination"]["previousPage"], Value::Null);
        assert_eq!(body["pagination"]["nextPage"], Value::Null);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_page_window_and_links() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?page=2&limit=2&sort=name").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["pagination"]["totalDocuments"], 4);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["currentPage"], 2);
        assert_eq!(body["pagination"]["previousPage"], 1);
        assert_eq!(body["pagination"]["nextPage"], Value::Null);
        assert_eq!(names(&body), vec!["Bashir Uddin", "Chidi Okafor"]);
    }

    #[tokio::test]
    async fn test_zero_page_is_rejected() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?page=0").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_non_numeric_limit_is_rejected() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?limit=lots").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_configured_default_page_size_drives_list_limit() {
        let users: Vec<Value> = (1..=4)
            .map(|n| json!({"id": format!("u{n}"), "name": format!("User {n}")}))
            .collect();
        let store = MemoryStore::seeded(vec![("users", users)]).expect("Failed to seed store");
        let config = ServerConfig {
            default_page_size: 2,
            ..ServerConfig::for_testing()
        };
        let state = AppState::new(Arc::new(store), config);
        let app = kin_rest::routing::create_routes(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/api/v1/users").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["nextPage"], 2);
    }

    #[tokio::test]
    async fn test_huge_page_number_does_not_panic() {
        let server = create_user_server();

        let response = server
            .get("/api/v1/users?page=18446744073709551615&limit=100")
            .await;
        // The offset saturates and the page is simply empty.
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_limit_is_capped_at_max_page_size() {
        let server = create_user_server();

        // for_testing() caps pages at 50 records.
        let response = server.get("/api/v1/users?limit=10000").await;
        response.assert_status_ok();
    }
}

// =============================================================================
// Search
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_matches_substring_across_fields() {
        let server = create_user_server();

        // "amin" matches Amina Rahman by name and Amin Chowdhury by
        // name and email.
        let response = server.get("/api/v1/users?search=amin&sort=name").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Amin Chowdhury", "Amina Rahman"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?search=CHIDI").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Chidi Okafor"]);
    }

    #[tokio::test]
    async fn test_search_on_mobile_field() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?search=018").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Bashir Uddin"]);
    }

    #[tokio::test]
    async fn test_search_without_searchable_fields_is_rejected() {
        let server = create_user_server();

        let response = server.get("/api/v1/posts?search=anything").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_no_matches_returns_404_with_label_message() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?search=zzzzz").await;
        response.assert_status_not_found();

        let body: Value = response.json();
        assert_eq!(body["error"]["message"], "Couldn't find any user data!");
    }
}

// =============================================================================
// Filters
// =============================================================================

mod filters {
    use super::*;

    #[tokio::test]
    async fn test_equality_filter() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?role=admin").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Amina Rahman"]);
    }

    #[tokio::test]
    async fn test_numeric_range_filter() {
        let server = create_user_server();

        let response = server
            .get("/api/v1/users?age[gte]=30&age[lt]=40&sort=name")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Amin Chowdhury", "Amina Rahman"]);
    }

    #[tokio::test]
    async fn test_in_filter() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?age[in]=28,45&sort=name").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Bashir Uddin", "Chidi Okafor"]);
    }

    #[tokio::test]
    async fn test_unknown_operator_is_rejected() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?age[like]=30").await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["status"], 400);
    }

    #[tokio::test]
    async fn test_non_numeric_operator_value_is_rejected() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?age[gt]=abc").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_search_combines_with_filters() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?search=amin&age[gt]=32").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(names(&body), vec!["Amina Rahman"]);
    }
}

// =============================================================================
// Sort and Projection
// =============================================================================

mod shaping {
    use super::*;

    #[tokio::test]
    async fn test_sort_descending() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?sort=-age").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            names(&body),
            vec![
                "Chidi Okafor",
                "Amina Rahman",
                "Amin Chowdhury",
                "Bashir Uddin"
            ]
        );
    }

    #[tokio::test]
    async fn test_fields_projection() {
        let server = create_user_server();

        let response = server.get("/api/v1/users?fields=name,email&limit=1&sort=name").await;
        response.assert_status_ok();

        let body: Value = response.json();
        let record = &body["data"][0];
        let keys: Vec<_> = record
            .as_object()
            .expect("record should be an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["name", "email"]);
    }
}
