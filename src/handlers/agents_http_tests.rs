//! HTTP tests for the agent endpoints
//!
//! Run against the in-memory store, so no database is needed.

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::AppState;
    use crate::handlers::configure_api_routes;
    use crate::services::{DirectoryStore, MemoryDirectoryStore};

    fn create_test_app_state(store: MemoryDirectoryStore) -> web::Data<AppState> {
        web::Data::new(AppState {
            store: Arc::new(store),
        })
    }

    macro_rules! init_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(create_test_app_state($store))
                    .service(web::scope("/api").configure(configure_api_routes)),
            )
            .await
        };
    }

    fn bot_submission() -> Value {
        json!({"name": "Bot", "description": "does things", "category": "Other"})
    }

    #[actix_rt::test]
    async fn submit_agent_returns_created_with_empty_counters() {
        let app = init_app!(MemoryDirectoryStore::new());

        let req = test::TestRequest::post()
            .uri("/api/agents")
            .set_json(bot_submission())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "Bot");
        assert_eq!(body["category"], "Other");
        assert_eq!(body["upvotes"], 0);
        assert_eq!(body["downvotes"], 0);
        assert_eq!(body["avg_rating"], Value::Null);
        assert_eq!(body["total_reviews"], 0);
        assert_eq!(body["github_url"], Value::Null);
        assert_eq!(body["score"], 0.0);
        assert!(body["id"].is_string());
        assert!(body["created_at"].is_string());
    }

    #[actix_rt::test]
    async fn invalid_submission_returns_field_errors_and_stores_nothing() {
        let store = MemoryDirectoryStore::new();
        let app = init_app!(store.clone());

        let req = test::TestRequest::post()
            .uri("/api/agents")
            .set_json(json!({
                "name": "",
                "description": "x".repeat(501),
                "category": "Gaming",
                "github_url": "not-a-url",
                "mcp_endpoint": ""
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let details = &body["error"]["details"];
        for field in ["name", "description", "category", "github_url"] {
            assert!(details[field].is_array(), "missing error for {field}");
        }
        assert!(details.get("mcp_endpoint").is_none());

        assert!(store.list_agents(None).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn malformed_json_is_a_validation_error() {
        let app = init_app!(MemoryDirectoryStore::new());

        let req = test::TestRequest::post()
            .uri("/api/agents")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_rt::test]
    async fn list_filters_by_category_newest_first() {
        let app = init_app!(MemoryDirectoryStore::new());

        for (name, category) in [("a", "Coding"), ("b", "Research"), ("c", "Coding")] {
            let req = test::TestRequest::post()
                .uri("/api/agents")
                .set_json(json!({"name": name, "description": "d", "category": category}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/agents").to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = all.iter().map(|a| a["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);

        let req = test::TestRequest::get().uri("/api/agents?category=All").to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 3);

        let req = test::TestRequest::get().uri("/api/agents?category=Coding").to_request();
        let coding: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = coding.iter().map(|a| a["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["c", "a"]);

        let req = test::TestRequest::get()
            .uri("/api/agents?category=Customer%20Service")
            .to_request();
        let empty: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(empty.is_empty());
    }

    #[actix_rt::test]
    async fn get_agent_by_id_and_missing_agent() {
        let app = init_app!(MemoryDirectoryStore::new());

        let req = test::TestRequest::post()
            .uri("/api/agents")
            .set_json(bot_submission())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let req = test::TestRequest::get().uri(&format!("/api/agents/{id}")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], created["id"]);

        let req = test::TestRequest::get()
            .uri(&format!("/api/agents/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let req = test::TestRequest::get().uri("/api/agents/not-a-uuid").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn three_upvotes_give_a_perfect_score() {
        let app = init_app!(MemoryDirectoryStore::new());

        let req = test::TestRequest::post()
            .uri("/api/agents")
            .set_json(bot_submission())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap();

        let mut last = Value::Null;
        for _ in 0..3 {
            let req = test::TestRequest::post()
                .uri(&format!("/api/agents/{id}/vote"))
                .set_json(json!({"direction": "up"}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            last = test::read_body_json(resp).await;
        }

        assert_eq!(last["upvotes"], 3);
        assert_eq!(last["downvotes"], 0);
        assert_eq!(last["avg_rating"], Value::Null);
        assert_eq!(last["score"], 5.0);
    }

    #[actix_rt::test]
    async fn vote_rejects_bad_direction_and_missing_agent() {
        let app = init_app!(MemoryDirectoryStore::new());
        let missing = uuid::Uuid::new_v4();

        let req = test::TestRequest::post()
            .uri(&format!("/api/agents/{missing}/vote"))
            .set_json(json!({"direction": "sideways"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]["details"]["direction"].is_array());

        let req = test::TestRequest::post()
            .uri(&format!("/api/agents/{missing}/vote"))
            .set_json(json!({"direction": "down"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn unsupported_verbs_return_405() {
        let app = init_app!(MemoryDirectoryStore::new());
        let id = uuid::Uuid::new_v4();

        let cases = [
            test::TestRequest::delete().uri("/api/agents").to_request(),
            test::TestRequest::put().uri(&format!("/api/agents/{id}")).to_request(),
            test::TestRequest::get().uri(&format!("/api/agents/{id}/vote")).to_request(),
            test::TestRequest::delete()
                .uri(&format!("/api/agents/{id}/reviews"))
                .to_request(),
            test::TestRequest::put().uri(&format!("/api/agents/{id}/save")).to_request(),
        ];

        for req in cases {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
        }
    }
}
