pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback;
use crate::negotiation::handlers as analysis;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analysis",
            post(analysis::handle_create_analysis).get(analysis::handle_list_analyses),
        )
        .route("/api/v1/analysis/improve", post(analysis::handle_improve))
        .route(
            "/api/v1/analysis/:id",
            get(analysis::handle_get_analysis).delete(analysis::handle_delete_analysis),
        )
        // Feedback API
        .route(
            "/api/v1/feedback",
            post(feedback::handle_submit_feedback).get(feedback::handle_list_feedback),
        )
        .route("/api/v1/feedback/stats", get(feedback::handle_feedback_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::llm_client::scripted::ScriptedGateway;

    const PROCUREMENT_REPLY: &str = r#"{
        "score": 72,
        "tone": "Collaborative",
        "sentiment": "Positive",
        "persuasiveStrength": 68,
        "strengths": ["Anchors on volume"],
        "weaknesses": ["No deadline"],
        "suggestions": ["Set a response date"],
        "frameworksUsed": ["Integrative Negotiation"],
        "techniquesIdentified": ["Anchoring"]
    }"#;

    struct Harness {
        app: Router,
        state: AppState,
    }

    impl Harness {
        fn new(gateway: ScriptedGateway) -> Self {
            let state = AppState::for_tests(Arc::new(gateway));
            Self {
                app: build_router(state.clone()),
                state,
            }
        }

        fn token_for(&self, user: Uuid) -> String {
            self.state.credentials.issue(user).unwrap()
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let harness = Harness::new(ScriptedGateway::new());
        let (status, body) = harness.send(Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "negotiate-api");
    }

    #[tokio::test]
    async fn test_analysis_routes_require_credential() {
        let harness = Harness::new(ScriptedGateway::new());
        let (status, body) = harness
            .send(Method::GET, "/api/v1/analysis", None, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) = harness
            .send(Method::GET, "/api/v1/analysis", Some("garbage"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_then_list_analysis() {
        let gateway = ScriptedGateway::new().then_text(PROCUREMENT_REPLY);
        let harness = Harness::new(gateway.clone());
        let token = harness.token_for(Uuid::new_v4());

        let (status, body) = harness
            .send(
                Method::POST,
                "/api/v1/analysis",
                Some(&token),
                Some(json!({
                    "text": "We can commit to 10,000 units if unit price drops 8%.",
                    "industryModelId": "procurement"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["source"], "trusted");
        assert_eq!(body["analysis"]["industryModelId"], "procurement");
        assert_eq!(body["analysis"]["results"]["score"], 72);
        assert_eq!(gateway.call_count(), 1);

        let (status, body) = harness
            .send(Method::GET, "/api/v1/analysis", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_empty_text_is_bad_request() {
        let gateway = ScriptedGateway::new();
        let harness = Harness::new(gateway.clone());
        let token = harness.token_for(Uuid::new_v4());

        let (status, body) = harness
            .send(
                Method::POST,
                "/api/v1/analysis",
                Some(&token),
                Some(json!({ "text": "   " })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_other_users_analysis_is_forbidden() {
        let harness = Harness::new(ScriptedGateway::new().then_text(PROCUREMENT_REPLY));
        let owner = harness.token_for(Uuid::new_v4());
        let stranger = harness.token_for(Uuid::new_v4());

        let (_, body) = harness
            .send(
                Method::POST,
                "/api/v1/analysis",
                Some(&owner),
                Some(json!({ "text": "Let's settle at $40k." })),
            )
            .await;
        let id = body["analysis"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/analysis/{id}");

        let (status, _) = harness.send(Method::GET, &uri, Some(&stranger), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = harness
            .send(Method::DELETE, &uri, Some(&stranger), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = harness.send(Method::DELETE, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = harness.send(Method::GET, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_improve_falls_back_to_canned_when_provider_down() {
        let harness = Harness::new(ScriptedGateway::new());
        let token = harness.token_for(Uuid::new_v4());

        let (status, body) = harness
            .send(
                Method::POST,
                "/api/v1/analysis/improve",
                Some(&token),
                Some(json!({ "text": "Pay me more or I quit." })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"], "canned");
        assert_eq!(body["originalText"], "Pay me more or I quit.");
        assert_eq!(body["comparativeAnalysis"]["originalScore"], 75);
        assert_eq!(body["comparativeAnalysis"]["improvedScore"], 90);
    }

    #[tokio::test]
    async fn test_feedback_submit_and_stats() {
        let harness = Harness::new(ScriptedGateway::new().then_text(PROCUREMENT_REPLY));
        let token = harness.token_for(Uuid::new_v4());

        let (_, body) = harness
            .send(
                Method::POST,
                "/api/v1/analysis",
                Some(&token),
                Some(json!({ "text": "Net-60 terms would let us expand the order." })),
            )
            .await;
        let analysis_id = body["analysis"]["id"].clone();

        let (status, _) = harness
            .send(
                Method::POST,
                "/api/v1/feedback",
                Some(&token),
                Some(json!({
                    "analysisId": analysis_id,
                    "rating": 9,
                    "modelId": "procurement",
                    "suggestionType": "analysis"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for rating in [4, 2] {
            let (status, body) = harness
                .send(
                    Method::POST,
                    "/api/v1/feedback",
                    Some(&token),
                    Some(json!({
                        "analysisId": analysis_id,
                        "rating": rating,
                        "modelId": "procurement",
                        "suggestionType": "analysis"
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body["rating"], rating);
        }

        let (status, body) = harness
            .send(Method::GET, "/api/v1/feedback/stats", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalFeedback"], 2);
        assert_eq!(body["averageRating"], 3.0);
        assert_eq!(body["modelRatings"]["procurement"], 3.0);
    }

    #[tokio::test]
    async fn test_feedback_on_other_users_analysis_is_forbidden() {
        let harness = Harness::new(ScriptedGateway::new().then_text(PROCUREMENT_REPLY));
        let owner = harness.token_for(Uuid::new_v4());
        let stranger = harness.token_for(Uuid::new_v4());

        let (_, body) = harness
            .send(
                Method::POST,
                "/api/v1/analysis",
                Some(&owner),
                Some(json!({ "text": "We need delivery by March to sign." })),
            )
            .await;
        let analysis_id = body["analysis"]["id"].clone();

        let (status, body) = harness
            .send(
                Method::POST,
                "/api/v1/feedback",
                Some(&stranger),
                Some(json!({
                    "analysisId": analysis_id,
                    "rating": 1,
                    "modelId": "procurement",
                    "suggestionType": "analysis"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        for token in [&stranger, &owner] {
            let (_, body) = harness
                .send(Method::GET, "/api/v1/feedback", Some(token), None)
                .await;
            assert_eq!(body["count"], 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_bodies_use_error_envelope() {
        let harness = Harness::new(ScriptedGateway::new());
        let token = harness.token_for(Uuid::new_v4());

        let (status, body) = harness
            .send(
                Method::POST,
                "/api/v1/feedback",
                Some(&token),
                Some(json!({
                    "analysisId": Uuid::new_v4(),
                    "rating": 4.5,
                    "modelId": "general",
                    "suggestionType": "analysis"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/analysis")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"text\": "))
            .unwrap();
        let response = harness.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_feedback_on_missing_analysis_is_not_found() {
        let harness = Harness::new(ScriptedGateway::new());
        let token = harness.token_for(Uuid::new_v4());

        let (status, _) = harness
            .send(
                Method::POST,
                "/api/v1/feedback",
                Some(&token),
                Some(json!({
                    "analysisId": Uuid::new_v4(),
                    "rating": 5,
                    "modelId": "general",
                    "suggestionType": "improvement"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
