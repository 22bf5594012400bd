use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use trust_firewall_server::server::{build_router, AppState};
use trust_firewall_server::ServerConfig;

/// End-to-end tests that drive the HTTP surface in-process.
#[cfg(test)]
mod e2e_tests {
    use super::*;

    fn test_router() -> Router {
        let config = ServerConfig::default();
        build_router(AppState::new(&config), None)
    }

    async fn send_evaluate(router: Router, payload: Value) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/evaluate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = router.oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok((status, body))
    }

    #[tokio::test]
    async fn test_health_check() -> Result<()> {
        let request = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())?;

        let response = test_router().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await?.to_bytes();
        let body: Value = serde_json::from_slice(&bytes)?;

        assert_eq!(body["status"], "Trust Firewall Operational");
        assert_eq!(body["default_mode"], "balanced");
        assert!(body["version"].is_string());
        assert!(body["timestamp"].is_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_evaluate_clean_grounded_text_passes() -> Result<()> {
        let payload = json!({
            "text": "The sky is blue.",
            "context": "The sky is blue.",
            "mode": "balanced",
        });

        let (status, body) = send_evaluate(test_router(), payload).await?;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["trust_analysis"]["trust_score"], 100);
        assert_eq!(body["trust_analysis"]["risk_category"], "Strong");
        assert_eq!(body["firewall_decision"]["action"], "PASS");
        assert_eq!(body["firewall_decision"]["final_output"], "The sky is blue.");

        Ok(())
    }

    #[tokio::test]
    async fn test_evaluate_risky_text_in_strict_mode() -> Result<()> {
        let payload = json!({
            "text": "I think maybe it is probably false.",
            "mode": "strict",
        });

        let (status, body) = send_evaluate(test_router(), payload).await?;
        assert_eq!(status, StatusCode::OK);

        // Three uncertainty markers push the score below strict thresholds
        let action = body["firewall_decision"]["action"].as_str().unwrap();
        assert!(action == "SOFTEN" || action == "BLOCK");
        assert_ne!(
            body["firewall_decision"]["final_output"],
            body["firewall_decision"]["original_text"]
        );
        assert!(body["firewall_decision"]["warning_message"].is_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_evaluate_heavily_hedged_text_is_blocked() -> Result<()> {
        let payload = json!({
            "text": "I think maybe this could be probably true, allegedly.",
        });

        let (status, body) = send_evaluate(test_router(), payload).await?;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(body["trust_analysis"]["trust_score"], 0);
        assert_eq!(body["trust_analysis"]["risk_category"], "Unsafe");
        assert_eq!(body["firewall_decision"]["action"], "BLOCK");
        assert!(body["firewall_decision"]["final_output"]
            .as_str()
            .unwrap()
            .contains("BLOCKED"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_mode_falls_back_to_default() -> Result<()> {
        let payload = json!({
            "text": "The sky is blue.",
            "mode": "turbo",
        });

        let (status, body) = send_evaluate(test_router(), payload).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["firewall_decision"]["firewall_mode"], "balanced");

        Ok(())
    }

    #[tokio::test]
    async fn test_omitted_mode_uses_configured_default() -> Result<()> {
        let mut config = ServerConfig::default();
        config.firewall.default_mode = "permissive".parse().unwrap();
        let router = build_router(AppState::new(&config), None);

        let (status, body) = send_evaluate(router, json!({ "text": "The sky is blue." })).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["firewall_decision"]["firewall_mode"], "permissive");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() -> Result<()> {
        let (status, _body) = send_evaluate(test_router(), json!({ "mode": "strict" })).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() -> Result<()> {
        let mut config = ServerConfig::default();
        config.limits.max_text_length = 16;
        let router = build_router(AppState::new(&config), None);

        let payload = json!({
            "text": "this text is comfortably longer than sixteen bytes",
        });

        let (status, body) = send_evaluate(router, payload).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("text"));

        Ok(())
    }

    #[tokio::test]
    async fn test_evaluate_response_carries_both_halves() -> Result<()> {
        let payload = json!({
            "text": "This is a verified fact. [1]",
        });

        let (status, body) = send_evaluate(test_router(), payload).await?;
        assert_eq!(status, StatusCode::OK);

        assert!(body.get("trust_analysis").is_some());
        assert!(body.get("firewall_decision").is_some());
        assert!(body["trust_analysis"]["details"]["citations"]["has_citations"]
            .as_bool()
            .unwrap());
        assert_eq!(
            body["trust_analysis"]["breakdown"]["base_score"],
            100
        );

        Ok(())
    }
}
