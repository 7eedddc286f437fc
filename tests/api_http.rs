// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health, /practices, /metrics, /debug/*
// - POST /analyze, /validate, /short-term, /classify, /classify/unsure, /assessment

use std::time::Duration;

use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use wellness_analyzer::knowledge::{KnowledgeBase, KnowledgeHandle};
use wellness_analyzer::{router, AppConfig, AppState};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Same Router the binary uses, minus the artificial delay.
fn test_router() -> Router {
    let config = AppConfig::default()
        .with_analysis_delay(Duration::ZERO)
        .with_debug_routes(true);
    router(AppState::new(KnowledgeHandle::new(KnowledgeBase::builtin()), config))
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");
    let resp = app.oneshot(req).await.expect("oneshot POST");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v = serde_json::from_slice(&bytes).expect("json body");
    (status, v)
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET");
    let resp = app.oneshot(req).await.expect("oneshot GET");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, String::from_utf8(bytes).expect("utf8"))
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let (status, body) = get_text(test_router(), "/health").await;
    assert_eq!(status, StatusCode::OK, "health should be 200");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_analyze_returns_full_response() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "sometimes I feel anxious at work", "duration": "recent" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{v}");

    // Contract checks for UI consumers
    let c = &v["classification"];
    assert_eq!(c["type"], "short-term");
    assert_eq!(c["urgency"], "low");
    assert_eq!(c["primary_concerns"], json!(["anxiety"]));
    assert_eq!(v["primary_concern_labels"], json!(["Anxiety"]));
    assert_eq!(c["professional_help_needed"], false);
    assert_eq!(c["recommendations"].as_array().map(Vec::len), Some(2));

    assert_eq!(v["estimated_time_to_relief"], "15-30 minutes with breathing exercises");
    assert_eq!(v["follow_up_recommended"], true, "low confidence always follows up");
    assert_eq!(v["next_steps"].as_array().map(Vec::len), Some(4));
    assert!(v["cultural_message"].as_str().unwrap().contains("immediate relief"));
    assert!(v.get("generated_at").is_some(), "missing 'generated_at'");
    assert_eq!(v["practices"][0]["id"], "nadi-shodhana");
    assert!(v["practices"][0]["cultural_context"]
        .as_str()
        .unwrap()
        .starts_with("प्राणायाम"));
}

#[tokio::test]
async fn api_analyze_crisis_text() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "I want to die and can't cope anymore", "context": "crisis" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["classification"]["urgency"], "crisis");
    assert_eq!(v["classification"]["professional_help_needed"], true);
    assert_eq!(v["estimated_time_to_relief"], "Immediate professional intervention needed");
    let steps = v["next_steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert!(steps[0].as_str().unwrap().contains("1800-599-0019"));
}

#[tokio::test]
async fn api_analyze_adapts_instructions_for_beginners() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({
            "text": "I am stressed and my shoulders are tight",
            "user_profile": { "name": "A", "age": 30, "experience": "beginner" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let practices = v["practices"].as_array().unwrap();
    assert!(!practices.is_empty());
    assert!(practices.len() <= 4);
    for p in practices {
        assert_eq!(p["difficulty"], "beginner");
        let first = p["adapted_instructions"][0].as_str().unwrap();
        assert!(first.ends_with(" (Take your time, no rush)"), "{first}");
    }
}

#[tokio::test]
async fn api_analyze_rejects_invalid_input_with_400() {
    let cases = [
        (json!({ "text": "  meh  " }), "Please provide more details about how you're feeling"),
        (json!({ "text": "a".repeat(2001) }), "Please keep your message under 2000 characters"),
        (json!({ "text": "Buy now and feel better fast" }), "Please focus on your mental health concerns"),
    ];
    for (payload, reason) in cases {
        let (status, v) = post_json(test_router(), "/analyze", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["error"], "invalid_input");
        assert_eq!(v["reason"], reason);
    }
}

#[tokio::test(start_paused = true)]
async fn api_analyze_holds_answer_for_configured_delay() {
    let delay = Duration::from_millis(1500);
    let config = AppConfig::default().with_analysis_delay(delay);
    let app = router(AppState::new(KnowledgeHandle::new(KnowledgeBase::builtin()), config));

    let start = tokio::time::Instant::now();
    let (status, _) = post_json(
        app.clone(),
        "/analyze",
        json!({ "text": "I have trouble sleeping lately" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(start.elapsed() >= delay, "answered after {:?}", start.elapsed());

    // rejected input answers immediately
    let start = tokio::time::Instant::now();
    let (status, _) = post_json(app, "/analyze", json!({ "text": "tiny" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(start.elapsed() < delay, "rejection waited {:?}", start.elapsed());
}

#[tokio::test]
async fn api_validate_reports_without_failing() {
    let (status, v) = post_json(test_router(), "/validate", json!({ "text": "short" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["is_valid"], false);
    assert!(v["reason"].is_string());

    let (_, ok) = post_json(
        test_router(),
        "/validate",
        json!({ "text": "I have trouble sleeping lately" }),
    )
    .await;
    assert_eq!(ok, json!({ "is_valid": true }));
}

#[tokio::test]
async fn api_short_term_maps_quick_relief_remedies() {
    let (status, v) = post_json(
        test_router(),
        "/short-term",
        json!({ "text": "I feel nervous and have a headache today" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{v}");
    assert_eq!(v["classification"]["type"], "short-term");

    let ids: Vec<&str> = v["remedies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["box-breathing", "child-pose", "grounding-54321"]);
}

#[tokio::test]
async fn api_classify_structured_answers() {
    let (status, v) = post_json(
        test_router(),
        "/classify",
        json!({
            "duration": "recent",
            "impact": "minimal",
            "episodes": "never",
            "severity": "mild",
            "support": "strong"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        v,
        json!({ "issue_type": "short-term", "short_term_score": 5, "long_term_score": 0 })
    );
}

#[tokio::test]
async fn api_classify_unsure_majority() {
    let (status, v) = post_json(
        test_router(),
        "/classify/unsure",
        json!({ "duration": ["yes"], "pattern": ["constant"], "first_time": ["no"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["issue_type"], "long-term");
    assert_eq!(v["long_term_tally"], 3);
}

#[tokio::test]
async fn api_assessment_for_crisis() {
    let (status, v) = post_json(
        test_router(),
        "/assessment",
        json!({
            "primary_concern": "anxiety",
            "duration": "2+years",
            "severity": "crisis",
            "previous_treatment": "never",
            "support_system": "nobody really"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{v}");
    assert_eq!(v["urgency"], "crisis");
    assert_eq!(v["needs_immediate"], true);
    assert_eq!(v["recommended_resources"].as_array().map(Vec::len), Some(8));
    assert_eq!(v["recommended_resources"][0]["kind"], "crisis");
    assert_eq!(v["iks_recommendations"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn api_assessment_rejects_unknown_treatment() {
    let req = Request::builder()
        .method("POST")
        .uri("/assessment")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "primary_concern": "sleep",
                "duration": "1-3months",
                "severity": "mild",
                "previous_treatment": "hypnosis"
            })
            .to_string(),
        ))
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error(), "got {}", resp.status());
}

#[tokio::test]
async fn api_practices_lists_catalog() {
    let (status, body) = get_text(test_router(), "/practices").await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(v["practices"].as_array().map(Vec::len), Some(9));
    assert_eq!(v["remedies"].as_array().map(Vec::len), Some(5));
    assert_eq!(v["resources"].as_array().map(Vec::len), Some(10));
}

#[tokio::test]
async fn api_debug_routes_when_enabled() {
    let (status, body) = get_text(test_router(), "/debug/lexicon").await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(v["total_keywords"], 79);
    assert_eq!(v["categories"].as_array().map(Vec::len), Some(7));

    let (status, body) = get_text(
        test_router(),
        "/debug/analyze_preview?text=always%20tired%20for%20months",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_str(&body).unwrap();
    assert_eq!(v["analysis"]["severity"], "severe");
    assert_eq!(v["urgency"], "high");
    assert_eq!(v["issue_type"], "long-term");
}

#[tokio::test]
async fn api_debug_routes_absent_by_default() {
    let config = AppConfig::default().with_analysis_delay(Duration::ZERO);
    let app = router(AppState::new(KnowledgeHandle::new(KnowledgeBase::builtin()), config));
    let (status, _) = get_text(app, "/debug/lexicon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_metrics_count_analyses() {
    let (status, _) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "constantly exhausted and I can't function" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let _ = post_json(test_router(), "/analyze", json!({ "text": "tiny" })).await;

    let (status, text) = get_text(test_router(), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    for needle in [
        "wellness_analyses_total",
        "urgency=\"high\"",
        "wellness_validation_rejections_total",
        "kind=\"too_short\"",
        "wellness_analysis_duration_ms",
    ] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}
