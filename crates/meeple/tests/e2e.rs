// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete chat pipeline.
//!
//! Each test builds an isolated TestHarness (temp SQLite, mock model) and
//! drives it through the real axum router. Tests are independent and
//! order-insensitive.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use meeple_core::StorageAdapter;
use meeple_core::types::{Exchange, NewRecommendation};
use meeple_gateway::error::{FORMAT_MESSAGE, GENERIC_PREFIX, UNAVAILABLE_MESSAGE};
use meeple_gateway::{AppState, build_router};
use meeple_test_utils::{TestHarness, recommendation_reply};
use tower::ServiceExt;

fn router(harness: &TestHarness) -> Router {
    build_router(AppState::new(harness.chat.clone()))
}

async fn post_chat(app: Router, mensaje: &str) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "mensaje": mensaje }).to_string();
    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_page(app: Router) -> String {
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn row_counts(harness: &TestHarness) -> (usize, usize) {
    (
        harness.storage.list_turns().await.unwrap().len(),
        harness.storage.list_recommendations().await.unwrap().len(),
    )
}

fn rec(name: &str) -> NewRecommendation {
    NewRecommendation {
        name: name.into(),
        description: format!("{name}, descripción"),
        players: "2-4".into(),
        duration: "30 min".into(),
        complexity: "Media".into(),
        min_age: "10+".into(),
    }
}

// ---- Recommendations ----

#[tokio::test]
async fn recommendation_rows_match_reply_and_names_appear_in_output() {
    let names = ["Catan", "Carcassonne", "Azul"];
    let harness = TestHarness::builder()
        .with_mock_responses(vec![recommendation_reply(&names)])
        .build()
        .await
        .unwrap();

    let (status, json) = post_chat(router(&harness), "algo para cuatro").await;
    assert_eq!(status, StatusCode::OK);

    let respuesta = json["respuesta"].as_str().unwrap();
    for name in names {
        assert!(respuesta.contains(name), "missing {name} in {respuesta}");
    }

    let turns = harness.storage.list_turns().await.unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].robot_output, respuesta);
    assert_eq!(harness.storage.list_recommendations().await.unwrap().len(), 3);
}

#[tokio::test]
async fn names_with_ampersands_and_apostrophes_appear_as_given() {
    let names = ["Dungeons & Dragons", "King's Dilemma"];
    let harness = TestHarness::builder()
        .with_mock_responses(vec![recommendation_reply(&names)])
        .build()
        .await
        .unwrap();

    let (status, json) = post_chat(router(&harness), "algo épico").await;
    assert_eq!(status, StatusCode::OK);

    let respuesta = json["respuesta"].as_str().unwrap();
    let turns = harness.storage.list_turns().await.unwrap();
    assert_eq!(turns.len(), 1);
    for name in names {
        assert!(respuesta.contains(name), "missing {name} in {respuesta}");
        assert!(turns[0].robot_output.contains(name), "missing {name} in stored output");
    }

    let stored: Vec<String> = harness
        .storage
        .list_recommendations()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert!(stored.iter().any(|n| n == "Dungeons & Dragons"));
    assert!(stored.iter().any(|n| n == "King's Dilemma"));
}

#[tokio::test]
async fn recommendations_show_up_on_the_page() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![recommendation_reply(&["Patchwork"])])
        .build()
        .await
        .unwrap();

    post_chat(router(&harness), "para dos").await;
    let page = get_page(router(&harness)).await;
    assert!(page.contains("<strong>Patchwork</strong>"));
    assert!(page.contains("para dos"));
}

// ---- Fallback ----

#[tokio::test]
async fn fallback_is_stored_verbatim_without_recommendations() {
    let fallback = "Solo puedo ayudarte con <em>juegos de mesa</em>.";
    let reply = serde_json::json!({"respuesta_corta": fallback, "recomendaciones": []}).to_string();
    let harness = TestHarness::builder()
        .with_mock_responses(vec![reply])
        .build()
        .await
        .unwrap();

    let (status, json) = post_chat(router(&harness), "¿quién ganó el partido?").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["respuesta"], fallback);

    let turns = harness.storage.list_turns().await.unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].robot_output, fallback);
    assert!(harness.storage.list_recommendations().await.unwrap().is_empty());
}

// ---- Reply decoding ----

#[tokio::test]
async fn invalid_json_reply_returns_format_error_and_writes_nothing() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["```json\nno es JSON\n```".to_string()])
        .build()
        .await
        .unwrap();

    let (status, json) = post_chat(router(&harness), "hola").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], FORMAT_MESSAGE);
    assert_eq!(row_counts(&harness).await, (0, 0));
}

#[tokio::test]
async fn fenced_reply_behaves_like_plain_reply() {
    let plain = recommendation_reply(&["Dixit", "Codenames"]);
    let fenced = format!("```json\n{plain}\n```");
    let harness = TestHarness::builder()
        .with_mock_responses(vec![plain, fenced])
        .build()
        .await
        .unwrap();

    let (s1, first) = post_chat(router(&harness), "fiesta").await;
    let (s2, second) = post_chat(router(&harness), "fiesta").await;
    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);
    assert_eq!(first["respuesta"], second["respuesta"]);
    assert_eq!(row_counts(&harness).await, (2, 4));
}

// ---- Failures leave the store untouched ----

#[tokio::test]
async fn unavailable_client_returns_error_and_writes_nothing() {
    let harness = TestHarness::builder().without_provider().build().await.unwrap();

    let (status, json) = post_chat(router(&harness), "hola").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], UNAVAILABLE_MESSAGE);
    assert_eq!(row_counts(&harness).await, (0, 0));
    assert!(harness.mock_provider.prompts().await.is_empty());
}

#[tokio::test]
async fn slow_model_times_out_and_writes_nothing() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![recommendation_reply(&["Azul"])])
        .with_provider_delay(Duration::from_secs(5))
        .with_timeout(Duration::from_millis(50))
        .build()
        .await
        .unwrap();

    let (status, json) = post_chat(router(&harness), "hola").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with(GENERIC_PREFIX), "got: {error}");
    assert!(error.contains("timed out"), "got: {error}");
    assert_eq!(row_counts(&harness).await, (0, 0));
}

#[tokio::test]
async fn model_error_returns_generic_message() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.mock_provider.add_error("quota exceeded").await;

    let (status, json) = post_chat(router(&harness), "hola").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with(GENERIC_PREFIX), "got: {error}");
    assert!(error.contains("quota exceeded"), "got: {error}");
    assert_eq!(row_counts(&harness).await, (0, 0));
}

#[tokio::test]
async fn database_failure_mid_exchange_leaves_no_rows() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec![recommendation_reply(&["Azul", "Splendor"])])
        .build()
        .await
        .unwrap();

    // Recommendations are written first, so this fails after they are in.
    let conn = rusqlite::Connection::open(&harness.config.storage.database_path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_turns BEFORE INSERT ON conversation_turns
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();
    drop(conn);

    let (status, json) = post_chat(router(&harness), "hola").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().starts_with(GENERIC_PREFIX));
    assert_eq!(row_counts(&harness).await, (0, 0));
}

// ---- Page ordering ----

#[tokio::test]
async fn page_orders_by_time_regardless_of_insertion_order() {
    let harness = TestHarness::builder().build().await.unwrap();

    let exchanges = [
        ("turno-b", "2026-05-02T10:00:00.000Z", "Juego-B"),
        ("turno-c", "2026-05-03T10:00:00.000Z", "Juego-C"),
        ("turno-a", "2026-05-01T10:00:00.000Z", "Juego-A"),
    ];
    for (input, timestamp, game) in exchanges {
        harness
            .storage
            .record_exchange(&Exchange {
                user_input: input.into(),
                robot_output: format!("respuesta {input}"),
                recommendations: vec![rec(game)],
                timestamp: timestamp.into(),
            })
            .await
            .unwrap();
    }

    let page = get_page(router(&harness)).await;
    let pos = |needle: &str| {
        page.find(needle)
            .unwrap_or_else(|| panic!("{needle} not on page"))
    };

    // Turns: oldest first.
    assert!(pos("turno-a") < pos("turno-b"));
    assert!(pos("turno-b") < pos("turno-c"));

    // Recommendations: newest first.
    assert!(pos("<strong>Juego-C</strong>") < pos("<strong>Juego-B</strong>"));
    assert!(pos("<strong>Juego-B</strong>") < pos("<strong>Juego-A</strong>"));
}

#[tokio::test]
async fn user_text_is_escaped_on_the_page() {
    let harness = TestHarness::builder().build().await.unwrap();

    let (status, _) = post_chat(router(&harness), "<script>alert(1)</script>").await;
    assert_eq!(status, StatusCode::OK);

    let page = get_page(router(&harness)).await;
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!page.contains("<script>alert(1)</script>"));
}
