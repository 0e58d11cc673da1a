mod common;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortlinks::api::routes::protected_routes;
use shortlinks::infrastructure::persistence::MemoryStore;

/// Builds a test server exposing the authenticated API under `/api`.
fn make_server(state: shortlinks::AppState) -> TestServer {
    let app = Router::new().nest("/api", protected_routes()).with_state(state);
    TestServer::new(app).unwrap()
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({
            "originalUrl": "https://github.com/example/repo",
            "slug": "github",
            "description": "GitHub repository",
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["originalUrl"], "https://github.com/example/repo");
    assert_eq!(created["slug"], "github");
    assert_eq!(created["accessCount"], 0);
    assert_eq!(
        created["shortUrl"],
        format!("{}/alice/github", common::TEST_ORIGIN)
    );

    let response = server
        .get("/api/urls/github")
        .add_header("Authorization", common::bearer("alice"))
        .await;

    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched["originalUrl"], "https://github.com/example/repo");
    assert_eq!(fetched["slug"], "github");
    assert_eq!(fetched["accessCount"], 0);
    assert_eq!(fetched["description"], "GitHub repository");
    // Owner id never leaves the server.
    assert!(fetched.get("ownerId").is_none());
}

#[tokio::test]
async fn test_create_duplicate_slug_conflicts() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let body = json!({"originalUrl": "https://example.com", "slug": "mine"});

    server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&body)
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["error"], "SLUG_EXISTS");
}

#[tokio::test]
async fn test_same_slug_under_different_owners_succeeds() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let body = json!({"originalUrl": "https://example.com", "slug": "shared"});

    server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    // Slugs are owner-scoped, not globally unique.
    server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("bob"))
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_rejects_invalid_slug() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"originalUrl": "https://example.com", "slug": "my link"}))
        .await;

    response.assert_status_bad_request();
    let error: Value = response.json();
    assert_eq!(error["error"], "INVALID_SLUG");

    // Hyphens and underscores are fine.
    server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"originalUrl": "https://example.com", "slug": "my-link_2"}))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let response = server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"originalUrl": "not a url", "slug": "ok-slug"}))
        .await;

    response.assert_status_bad_request();
    let error: Value = response.json();
    assert_eq!(error["error"], "INVALID_URL");
}

// ─── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_bearer_fails_before_touching_store() {
    let memory = Arc::new(MemoryStore::new());
    let counting = Arc::new(common::CountingStore::new(memory));
    let (state, _rx) = common::create_test_state(counting.clone());
    let server = make_server(state);

    for response in [
        server.get("/api/urls").await,
        server
            .post("/api/urls")
            .json(&json!({"originalUrl": "https://example.com", "slug": "x"}))
            .await,
        server.get("/api/urls/x").await,
        server.put("/api/urls/x").json(&json!({})).await,
        server.delete("/api/urls/x").await,
    ] {
        response.assert_status_unauthorized();
        let error: Value = response.json();
        assert_eq!(error["error"], "AUTHENTICATION_FAILED");
    }

    assert_eq!(counting.calls(), 0);
}

#[tokio::test]
async fn test_rejected_token_fails() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let response = server
        .get("/api/urls")
        .add_header("Authorization", "Bearer not-a-valid-token")
        .await;

    response.assert_status_unauthorized();
}

// ─── Get / Delete ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_unknown_slug_not_found() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let response = server
        .get("/api/urls/missing")
        .add_header("Authorization", common::bearer("alice"))
        .await;

    response.assert_status_not_found();
    let error: Value = response.json();
    assert_eq!(error["error"], "URL_NOT_FOUND");
}

#[tokio::test]
async fn test_get_cannot_see_other_owners_record() {
    let (state, store, _rx) = common::create_memory_state();
    common::seed_record(store.as_ref(), "bob", "docs", "https://example.com").await;

    let server = make_server(state);

    // Key scoping hides bob's record entirely; alice sees 404, not 403.
    server
        .get("/api/urls/docs")
        .add_header("Authorization", common::bearer("alice"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_then_get_not_found() {
    let (state, store, _rx) = common::create_memory_state();
    common::seed_record(store.as_ref(), "alice", "gone", "https://example.com").await;

    let server = make_server(state);

    server
        .delete("/api/urls/gone")
        .add_header("Authorization", common::bearer("alice"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .get("/api/urls/gone")
        .add_header("Authorization", common::bearer("alice"))
        .await
        .assert_status_not_found();

    // Second delete is 404 too.
    server
        .delete("/api/urls/gone")
        .add_header("Authorization", common::bearer("alice"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_only_touches_own_namespace() {
    let (state, store, _rx) = common::create_memory_state();
    common::seed_record(store.as_ref(), "bob", "keep", "https://example.com").await;

    let server = make_server(state);

    server
        .delete("/api/urls/keep")
        .add_header("Authorization", common::bearer("alice"))
        .await
        .assert_status_not_found();

    assert!(common::read_record(store.as_ref(), "bob", "keep").await.is_some());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_merges_fields_and_preserves_identity() {
    let (state, store, _rx) = common::create_memory_state();
    let server = make_server(state);

    server
        .post("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({
            "originalUrl": "https://old.example.com",
            "slug": "upd",
            "description": "old text",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let before = common::read_record(store.as_ref(), "alice", "upd").await.unwrap();

    // Change only the URL; description must survive.
    let response = server
        .put("/api/urls/upd")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"originalUrl": "https://new.example.com"}))
        .await;

    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["originalUrl"], "https://new.example.com");
    assert_eq!(updated["description"], "old text");
    assert_eq!(updated["slug"], "upd");

    let after = common::read_record(store.as_ref(), "alice", "upd").await.unwrap();
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.owner_id, "alice");

    // Explicit null clears the description.
    let response = server
        .put("/api/urls/upd")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"description": null}))
        .await;

    response.assert_status_ok();
    let cleared: Value = response.json();
    assert!(cleared.get("description").is_none());
    assert_eq!(cleared["originalUrl"], "https://new.example.com");
}

#[tokio::test]
async fn test_update_revalidates_url() {
    let (state, store, _rx) = common::create_memory_state();
    common::seed_record(store.as_ref(), "alice", "upd", "https://example.com").await;

    let server = make_server(state);

    let response = server
        .put("/api/urls/upd")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"originalUrl": "not a url"}))
        .await;

    response.assert_status_bad_request();
    let error: Value = response.json();
    assert_eq!(error["error"], "INVALID_URL");

    // Destination unchanged after the rejected update.
    let record = common::read_record(store.as_ref(), "alice", "upd").await.unwrap();
    assert_eq!(record.original_url, "https://example.com");
}

#[tokio::test]
async fn test_update_unknown_slug_not_found() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    server
        .put("/api/urls/missing")
        .add_header("Authorization", common::bearer("alice"))
        .json(&json!({"originalUrl": "https://example.com"}))
        .await
        .assert_status_not_found();
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_orders_newest_first() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    for slug in ["a", "b", "c"] {
        server
            .post("/api/urls")
            .add_header("Authorization", common::bearer("alice"))
            .json(&json!({
                "originalUrl": format!("https://example.com/{slug}"),
                "slug": slug,
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let response = server
        .get("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 3);

    let slugs: Vec<&str> = body["urls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn test_list_is_scoped_to_the_caller() {
    let (state, store, _rx) = common::create_memory_state();
    common::seed_record(store.as_ref(), "alice", "mine", "https://example.com/a").await;
    common::seed_record(store.as_ref(), "bob", "theirs", "https://example.com/b").await;

    let server = make_server(state);

    let response = server
        .get("/api/urls")
        .add_header("Authorization", common::bearer("alice"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["urls"][0]["slug"], "mine");
}

#[tokio::test]
async fn test_list_empty_for_new_owner() {
    let (state, _store, _rx) = common::create_memory_state();
    let server = make_server(state);

    let response = server
        .get("/api/urls")
        .add_header("Authorization", common::bearer("nobody"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 0);
    assert_eq!(body["urls"].as_array().unwrap().len(), 0);
}
