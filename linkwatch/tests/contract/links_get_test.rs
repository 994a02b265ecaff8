//! Contract Test: GET /api/links
//!
//! 一覧APIの契約テスト（並び順、永続化された形のままのレスポンス）

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use linkwatch::db::links as db;
use linkwatch::store::LinkStore;
use linkwatch::types::link::{LinkHealth, MonitoredLink};
use linkwatch::{api, AppState};
use serde_json::Value;
use tower::ServiceExt;

async fn build_app() -> (Router, LinkStore) {
    let db_pool = sqlx::SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations");

    let store = LinkStore::new(db_pool);
    let app = api::create_router(AppState {
        store: store.clone(),
    });

    (app, store)
}

async fn insert(store: &LinkStore, url: &str, title: &str, category: &str) {
    let link = MonitoredLink::new(url.to_string(), title.to_string(), category.to_string());
    db::insert_link(store.pool(), &link)
        .await
        .expect("insert link");
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// GET /api/links - 空のストアでは空配列
#[tokio::test]
async fn test_list_links_empty() {
    let (app, _store) = build_app().await;

    let (status, body) = get_json(app, "/api/links").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

/// GET /api/links - カテゴリ、タイトルの昇順で返す
#[tokio::test]
async fn test_list_links_sorted_by_category_then_title() {
    let (app, store) = build_app().await;

    insert(&store, "https://a", "Zeta", "Trademarks").await;
    insert(&store, "https://b", "Beta", "Copyright").await;
    insert(&store, "https://c", "Alpha", "Copyright").await;

    let (status, body) = get_json(app, "/api/links").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Zeta"]);
}

/// GET /api/links - 永続化された形のままのフィールドを返す
#[tokio::test]
async fn test_list_links_wire_shape() {
    let (app, store) = build_app().await;

    insert(&store, "https://example.com/doc", "Doc", "Patents").await;
    let checked_at = Utc::now();
    store
        .save_health(
            "https://example.com/doc",
            &LinkHealth::SoftNotFound(200),
            checked_at,
        )
        .await
        .unwrap();

    let (status, body) = get_json(app, "/api/links").await;

    assert_eq!(status, StatusCode::OK);
    let link = &body.as_array().unwrap()[0];
    assert_eq!(link["url"], "https://example.com/doc");
    assert_eq!(link["title"], "Doc");
    assert_eq!(link["category"], "Patents");
    assert_eq!(link["status"], "Soft 404 (Code: 200)");
    assert_eq!(link["linkRotWarning"], true);
    assert!(link["lastChecked"].is_string());
}

/// GET /api/links - 未チェックのリンクはlastCheckedがnull
#[tokio::test]
async fn test_list_links_unchecked_has_null_last_checked() {
    let (app, store) = build_app().await;

    insert(&store, "https://example.com/doc", "Doc", "Patents").await;

    let (_, body) = get_json(app, "/api/links").await;

    let link = &body.as_array().unwrap()[0];
    assert_eq!(link["status"], "Pending Check");
    assert_eq!(link["lastChecked"], Value::Null);
    assert_eq!(link["linkRotWarning"], false);
}

/// GET /api/links - シード直後は4件のPending Check
#[tokio::test]
async fn test_list_links_after_seeding() {
    let (app, store) = build_app().await;

    store
        .seed_if_empty(&linkwatch::seed::initial_links())
        .await
        .unwrap();

    let (status, body) = get_json(app, "/api/links").await;

    assert_eq!(status, StatusCode::OK);
    let links = body.as_array().unwrap();
    assert_eq!(links.len(), 4);
    for link in links {
        assert_eq!(link["status"], "Pending Check");
    }
}

/// GET / - 稼働確認
#[tokio::test]
async fn test_root_liveness() {
    let (app, _store) = build_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"linkwatch backend is running");
}
