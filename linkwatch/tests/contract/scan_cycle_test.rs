//! Contract Test: スキャンサイクル
//!
//! プローブから分類、永続化、一覧APIまでを通しで検証する

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::Router;
use linkwatch::db::links as db;
use linkwatch::health::{LinkScanner, ScanOutcome};
use linkwatch::probe::LinkProber;
use linkwatch::store::LinkStore;
use linkwatch::types::link::MonitoredLink;
use linkwatch::{api, AppState};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn build_store() -> LinkStore {
    let db_pool = sqlx::SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations");
    LinkStore::new(db_pool)
}

async fn insert(store: &LinkStore, url: &str, title: &str, category: &str) {
    let link = MonitoredLink::new(url.to_string(), title.to_string(), category.to_string());
    db::insert_link(store.pool(), &link)
        .await
        .expect("insert link");
}

async fn list_links(app: Router) -> Vec<Value> {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/links")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    json.as_array().unwrap().clone()
}

/// 1パスで各リンクの判定が永続化され、一覧APIから観測できる
#[tokio::test]
async fn test_full_scan_cycle() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/healthy"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>the document</html>"),
        )
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/rotten"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>Error 404</html>"),
        )
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock)
        .await;

    let store = build_store().await;
    insert(&store, &format!("{}/healthy", mock.uri()), "Healthy", "A").await;
    insert(&store, &format!("{}/rotten", mock.uri()), "Rotten", "B").await;
    insert(&store, &format!("{}/missing", mock.uri()), "Missing", "C").await;

    let scanner = LinkScanner::new(store.clone(), LinkProber::new());
    let report = scanner.run_pass().await;
    assert_eq!(report.checked, 3);
    assert_eq!(report.updated, 3);

    let app = api::create_router(AppState {
        store: store.clone(),
    });
    let links = list_links(app).await;

    assert_eq!(links[0]["title"], "Healthy");
    assert_eq!(links[0]["status"], "OK (Code: 200)");
    assert_eq!(links[0]["linkRotWarning"], false);

    assert_eq!(links[1]["title"], "Rotten");
    assert_eq!(links[1]["status"], "Soft 404 (Code: 200)");
    assert_eq!(links[1]["linkRotWarning"], true);

    assert_eq!(links[2]["title"], "Missing");
    assert_eq!(links[2]["status"], "Failed (Code: 404)");
    assert_eq!(links[2]["linkRotWarning"], true);

    for link in &links {
        assert!(link["lastChecked"].is_string());
    }
}

/// パス実行中に重ねて発火したトリガーは追加の書き込みを生まない
#[tokio::test]
async fn test_overlapping_trigger_writes_nothing() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&mock)
        .await;

    let store = build_store().await;
    insert(&store, &format!("{}/slow", mock.uri()), "Slow", "A").await;

    let scanner = LinkScanner::new(store.clone(), LinkProber::new());

    let first = {
        let scanner = scanner.clone();
        tokio::spawn(async move { scanner.try_run_pass().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // 実行中のパスに重ねたトリガーは破棄される
    assert_eq!(scanner.try_run_pass().await, ScanOutcome::Skipped);

    let outcome = first.await.unwrap();
    let ScanOutcome::Completed(report) = outcome else {
        panic!("first pass should run");
    };

    // 書き込みは最初のパスの1件だけ
    assert_eq!(report.checked, 1);
    assert_eq!(report.updated, 1);

    let link = store
        .find_by_url(&format!("{}/slow", mock.uri()))
        .await
        .unwrap()
        .unwrap();
    let first_checked = link.last_checked.expect("checked");

    // 破棄されたトリガーがあとから書き込んでいないことを確認する
    tokio::time::sleep(Duration::from_millis(100)).await;
    let link_after = store
        .find_by_url(&format!("{}/slow", mock.uri()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link_after.last_checked, Some(first_checked));
}
