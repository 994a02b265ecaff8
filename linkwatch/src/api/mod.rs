//! REST APIハンドラー
//!
//! リンク照会API

/// エラーレスポンス型
pub mod error;

/// リンク照会
pub mod links;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// APIルーターを作成
///
/// ダッシュボードはオリジンをまたいで読むため、CORSは全許可にしている
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(links::root))
        .route("/api/links", get(links::list_links))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
