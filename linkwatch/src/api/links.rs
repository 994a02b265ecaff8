//! リンク照会API

use crate::api::error::AppError;
use crate::types::link::MonitoredLink;
use crate::AppState;
use axum::extract::State;
use axum::Json;

/// GET /api/links
///
/// 全リンクをカテゴリ、タイトルの昇順で返す。レコードは永続化された
/// 形のまま返し、スキャン実行中は更新済みと未更新の行が混在し得る
pub async fn list_links(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonitoredLink>>, AppError> {
    let links = state.store.list().await?;
    Ok(Json(links))
}

/// GET /
///
/// 稼働確認用
pub async fn root() -> &'static str {
    "linkwatch backend is running"
}
