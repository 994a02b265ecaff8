//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::LwError;
use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub LwError);

impl From<LwError> for AppError {
    fn from(err: LwError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 詳細はサーバーログにのみ残し、クライアントへは安全なメッセージを返す
        tracing::error!(error = %self.0, "API request failed");

        let status = self.0.status_code();
        let payload = json!({ "error": self.0.external_message() });

        (status, Json(payload)).into_response()
    }
}
