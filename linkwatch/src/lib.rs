//! linkwatch Server
//!
//! 外部ドキュメントURLの死活監視サービス。登録されたリンク集合を定期的に
//! プローブし、リンク切れ（ソフト404を含む）を検知して最新の判定を永続化する。

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ヘルス判定（分類器、スキャナー、スケジューラ）
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// HTTPプローブクライアント
pub mod probe;

/// シードデータ
pub mod seed;

/// リンクストア
pub mod store;

/// 型定義
pub mod types;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// リンクストア
    pub store: store::LinkStore,
}
