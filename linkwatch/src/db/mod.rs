//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// 監視対象リンク
pub mod links;

/// データベースマイグレーション
pub mod migrations;
