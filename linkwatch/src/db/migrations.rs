//! データベースマイグレーション

use crate::common::error::LwError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite接続プールを作成してマイグレーションを実行する
///
/// DBファイルと親ディレクトリが存在しない場合は作成する。
/// 失敗は呼び出し側で致命的エラーとして扱う（リトライしない）。
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, LwError> {
    ensure_parent_dir(database_url)?;

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| LwError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(connect_options)
        .await
        .map_err(|e| LwError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), LwError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| LwError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// SQLiteファイルの親ディレクトリを作成する
///
/// `sqlite::memory:` のような特殊指定はスキップする
fn ensure_parent_dir(database_url: &str) -> Result<(), LwError> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    if path.starts_with(':') {
        return Ok(());
    }

    // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
    let normalized = path.trim_start_matches("//");
    let without_params = normalized.split('?').next().unwrap_or(normalized);

    if let Some(parent) = std::path::Path::new(without_params).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LwError::Database(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
