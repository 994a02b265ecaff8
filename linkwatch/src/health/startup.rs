//! 起動時スキャン
//!
//! ストア初期化の完了後に全リンクを1パスだけチェックする

use crate::health::scanner::LinkScanner;
use tracing::info;

/// 起動直後の初回スキャンを実行する
pub async fn run_startup_scan(scanner: &LinkScanner) {
    info!("Running startup link scan...");
    scanner.run_pass().await;
    info!("Startup link scan completed");
}
