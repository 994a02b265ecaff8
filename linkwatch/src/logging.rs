//! ロギング初期化ユーティリティ
//!
//! 標準出力と日次ローテーションのログファイルへ出力する

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// ロギングを初期化する
///
/// `RUST_LOG` でフィルタを上書きできる（既定は `info`）。
/// ログファイルは `LINKWATCH_LOG_DIR`（既定 `logs/`）配下に日次で作成される。
/// 返されるガードはプロセス終了までドロップしないこと。
pub fn init() -> std::io::Result<WorkerGuard> {
    let log_dir = crate::config::env_or("LINKWATCH_LOG_DIR", "logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "linkwatch.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
