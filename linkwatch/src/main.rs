//! linkwatch Server Entry Point

use clap::Parser;
use linkwatch::config::{self, ScheduleConfig, ServerConfig};
use linkwatch::health::{LinkScanner, ScanScheduler};
use linkwatch::probe::LinkProber;
use linkwatch::store::LinkStore;
use linkwatch::{api, db, logging, seed, AppState};
use tracing::info;

/// 外部ドキュメントリンクの死活監視サーバー
#[derive(Parser, Debug)]
#[command(name = "linkwatch", version, about)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    let _log_guard = logging::init().expect("failed to initialize logging");

    info!("linkwatch v{}", env!("CARGO_PKG_VERSION"));

    // データベース接続は他の全コンポーネントに先行する。
    // 失敗は致命的で、リトライせずに終了する
    let database_url = config::database_url();
    let db_pool = db::migrations::initialize_database(&database_url)
        .await
        .expect("Failed to initialize database");

    info!("Database connected successfully");

    let store = LinkStore::new(db_pool);

    // ストアが空の場合のみシードを投入する
    store
        .seed_if_empty(&seed::initial_links())
        .await
        .expect("Failed to seed link store");

    // 起動時スキャンと毎時スキャンをバックグラウンドで開始する
    let scanner = LinkScanner::new(store.clone(), LinkProber::new());
    let scheduler = ScanScheduler::new(scanner, ScheduleConfig::from_env());
    scheduler.start();

    let state = AppState { store };
    let app = api::create_router(state);

    let server_config = ServerConfig::from_env();
    let bind_addr = server_config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("linkwatch server listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
