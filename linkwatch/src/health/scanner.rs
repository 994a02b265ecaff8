//! リンクスキャナー
//!
//! 全リンクを1件ずつ順番にプローブし、結果をストアへ書き戻す

use crate::health::classifier;
use crate::probe::LinkProber;
use crate::store::LinkStore;
use crate::types::link::MonitoredLink;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// 1パスの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanReport {
    /// プローブしたリンク数
    pub checked: usize,
    /// ストアへ書き戻せたリンク数
    pub updated: usize,
    /// 書き戻しに失敗してスキップしたリンク数
    pub write_failures: usize,
}

/// パス実行の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// パスを実行した
    Completed(ScanReport),
    /// 実行中のパスがあったため見送った
    Skipped,
}

/// リンクスキャナー
///
/// 同時に実行できるパスは1つだけ。パス内のプローブは厳密に逐次実行し、
/// 同時に飛ぶリクエストを常に1本に抑えつつログ順序を決定的に保つ。
#[derive(Clone)]
pub struct LinkScanner {
    store: LinkStore,
    prober: LinkProber,
    pass_gate: Arc<Mutex<()>>,
}

impl LinkScanner {
    /// 新しいスキャナーを作成
    pub fn new(store: LinkStore, prober: LinkProber) -> Self {
        Self {
            store,
            prober,
            pass_gate: Arc::new(Mutex::new(())),
        }
    }

    /// 実行中のパスがなければ1パス実行する
    ///
    /// すでにパスが走っている場合は何もせずSkippedを返す。
    /// 重なったトリガーはキューイングせず破棄する
    pub async fn try_run_pass(&self) -> ScanOutcome {
        match self.pass_gate.try_lock() {
            Ok(_guard) => ScanOutcome::Completed(self.run_pass().await),
            Err(_) => {
                info!("Scan pass already running, trigger dropped");
                ScanOutcome::Skipped
            }
        }
    }

    /// 全リンクを対象に1パス実行する
    pub async fn run_pass(&self) -> ScanReport {
        let links = match self.store.list().await {
            Ok(links) => links,
            Err(e) => {
                warn!(error = %e, "Failed to load link set, pass skipped");
                return ScanReport::default();
            }
        };

        info!(link_count = links.len(), "Starting link scan pass");

        let report = self.scan_links(&links).await;

        info!(
            checked = report.checked,
            updated = report.updated,
            write_failures = report.write_failures,
            "Link scan pass complete"
        );

        report
    }

    /// 渡されたリンク集合を順番にスキャンする
    ///
    /// 1件の失敗は残りのリンクへ波及しない。プローブ失敗はステータス値に
    /// 吸収され、ストア書き込み失敗はログに残してそのサイクルではスキップする
    pub async fn scan_links(&self, links: &[MonitoredLink]) -> ScanReport {
        let mut report = ScanReport::default();

        for link in links {
            let outcome = self.prober.probe(&link.url).await;
            let health = classifier::classify(outcome);
            let checked_at = Utc::now();
            report.checked += 1;

            match self.store.save_health(&link.url, &health, checked_at).await {
                Ok(true) => {
                    report.updated += 1;
                    info!(
                        status = %health.as_status_string(),
                        title = %link.title,
                        url = %link.url,
                        "Link checked"
                    );
                }
                Ok(false) => {
                    report.write_failures += 1;
                    warn!(url = %link.url, "Link record missing, update skipped");
                }
                Err(e) => {
                    report.write_failures += 1;
                    warn!(url = %link.url, error = %e, "Failed to save link status, update skipped");
                }
            }
        }

        report
    }
}
