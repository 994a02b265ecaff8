//! 定時スキャンスケジューラ
//!
//! 起動時に1回、以降は設定タイムゾーンの毎時0分にスキャンを実行する

use crate::config::ScheduleConfig;
use crate::health::scanner::{LinkScanner, ScanOutcome};
use crate::health::startup;
use chrono::{DateTime, Duration, DurationRound, FixedOffset, Utc};
use std::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 定時スキャンスケジューラ
///
/// start/stopで自身のライフサイクルを管理する。発火時に前回のパスが
/// まだ実行中だった場合、そのビートは破棄される（キューイングしない）。
pub struct ScanScheduler {
    scanner: LinkScanner,
    config: ScheduleConfig,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ScanScheduler {
    /// 新しいスケジューラを作成（未起動）
    pub fn new(scanner: LinkScanner, config: ScheduleConfig) -> Self {
        Self {
            scanner,
            config,
            handle: Mutex::new(None),
        }
    }

    /// バックグラウンドタスクを起動する
    ///
    /// 起動時スキャンを1回実行し、以降は毎時0分に発火する。
    /// すでに起動済みの場合は何もしない
    pub fn start(&self) {
        let mut handle = self.handle.lock().expect("scheduler handle lock poisoned");
        if handle.is_some() {
            warn!("Scan scheduler already started");
            return;
        }

        let scanner = self.scanner.clone();
        let offset = self.config.utc_offset();

        *handle = Some(tokio::spawn(async move {
            startup::run_startup_scan(&scanner).await;

            loop {
                let now = Utc::now();
                let next = next_hour_boundary(now, offset);
                let wait = (next - now).to_std().unwrap_or_default();

                info!(next_run = %next.to_rfc3339(), "Next scheduled link scan");
                tokio::time::sleep(wait).await;

                if scanner.try_run_pass().await == ScanOutcome::Skipped {
                    info!("Previous scan still running, beat dropped");
                }
            }
        }));

        info!(
            utc_offset_minutes = self.config.utc_offset_minutes,
            "Scan scheduler started"
        );
    }

    /// バックグラウンドタスクを停止する
    pub fn stop(&self) {
        let mut handle = self.handle.lock().expect("scheduler handle lock poisoned");
        if let Some(task) = handle.take() {
            task.abort();
            info!("Scan scheduler stopped");
        }
    }

    /// スケジューラが起動中かどうか
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .expect("scheduler handle lock poisoned")
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ScanScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// 指定タイムゾーンで次に毎時0分となる時刻（UTC）を返す
///
/// ちょうど毎時0分に呼ばれた場合も、現在時刻ではなく次の正時を返す
pub fn next_hour_boundary(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    let truncated = local.duration_trunc(Duration::hours(1)).unwrap_or(local);
    (truncated + Duration::hours(1)).with_timezone(&Utc)
}
