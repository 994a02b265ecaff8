//! リンクストア
//!
//! 監視対象リンク集合の永続化境界

use crate::common::error::LwResult;
use crate::db::links as db;
use crate::seed::SeedLink;
use crate::types::link::{LinkHealth, MonitoredLink};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

/// リンクストア
///
/// 監視対象リンクの永続集合を所有する。URLが一意キーで、レコードの作成は
/// シード時のみ、ヘルス3フィールドの更新はスキャナーだけが1件ずつ行う。
#[derive(Clone)]
pub struct LinkStore {
    /// データベース接続プール
    pool: SqlitePool,
}

impl LinkStore {
    /// 接続プールからストアを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// データベースプールへの参照
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 全リンクを取得（カテゴリ、タイトルの昇順）
    pub async fn list(&self) -> LwResult<Vec<MonitoredLink>> {
        Ok(db::list_links(&self.pool).await?)
    }

    /// URLでリンクを検索
    pub async fn find_by_url(&self, url: &str) -> LwResult<Option<MonitoredLink>> {
        Ok(db::find_link_by_url(&self.pool, url).await?)
    }

    /// 登録済みリンク数
    pub async fn count(&self) -> LwResult<i64> {
        Ok(db::count_links(&self.pool).await?)
    }

    /// ストアが空の場合のみシードデータを投入する
    ///
    /// 再起動をまたいでも投入は最大1回。投入した件数を返す
    pub async fn seed_if_empty(&self, seeds: &[SeedLink]) -> LwResult<usize> {
        let count = db::count_links(&self.pool).await?;
        if count > 0 {
            info!(link_count = count, "Store already populated, skipping seed");
            return Ok(0);
        }

        for seed in seeds {
            db::insert_link(&self.pool, &seed.to_link()).await?;
        }

        info!(seeded = seeds.len(), "Store seeded with initial links");
        Ok(seeds.len())
    }

    /// ヘルス判定を1件書き戻す
    ///
    /// 3フィールドは単一のUPDATEで更新される。行が存在しない場合はfalse
    pub async fn save_health(
        &self,
        url: &str,
        health: &LinkHealth,
        checked_at: DateTime<Utc>,
    ) -> LwResult<bool> {
        Ok(db::update_link_health(&self.pool, url, health, checked_at).await?)
    }
}
