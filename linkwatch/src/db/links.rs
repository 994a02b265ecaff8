//! リンクデータベース操作

use crate::types::link::{LinkHealth, MonitoredLink};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// リンクを登録
///
/// URLは一意制約付き。重複はsqlxのエラーとして返る
pub async fn insert_link(pool: &SqlitePool, link: &MonitoredLink) -> Result<(), sqlx::Error> {
    let status = link.status.as_status_string();
    let last_checked = link.last_checked.map(|dt| dt.to_rfc3339());

    sqlx::query(
        r#"
        INSERT INTO links (url, title, category, status, last_checked, link_rot_warning)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&link.url)
    .bind(&link.title)
    .bind(&link.category)
    .bind(&status)
    .bind(&last_checked)
    .bind(link.link_rot_warning)
    .execute(pool)
    .await?;

    Ok(())
}

/// リンク一覧を取得（カテゴリ、タイトルの昇順）
pub async fn list_links(pool: &SqlitePool) -> Result<Vec<MonitoredLink>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LinkRow>(
        r#"
        SELECT url, title, category, status, last_checked, link_rot_warning
        FROM links
        ORDER BY category ASC, title ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// URLでリンクを取得
pub async fn find_link_by_url(
    pool: &SqlitePool,
    url: &str,
) -> Result<Option<MonitoredLink>, sqlx::Error> {
    let row = sqlx::query_as::<_, LinkRow>(
        r#"
        SELECT url, title, category, status, last_checked, link_rot_warning
        FROM links
        WHERE url = ?
        "#,
    )
    .bind(url)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// 登録済みリンク数を取得
pub async fn count_links(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// ヘルス判定を書き戻す
///
/// status、last_checked、link_rot_warningは1つのUPDATE文で同時に更新する。
/// 行が存在しない場合はfalseを返す
pub async fn update_link_health(
    pool: &SqlitePool,
    url: &str,
    health: &LinkHealth,
    checked_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE links SET status = ?, last_checked = ?, link_rot_warning = ?
        WHERE url = ?
        "#,
    )
    .bind(health.as_status_string())
    .bind(checked_at.to_rfc3339())
    .bind(health.is_warning())
    .bind(url)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct LinkRow {
    url: String,
    title: String,
    category: String,
    status: String,
    last_checked: Option<String>,
    link_rot_warning: bool,
}

impl From<LinkRow> for MonitoredLink {
    fn from(row: LinkRow) -> Self {
        MonitoredLink {
            url: row.url,
            title: row.title,
            category: row.category,
            status: LinkHealth::from_status_string(&row.status),
            last_checked: row
                .last_checked
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&chrono::Utc)),
            link_rot_warning: row.link_rot_warning,
        }
    }
}
