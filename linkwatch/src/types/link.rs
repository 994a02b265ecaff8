//! リンク型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ネットワークエラーをステータス文字列に載せる際の最大文字数
const NETWORK_ERROR_MESSAGE_LIMIT: usize = 50;

/// リンクのヘルス判定
///
/// 内部表現はタグ付きの列挙型で、永続化とAPI境界でのみ従来互換の
/// プレフィックス付き文字列（`OK (Code: 200)` 等）に変換する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkHealth {
    /// 未チェック（シード直後の初期状態）
    #[default]
    Pending,
    /// 到達可能（2xx/3xx、本文にエラー兆候なし）
    Ok(u16),
    /// ソフト404（成功コードだが本文が「not found」ページ）
    SoftNotFound(u16),
    /// 失敗応答（4xx/5xx）
    Failed(u16),
    /// タイムアウト
    Timeout,
    /// 応答に至らない失敗（DNS、TLS、接続断など）
    NetworkError(String),
    /// 分類不能
    Unknown,
}

impl LinkHealth {
    /// リンク切れ警告に該当するか
    ///
    /// 警告フラグは常にこの規則から導出し、独立に設定しない
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::Pending | Self::Ok(_))
    }

    /// 永続化・API境界用のステータス文字列に変換
    ///
    /// ネットワークエラーのメッセージは先頭50文字（文字単位）で打ち切り、
    /// 末尾に `...` を付ける
    pub fn as_status_string(&self) -> String {
        match self {
            Self::Pending => "Pending Check".to_string(),
            Self::Ok(code) => format!("OK (Code: {})", code),
            Self::SoftNotFound(code) => format!("Soft 404 (Code: {})", code),
            Self::Failed(code) => format!("Failed (Code: {})", code),
            Self::Timeout => "Timeout Error".to_string(),
            Self::NetworkError(message) => {
                let truncated: String =
                    message.chars().take(NETWORK_ERROR_MESSAGE_LIMIT).collect();
                format!("Network Error: {}...", truncated)
            }
            Self::Unknown => "Unknown Error".to_string(),
        }
    }

    /// ステータス文字列から復元する
    ///
    /// 解釈できない文字列は `Unknown` に落とす
    pub fn from_status_string(s: &str) -> Self {
        if s == "Pending Check" {
            Self::Pending
        } else if s == "Timeout Error" {
            Self::Timeout
        } else if let Some(message) = s.strip_prefix("Network Error: ") {
            let message = message.strip_suffix("...").unwrap_or(message);
            Self::NetworkError(message.to_string())
        } else if let Some(code) = parse_coded(s, "OK") {
            Self::Ok(code)
        } else if let Some(code) = parse_coded(s, "Soft 404") {
            Self::SoftNotFound(code)
        } else if let Some(code) = parse_coded(s, "Failed") {
            Self::Failed(code)
        } else {
            Self::Unknown
        }
    }
}

/// `<prefix> (Code: NNN)` 形式からコードを取り出す
fn parse_coded(s: &str, prefix: &str) -> Option<u16> {
    s.strip_prefix(prefix)?
        .strip_prefix(" (Code: ")?
        .strip_suffix(')')?
        .parse()
        .ok()
}

impl FromStr for LinkHealth {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_status_string(s))
    }
}

impl std::fmt::Display for LinkHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_status_string())
    }
}

impl Serialize for LinkHealth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_status_string())
    }
}

impl<'de> Deserialize<'de> for LinkHealth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_status_string(&s))
    }
}

/// 監視対象リンク
///
/// URLがグローバル一意キー。title / categoryは登録後に変更されない。
/// ヘルス3フィールドはスキャナーだけが更新する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredLink {
    /// URL（一意キー）
    pub url: String,
    /// 表示タイトル
    pub title: String,
    /// カテゴリ
    pub category: String,
    /// 最新のヘルス判定
    pub status: LinkHealth,
    /// 最終チェック時刻（未チェックならNone）
    pub last_checked: Option<DateTime<Utc>>,
    /// リンク切れ警告フラグ（statusから導出した非正規化値）
    pub link_rot_warning: bool,
}

impl MonitoredLink {
    /// 未チェック状態の新しいリンクを作成
    pub fn new(url: String, title: String, category: String) -> Self {
        Self {
            url,
            title,
            category,
            status: LinkHealth::Pending,
            last_checked: None,
            link_rot_warning: false,
        }
    }

    /// ヘルス判定を反映する
    ///
    /// 警告フラグはstatusから導出され、3フィールドは同時に変わる
    pub fn apply_health(&mut self, health: LinkHealth, checked_at: DateTime<Utc>) {
        self.link_rot_warning = health.is_warning();
        self.status = health;
        self.last_checked = Some(checked_at);
    }
}
