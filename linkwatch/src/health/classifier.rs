//! プローブ結果の分類器
//!
//! プローブ結果からヘルス判定への純粋な写像。
//! ステータスコードだけでは、成功コードのまま本文が「not found」ページに
//! 差し替わったリンク切れ（ソフト404）を見逃すため、成功応答は本文も検査する。

use crate::probe::ProbeOutcome;
use crate::types::link::LinkHealth;

/// 本文中にあればソフト404と判定する部分文字列（大文字小文字を区別）
const SOFT_404_MARKERS: [&str; 2] = ["Error 404", "page not found"];

/// プローブ結果をヘルス判定に変換する
pub fn classify(outcome: ProbeOutcome) -> LinkHealth {
    match outcome {
        ProbeOutcome::Responded { code, body } if (200..400).contains(&code) => {
            if body_indicates_missing(body.as_deref()) {
                LinkHealth::SoftNotFound(code)
            } else {
                LinkHealth::Ok(code)
            }
        }
        ProbeOutcome::Responded { code, .. } if (400..500).contains(&code) => {
            LinkHealth::Failed(code)
        }
        ProbeOutcome::Responded { .. } => LinkHealth::Unknown,
        ProbeOutcome::ServerError { code } => LinkHealth::Failed(code),
        ProbeOutcome::TimedOut => LinkHealth::Timeout,
        ProbeOutcome::NetworkError { message } => LinkHealth::NetworkError(message),
    }
}

/// 成功応答の本文がソフト404かどうか
///
/// バイナリ応答（body=None）は検査対象外
fn body_indicates_missing(body: Option<&str>) -> bool {
    match body {
        Some(text) => SOFT_404_MARKERS.iter().any(|marker| text.contains(marker)),
        None => false,
    }
}
