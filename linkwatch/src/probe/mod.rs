//! HTTPプローブクライアント
//!
//! 監視対象URLへ1回のGETを発行し、分類器へ渡す結果を生成する

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;

/// プローブ全体のタイムアウト（秒）
const PROBE_TIMEOUT_SECS: u64 = 10;

/// リダイレクト追従の上限ホップ数
const MAX_REDIRECT_HOPS: usize = 5;

/// ブラウザ相当のUser-Agent
///
/// 非ブラウザUAを拒否するドキュメントホストもそのままプローブする
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// ブラウザ相当のAcceptヘッダー
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
     image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// プローブ結果
///
/// HTTPステータスコードはエラー扱いしない。[200,500)の応答は本文検査の
/// 対象となる `Responded`、500以上は `ServerError` として返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 応答あり（ステータスコードは[200,500)）
    Responded {
        /// HTTPステータスコード
        code: u16,
        /// テキスト本文（バイナリ応答ではNone）
        body: Option<String>,
    },
    /// サーバーエラー応答（500以上）
    ServerError {
        /// HTTPステータスコード
        code: u16,
    },
    /// タイムアウト
    TimedOut,
    /// 応答に至らない失敗（DNS、TLS、接続断など）
    NetworkError {
        /// 失敗原因
        message: String,
    },
}

/// リンクプローブクライアント
#[derive(Clone)]
pub struct LinkProber {
    client: reqwest::Client,
}

impl LinkProber {
    /// 既定のタイムアウト（10秒）でプローバーを作成
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
    }

    /// タイムアウトを指定して作成（テスト用）
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// URLへ1回のGETを発行して結果を返す
    ///
    /// 失敗はすべて `ProbeOutcome` の値に変換され、この関数はErrを返さない
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return ProbeOutcome::TimedOut,
            Err(e) => {
                return ProbeOutcome::NetworkError {
                    message: e.to_string(),
                }
            }
        };

        let code = response.status().as_u16();
        if code >= 500 {
            return ProbeOutcome::ServerError { code };
        }

        let body = if is_textual(&response) {
            // タイムアウトは本文の読み取り中にも発生し得る
            match response.text().await {
                Ok(text) => Some(text),
                Err(e) if e.is_timeout() => return ProbeOutcome::TimedOut,
                Err(_) => None,
            }
        } else {
            None
        };

        ProbeOutcome::Responded { code, body }
    }
}

impl Default for LinkProber {
    fn default() -> Self {
        Self::new()
    }
}

/// Content-Typeからテキスト応答かどうか判定する
///
/// バイナリ（PDF等）は本文検査の対象外
fn is_textual(response: &reqwest::Response) -> bool {
    let Some(content_type) = response.headers().get(CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("text/")
        || matches!(
            mime.as_str(),
            "application/json" | "application/xml" | "application/xhtml+xml"
        )
}
