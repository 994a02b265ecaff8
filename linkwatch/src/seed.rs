//! シードデータ
//!
//! 初回起動時にストアへ投入する監視対象リンク

use crate::types::link::MonitoredLink;

/// シード用のリンク定義
#[derive(Debug, Clone)]
pub struct SeedLink {
    /// URL
    pub url: &'static str,
    /// 表示タイトル
    pub title: &'static str,
    /// カテゴリ
    pub category: &'static str,
}

impl SeedLink {
    /// 未チェック状態のリンクレコードに変換
    pub fn to_link(&self) -> MonitoredLink {
        MonitoredLink::new(
            self.url.to_string(),
            self.title.to_string(),
            self.category.to_string(),
        )
    }
}

/// 初期シードリンク一覧
pub fn initial_links() -> Vec<SeedLink> {
    vec![
        SeedLink {
            url: "https://ipindia.gov.in/writereaddata/portal/ipoact/1_31_1_patent-act-1970-11march2015.pdf",
            title: "The Patents Act, 1970 (As amended)",
            category: "Patents",
        },
        SeedLink {
            url: "https://ipindia.gov.in/",
            title: "Copyright Act, 1957",
            category: "Copyright",
        },
        SeedLink {
            url: "https://ipindia.gov.in/this-link-is-broken-on-purpose.html",
            title: "Trademarks Act, 1999",
            category: "Trademarks",
        },
        SeedLink {
            url: "https://www.indiacode.nic.in/bitstream/123456789/1981/5/A1999-48.pdf",
            title: "Geographical Indications of Goods (Registration and Protection) Act, 1999",
            category: "GI",
        },
    ]
}
