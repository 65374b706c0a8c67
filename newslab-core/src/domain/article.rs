//! Article and reference-table row types.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::exchange::Exchange;

/// One row of the reference table: a listed code, its exchange and issuer name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    /// Upper-case code, 3–4 letters.
    pub code: String,
    pub exchange: Exchange,
    /// May be empty when the reference table has no name column.
    pub company_name: String,
}

impl TickerEntry {
    pub fn new(code: impl Into<String>, exchange: Exchange, company_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            exchange,
            company_name: company_name.into(),
        }
    }
}

/// A fetched news article, as handed over by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// May be empty; the pipeline then works on the title alone.
    pub body: String,
    pub published_at: DateTime<FixedOffset>,
    pub source_url: String,
}

impl Article {
    /// Text the extractor and risk detector see: title, then body.
    pub fn full_text(&self) -> String {
        if self.body.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.body)
        }
    }

    /// Stable identifier: BLAKE3 of the source URL, or of the title when
    /// the URL is unknown.
    pub fn id(&self) -> String {
        let key = if self.source_url.trim().is_empty() {
            &self.title
        } else {
            &self.source_url
        };
        blake3::hash(key.trim().as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str, body: &str) -> Article {
        Article {
            title: "Tiêu đề".into(),
            body: body.into(),
            published_at: DateTime::parse_from_rfc3339("2025-10-21T14:30:00+07:00").unwrap(),
            source_url: url.into(),
        }
    }

    #[test]
    fn full_text_without_body_is_title() {
        assert_eq!(article("", "  ").full_text(), "Tiêu đề");
        assert_eq!(article("", "nội dung").full_text(), "Tiêu đề nội dung");
    }

    #[test]
    fn id_prefers_url() {
        let a = article("https://example.vn/a.chn", "");
        let b = article("https://example.vn/a.chn", "khác");
        let c = article("", "");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(c.id(), blake3::hash("Tiêu đề".as_bytes()).to_hex().to_string());
    }
}
