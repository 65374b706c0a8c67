//! Mention extraction: decides which listed security an article is about.
//!
//! Tiers run in strict priority order and the first tier with a hit on a
//! target exchange wins:
//! 1. exchange-qualified parenthetical `(HNX: ABC)`
//! 2. labelled mention `mã ABC`
//! 3. security-noun mention `cổ phiếu ABC`
//! 4. bare parenthetical `(ABC)`
//! 5. scored standalone scan (highest score wins, ties to the earliest)
//!
//! Within a pattern tier every match is considered, and the earliest hit on
//! a target exchange is taken. Excluded-exchange hits are skipped, never
//! returned.

pub mod patterns;
pub mod scan;

use std::collections::HashMap;

use crate::directory::TickerDirectory;
use crate::domain::{MentionCandidate, SignalStrength};
use crate::lexicon::RISKY_CODES;
use crate::text::char_offset;

use self::patterns::tiers;
use self::scan::{
    has_context_indicator, position_bonus, read_token, TokenReading, CODE_TOKEN,
    INDICATED_BASE_SCORE, STRONG_BASE_SCORE,
};

/// Codes that collide with common words, and their common-word phrases.
///
/// Phrases are stored upper-cased to match the upper-cased article text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskyCodeTable {
    phrases: HashMap<String, Vec<String>>,
}

impl RiskyCodeTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        RISKY_CODES
            .iter()
            .fold(Self::default(), |table, (code, phrases)| {
                table.with_code(code, phrases.iter().copied())
            })
    }

    /// Register `code` (or extend it) with more common-word phrases.
    pub fn with_code<'a>(mut self, code: &str, phrases: impl IntoIterator<Item = &'a str>) -> Self {
        let entry = self.phrases.entry(code.trim().to_uppercase()).or_default();
        for phrase in phrases {
            let phrase = phrase.trim().to_uppercase();
            if !phrase.is_empty() && !entry.contains(&phrase) {
                entry.push(phrase);
            }
        }
        self
    }

    pub fn phrases_for(&self, code: &str) -> Option<&[String]> {
        self.phrases.get(code).map(Vec::as_slice)
    }

    pub fn is_risky(&self, code: &str) -> bool {
        self.phrases.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Extracts the primary ticker mention from article text.
pub struct MentionExtractor<'d> {
    directory: &'d TickerDirectory,
    risky: RiskyCodeTable,
}

impl<'d> MentionExtractor<'d> {
    pub fn new(directory: &'d TickerDirectory) -> Self {
        Self::with_risky_codes(directory, RiskyCodeTable::builtin())
    }

    pub fn with_risky_codes(directory: &'d TickerDirectory, risky: RiskyCodeTable) -> Self {
        Self { directory, risky }
    }

    pub fn risky_codes(&self) -> &RiskyCodeTable {
        &self.risky
    }

    /// Resolve the security `text` is about, or `None`.
    ///
    /// `text` is the title followed by the body.
    pub fn extract(&self, text: &str) -> Option<MentionCandidate> {
        let upper = text.to_uppercase();
        self.extract_by_pattern(&upper)
            .or_else(|| self.extract_by_scan(&upper))
    }

    /// Every directory code mentioned anywhere in `text`, first appearance first.
    ///
    /// Includes excluded-exchange codes and codes without indicator support;
    /// drops brokerage/index names, codes in market commentary and risky codes
    /// read as common words.
    pub fn detect_codes(&self, text: &str) -> Vec<String> {
        let upper = text.to_uppercase();
        let mut found: Vec<String> = Vec::new();

        for m in CODE_TOKEN.find_iter(&upper) {
            let code = m.as_str();
            if !self.directory.contains(code) || found.iter().any(|c| c == code) {
                continue;
            }
            let reading = read_token(&upper, m.start(), m.end(), self.risky.phrases_for(code));
            if reading.is_mention() {
                found.push(code.to_string());
            }
        }

        found
    }

    fn extract_by_pattern(&self, upper: &str) -> Option<MentionCandidate> {
        for tier in tiers() {
            let best = tier
                .patterns
                .iter()
                .flat_map(|re| re.captures_iter(upper))
                .filter_map(|caps| caps.get(1))
                .filter_map(|m| {
                    let exchange = self.directory.exchange_of(m.as_str())?;
                    exchange.is_target().then_some((m.start(), m.as_str(), exchange))
                })
                .min_by_key(|(start, _, _)| *start);

            if let Some((start, code, exchange)) = best {
                return Some(MentionCandidate {
                    code: code.to_string(),
                    exchange,
                    signal: tier.signal,
                    confidence: tier.confidence,
                    position: char_offset(upper, start),
                });
            }
        }
        None
    }

    fn extract_by_scan(&self, upper: &str) -> Option<MentionCandidate> {
        let text_len = upper.chars().count();
        let mut best: Option<MentionCandidate> = None;

        for m in CODE_TOKEN.find_iter(upper) {
            let code = m.as_str();
            let Some(exchange) = self.directory.exchange_of(code) else {
                continue;
            };

            let base = match read_token(upper, m.start(), m.end(), self.risky.phrases_for(code)) {
                TokenReading::Blacklisted | TokenReading::CommonWord => continue,
                TokenReading::Strong => STRONG_BASE_SCORE,
                TokenReading::Plain if has_context_indicator(upper, m.start()) => {
                    INDICATED_BASE_SCORE
                }
                TokenReading::Plain => continue,
            };
            if exchange.is_excluded() {
                continue;
            }

            let position = char_offset(upper, m.start());
            let score = base + position_bonus(position, text_len);

            // Strictly greater: ties keep the earlier token.
            if best.as_ref().map_or(true, |b| score > b.confidence) {
                best = Some(MentionCandidate {
                    code: code.to_string(),
                    exchange,
                    signal: SignalStrength::Scanned,
                    confidence: score,
                    position,
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exchange, TickerEntry};

    fn directory() -> TickerDirectory {
        TickerDirectory::build(vec![
            TickerEntry::new("SHS", Exchange::Hnx, "Chứng khoán Sài Gòn Hà Nội"),
            TickerEntry::new("PVS", Exchange::Hnx, "Dịch vụ Kỹ thuật Dầu khí"),
            TickerEntry::new("LPB", Exchange::Upcom, "Ngân hàng Lộc Phát"),
            TickerEntry::new("VCB", Exchange::Hose, "Ngân hàng Vietcombank"),
            TickerEntry::new("FPT", Exchange::Hose, "FPT Corporation"),
            TickerEntry::new("THU", Exchange::Hnx, "Công ty THU"),
            TickerEntry::new("TIN", Exchange::Upcom, "Tài chính TIN"),
            TickerEntry::new("CEO", Exchange::Hnx, "Tập đoàn CEO"),
        ])
    }

    #[test]
    fn exchange_qualified_wins_over_everything() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        let m = ex
            .extract("Cổ phiếu PVS tăng; trong khi đó SHS (HNX: SHS) công bố")
            .unwrap();
        assert_eq!(m.code, "SHS");
        assert_eq!(m.exchange, Exchange::Hnx);
        assert_eq!(m.signal, SignalStrength::PatternExchange);
    }

    #[test]
    fn excluded_exchange_pattern_hit_falls_through() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        // VCB is on HOSE: the labelled hit is skipped and the noun tier wins
        let m = ex.extract("Mã VCB giảm, cổ phiếu LPB tăng").unwrap();
        assert_eq!(m.code, "LPB");
        assert_eq!(m.exchange, Exchange::Upcom);
        assert_eq!(m.signal, SignalStrength::PatternLabelled);
    }

    #[test]
    fn labelled_tier_considers_every_match() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        let m = ex.extract("Mã VCB và FPT dẫn dắt. Riêng mã PVS tăng trần").unwrap();
        assert_eq!(m.code, "PVS");
        assert_eq!(m.signal, SignalStrength::PatternLabelled);
    }

    #[test]
    fn bare_parenthetical() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        let m = ex.extract("Ngân hàng Lộc Phát (LPB) công bố kết quả").unwrap();
        assert_eq!(m.code, "LPB");
        assert_eq!(m.signal, SignalStrength::PatternParenthetical);
        assert_eq!(m.position, "Ngân hàng Lộc Phát (".chars().count());
    }

    #[test]
    fn scan_requires_indicator() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        assert!(ex.extract("SHS tăng mạnh trong phiên sáng").is_none());
        let m = ex.extract("Công ty SHS tăng mạnh trong phiên sáng").unwrap();
        assert_eq!(m.code, "SHS");
        assert_eq!(m.signal, SignalStrength::Scanned);
        assert!(m.confidence > INDICATED_BASE_SCORE);
    }

    #[test]
    fn scan_prefers_strong_risky_hit() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        // THU sits inside "thu được" but follows "Tập đoàn": 100 + bonus beats 50 + bonus
        let m = ex.extract("Công ty SHS cùng Tập đoàn THU được vinh danh").unwrap();
        assert_eq!(m.code, "THU");
        assert_eq!(m.signal, SignalStrength::Scanned);
        assert!(m.confidence >= STRONG_BASE_SCORE);
    }

    #[test]
    fn scan_favors_earlier_token() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        let m = ex.extract("Công ty SHS và công ty PVS").unwrap();
        assert_eq!(m.code, "SHS");
    }

    #[test]
    fn risky_code_as_common_word_is_ignored() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        assert!(ex.extract("Doanh thu quý 3 tăng 20%, nhận tin vui").is_none());
    }

    #[test]
    fn excluded_scan_hit_is_never_returned() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        assert!(ex.extract("Ngân hàng VCB báo lãi lớn").is_none());
    }

    #[test]
    fn brokerage_mention_is_not_the_subject() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        assert!(ex.extract("Theo Chứng khoán SHS, thị trường sẽ hồi phục").is_none());
    }

    #[test]
    fn commentary_brokerage_is_not_the_subject() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        assert!(ex.extract("Công ty SHS nhận định thị trường tuần tới").is_none());
        let text = "VN-Index giảm điểm, công ty SHS cho rằng thị trường sẽ hồi phục";
        assert!(ex.extract(text).is_none());
        assert!(ex.detect_codes(text).is_empty());
    }

    #[test]
    fn detect_codes_covers_all_exchanges() {
        let dir = directory();
        let ex = MentionExtractor::new(&dir);
        let codes = ex.detect_codes("VCB, FPT và SHS; doanh thu tăng; VCB lặp lại");
        assert_eq!(codes, ["VCB", "FPT", "SHS"]);
    }

    #[test]
    fn custom_risky_code_is_data_driven() {
        let dir = TickerDirectory::build(vec![TickerEntry::new("SHS", Exchange::Hnx, "")]);
        let table = RiskyCodeTable::default().with_code("shs", ["shs ơi"]);
        let ex = MentionExtractor::with_risky_codes(&dir, table);
        assert!(ex.risky_codes().is_risky("SHS"));
        assert!(ex.detect_codes("SHS ơi").is_empty());
        assert_eq!(ex.detect_codes("trong SHS"), ["SHS"]);
    }

    #[test]
    fn builtin_table_has_colliding_codes() {
        let t = RiskyCodeTable::builtin();
        assert!(t.is_risky("THU"));
        assert!(t.is_risky("NAM"));
        assert_eq!(t.phrases_for("THU").unwrap()[0], "DOANH THU");
        assert!(!t.is_risky("SHS"));
    }
}
