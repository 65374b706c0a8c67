//! Standalone token scan: the scored fallback tier.
//!
//! Every isolated 3–4 letter upper-case token that is a directory code is
//! read in context: brokerage prefixes, index names and market commentary
//! are rejected, risky
//! codes sitting inside one of their common-word phrases need a strong
//! indicator, and everything else needs at least one indicator phrase.

use regex::Regex;
use std::sync::LazyLock;

use crate::lexicon::{
    BLACKLIST_CONTEXTS, BLACKLIST_CONTEXT_WINDOW_CHARS, BLACKLIST_PREFIXES,
    COMMON_WORD_WINDOW_CHARS, CONTEXT_INDICATORS, INDICATOR_WINDOW_CHARS, STRONG_INDICATORS,
};
use crate::text::{chars_after, chars_before};

/// Base score for a risky code rescued by a strong indicator.
pub const STRONG_BASE_SCORE: f64 = 100.0;
/// Base score for an ordinary code with indicator support.
pub const INDICATED_BASE_SCORE: f64 = 50.0;
/// Maximum bonus for appearing at the very start of the text.
pub const POSITION_BONUS_MAX: f64 = 10.0;

pub(crate) static CODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3,4}\b").expect("code token pattern must compile"));

static STRONG: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(STRONG_INDICATORS));

static CONTEXT: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(CONTEXT_INDICATORS));

/// Brokerage prefix directly before the token.
static BLACKLIST: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = BLACKLIST_PREFIXES.join("|");
    Regex::new(&format!(r"(?:{alternatives})\s+$")).expect("blacklist pattern must compile")
});

/// Commentary phrase anywhere in the window around the token.
static BLACKLIST_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = BLACKLIST_CONTEXTS.join("|");
    Regex::new(&format!("(?:{alternatives})")).expect("blacklist context pattern must compile")
});

/// Token is the head of a market-index name such as `HNX-INDEX`.
static INDEX_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-?\s*INDEX\b").expect("index pattern must compile"));

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("indicator pattern must compile"))
        .collect()
}

/// How a code token reads in its surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenReading {
    /// Brokerage name or index name; never a mention.
    Blacklisted,
    /// Risky code used as an ordinary word.
    CommonWord,
    /// Risky code inside a common-word phrase, but preceded by a strong indicator.
    Strong,
    /// Any other occurrence.
    Plain,
}

impl TokenReading {
    pub fn is_mention(self) -> bool {
        matches!(self, TokenReading::Strong | TokenReading::Plain)
    }
}

/// Read the token `upper[start..end]`.
///
/// `common_words` holds the upper-cased common-word phrases when the code is risky.
pub(crate) fn read_token(
    upper: &str,
    start: usize,
    end: usize,
    common_words: Option<&[String]>,
) -> TokenReading {
    let before = chars_before(upper, start, INDICATOR_WINDOW_CHARS);

    if BLACKLIST.is_match(before)
        || INDEX_SUFFIX.is_match(chars_after(upper, end, 12))
        || in_commentary(upper, start, end)
    {
        return TokenReading::Blacklisted;
    }

    if let Some(phrases) = common_words {
        if inside_common_word(upper, start, end, phrases) {
            return if STRONG.iter().any(|re| re.is_match(before)) {
                TokenReading::Strong
            } else {
                TokenReading::CommonWord
            };
        }
    }

    TokenReading::Plain
}

/// Whether an indicator phrase precedes the token within the indicator window.
pub(crate) fn has_context_indicator(upper: &str, start: usize) -> bool {
    let before = chars_before(upper, start, INDICATOR_WINDOW_CHARS);
    CONTEXT.iter().any(|re| re.is_match(before))
}

/// Whether a commentary phrase sits within the context window around the token.
fn in_commentary(upper: &str, start: usize, end: usize) -> bool {
    let win_start = start - chars_before(upper, start, BLACKLIST_CONTEXT_WINDOW_CHARS).len();
    let win_end = end + chars_after(upper, end, BLACKLIST_CONTEXT_WINDOW_CHARS).len();
    BLACKLIST_CONTEXT.is_match(&upper[win_start..win_end])
}

/// Whether an occurrence of one of `phrases` near the token covers it.
fn inside_common_word(upper: &str, start: usize, end: usize, phrases: &[String]) -> bool {
    let win_start = start - chars_before(upper, start, COMMON_WORD_WINDOW_CHARS).len();
    let win_end = end + chars_after(upper, end, COMMON_WORD_WINDOW_CHARS).len();
    let window = &upper[win_start..win_end];
    let (tok_start, tok_end) = (start - win_start, end - win_start);

    phrases.iter().any(|phrase| {
        window
            .match_indices(phrase.as_str())
            .any(|(at, p)| at <= tok_start && tok_end <= at + p.len())
    })
}

/// Earlier tokens score higher: `(len - offset) / len * 10`.
pub(crate) fn position_bonus(offset: usize, text_len: usize) -> f64 {
    if text_len == 0 {
        return 0.0;
    }
    (text_len.saturating_sub(offset)) as f64 / text_len as f64 * POSITION_BONUS_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str, code: &str, phrases: Option<&[&str]>) -> TokenReading {
        let upper = text.to_uppercase();
        let start = upper.find(code).unwrap();
        let owned: Option<Vec<String>> =
            phrases.map(|ps| ps.iter().map(|p| p.to_uppercase()).collect());
        read_token(&upper, start, start + code.len(), owned.as_deref())
    }

    #[test]
    fn brokerage_prefix_is_blacklisted() {
        assert_eq!(
            read("Theo Chứng khoán SHS, thị trường", "SHS", None),
            TokenReading::Blacklisted
        );
        assert_eq!(read("CTCK SHS nhận định", "SHS", None), TokenReading::Blacklisted);
    }

    #[test]
    fn index_name_is_blacklisted() {
        assert_eq!(read("chỉ số HNX-Index giảm", "HNX", None), TokenReading::Blacklisted);
        assert_eq!(read("sàn HNX giảm", "HNX", None), TokenReading::Plain);
    }

    #[test]
    fn market_commentary_is_blacklisted() {
        assert_eq!(
            read("Công ty SHS nhận định thị trường tuần tới", "SHS", None),
            TokenReading::Blacklisted
        );
        assert_eq!(
            read("VN-Index giảm điểm, công ty SHS cho rằng", "SHS", None),
            TokenReading::Blacklisted
        );
        assert_eq!(read("VNINDEX tăng, mã SHS", "SHS", None), TokenReading::Blacklisted);
    }

    #[test]
    fn commentary_window_is_bounded() {
        let far = format!("Công ty SHS tăng mạnh {} nhận định", "x".repeat(60));
        assert_eq!(read(&far, "SHS", None), TokenReading::Plain);
        let before = format!("VN-Index giảm {} công ty SHS", "x".repeat(60));
        assert_eq!(read(&before, "SHS", None), TokenReading::Plain);
    }

    #[test]
    fn risky_code_inside_phrase_is_common_word() {
        let phrases: &[&str] = &["doanh thu", "thu nhập"];
        assert_eq!(
            read("Doanh thu quý 3 đạt kỷ lục", "THU", Some(phrases)),
            TokenReading::CommonWord
        );
    }

    #[test]
    fn strong_indicator_rescues_risky_code() {
        let phrases: &[&str] = &["hai năm", "cả hai"];
        assert_eq!(
            read("trong HAI năm qua", "HAI", Some(phrases)),
            TokenReading::CommonWord
        );
        assert_eq!(
            read("Công ty HAI năm nay", "HAI", Some(phrases)),
            TokenReading::Strong
        );
        assert_eq!(
            read("Cổ phiếu HAI năm qua", "HAI", Some(phrases)),
            TokenReading::Strong
        );
    }

    #[test]
    fn risky_code_outside_phrase_reads_plain() {
        let phrases: &[&str] = &["doanh thu"];
        assert_eq!(read("Mã THU tăng", "THU", Some(phrases)), TokenReading::Plain);
    }

    #[test]
    fn indicator_window_is_bounded() {
        let near = "CÔNG TY SHS";
        assert!(has_context_indicator(near, near.find("SHS").unwrap()));
        let far = format!("CÔNG TY {} SHS", "X".repeat(40));
        assert!(!has_context_indicator(&far, far.find("SHS").unwrap()));
    }

    #[test]
    fn position_bonus_decreases() {
        assert_eq!(position_bonus(0, 100), 10.0);
        assert_eq!(position_bonus(50, 100), 5.0);
        assert_eq!(position_bonus(100, 100), 0.0);
        assert_eq!(position_bonus(0, 0), 0.0);
    }
}
