//! Ticker directory: read-only lookup structures built once per session.
//!
//! Holds code → exchange, code → company name, and an inverted index from
//! company-name tokens to codes for the name fallback. Lookups return
//! "not found" values rather than errors.

use std::collections::HashMap;

use crate::domain::{Exchange, TickerEntry};

/// Name tokens must be longer than this many characters to be indexed.
pub const MIN_NAME_TOKEN_CHARS: usize = 3;

/// Immutable lookup tables over the reference rows.
#[derive(Debug, Clone, Default)]
pub struct TickerDirectory {
    entries: Vec<TickerEntry>,
    by_code: HashMap<String, usize>,
    name_index: HashMap<String, Vec<String>>,
}

impl TickerDirectory {
    /// Build the directory from reference rows.
    ///
    /// Rows are expected deduplicated and upper-cased; if a code repeats,
    /// the first row wins.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = TickerEntry>,
    {
        let mut dir = TickerDirectory::default();

        for entry in rows {
            if dir.by_code.contains_key(&entry.code) {
                continue;
            }
            for token in name_tokens(&entry.company_name) {
                let codes = dir.name_index.entry(token).or_default();
                if !codes.contains(&entry.code) {
                    codes.push(entry.code.clone());
                }
            }
            dir.by_code.insert(entry.code.clone(), dir.entries.len());
            dir.entries.push(entry);
        }

        dir
    }

    pub fn exchange_of(&self, code: &str) -> Option<Exchange> {
        self.get(code).map(|e| e.exchange)
    }

    /// Company name for a code; empty when unknown.
    pub fn name_of(&self, code: &str) -> &str {
        self.get(code).map_or("", |e| e.company_name.as_str())
    }

    /// Codes whose company name contains `token` (case-folded).
    pub fn codes_for_token(&self, token: &str) -> &[String] {
        self.name_index
            .get(token)
            .map_or(&[], |codes| codes.as_slice())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&TickerEntry> {
        self.by_code.get(code).map(|&i| &self.entries[i])
    }

    /// Insertion rank of a code (row order of the source table).
    pub fn rank_of(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    /// Entries in source-row order.
    pub fn entries(&self) -> &[TickerEntry] {
        &self.entries
    }

    pub fn codes_on(&self, exchange: Exchange) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.exchange == exchange)
            .map(|e| e.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Case-folded whitespace tokens longer than [`MIN_NAME_TOKEN_CHARS`].
pub(crate) fn name_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > MIN_NAME_TOKEN_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TickerDirectory {
        TickerDirectory::build(vec![
            TickerEntry::new("SHS", Exchange::Hnx, "Chứng khoán Sài Gòn Hà Nội"),
            TickerEntry::new("LPB", Exchange::Upcom, "Ngân hàng Lộc Phát"),
            TickerEntry::new("VCB", Exchange::Hose, "Ngân hàng Vietcombank"),
            TickerEntry::new("PVC", Exchange::Hnx, ""),
        ])
    }

    #[test]
    fn lookups() {
        let dir = sample();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.exchange_of("SHS"), Some(Exchange::Hnx));
        assert_eq!(dir.exchange_of("VCB"), Some(Exchange::Hose));
        assert_eq!(dir.name_of("LPB"), "Ngân hàng Lộc Phát");
        assert_eq!(dir.name_of("PVC"), "");
    }

    #[test]
    fn unknown_code_is_not_found() {
        let dir = sample();
        assert_eq!(dir.exchange_of("XYZ"), None);
        assert_eq!(dir.name_of("XYZ"), "");
        assert!(dir.codes_for_token("xyz").is_empty());
        assert!(!dir.contains("XYZ"));
    }

    #[test]
    fn name_index_keeps_only_long_tokens() {
        let dir = sample();
        // "ngân" has four characters, "hàng" four, "gòn" three
        assert_eq!(dir.codes_for_token("ngân"), ["LPB", "VCB"]);
        assert_eq!(dir.codes_for_token("khoán"), ["SHS"]);
        assert!(dir.codes_for_token("gòn").is_empty());
        assert!(dir.codes_for_token("hà").is_empty());
    }

    #[test]
    fn index_tokens_are_case_folded() {
        let dir = sample();
        assert_eq!(dir.codes_for_token("vietcombank"), ["VCB"]);
        assert!(dir.codes_for_token("Vietcombank").is_empty());
    }

    #[test]
    fn first_row_wins_on_duplicate_code() {
        let dir = TickerDirectory::build(vec![
            TickerEntry::new("SHS", Exchange::Hnx, "Chứng khoán SHS"),
            TickerEntry::new("SHS", Exchange::Hose, "Khác"),
        ]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.exchange_of("SHS"), Some(Exchange::Hnx));
        assert_eq!(dir.rank_of("SHS"), Some(0));
    }

    #[test]
    fn codes_on_exchange_in_row_order() {
        let dir = sample();
        let hnx: Vec<&str> = dir.codes_on(Exchange::Hnx).collect();
        assert_eq!(hnx, ["SHS", "PVC"]);
    }
}
