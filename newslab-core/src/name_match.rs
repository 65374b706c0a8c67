//! Company-name fallback, used only when no ticker mention was found.

use std::collections::HashMap;

use crate::directory::{name_tokens, TickerDirectory};

/// Resolve a code from company-name tokens in `text`.
///
/// Every long token is looked up in the name index and every hit counted.
/// The most frequent code wins; ties go to the code inserted earliest.
pub fn match_by_name(text: &str, directory: &TickerDirectory) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in name_tokens(text) {
        for code in directory.codes_for_token(&token) {
            *counts.entry(code.as_str()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(a, na), (b, nb)| {
            na.cmp(nb).then_with(|| {
                // lower rank is better, so reverse
                let ra = directory.rank_of(a).unwrap_or(usize::MAX);
                let rb = directory.rank_of(b).unwrap_or(usize::MAX);
                rb.cmp(&ra)
            })
        })
        .map(|(code, _)| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exchange, TickerEntry};

    fn directory() -> TickerDirectory {
        TickerDirectory::build(vec![
            TickerEntry::new("LPB", Exchange::Upcom, "Ngân hàng Lộc Phát Việt Nam"),
            TickerEntry::new("EIB", Exchange::Upcom, "Ngân hàng Xuất Nhập khẩu Việt Nam"),
            TickerEntry::new("PVS", Exchange::Hnx, "Dịch vụ Kỹ thuật Dầu khí Việt Nam"),
        ])
    }

    #[test]
    fn no_tokens_no_match() {
        assert_eq!(match_by_name("Thị trường đi ngang", &directory()), None);
        assert_eq!(match_by_name("", &directory()), None);
    }

    #[test]
    fn most_frequent_code_wins() {
        // "phát" hits LPB only; "ngân"/"hàng" hit LPB and EIB
        let code = match_by_name("Ngân hàng Lộc Phát tăng vốn", &directory());
        assert_eq!(code.as_deref(), Some("LPB"));

        let code = match_by_name("Dịch vụ kỹ thuật dầu khí", &directory());
        assert_eq!(code.as_deref(), Some("PVS"));
    }

    #[test]
    fn ties_go_to_earliest_entry() {
        // "ngân" and "hàng" hit LPB and EIB equally
        let code = match_by_name("Ngân hàng thông báo", &directory());
        assert_eq!(code.as_deref(), Some("LPB"));
    }
}
