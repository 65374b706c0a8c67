//! Small text helpers: cleaning and character-counted windows.
//!
//! Article text is Vietnamese, so windows are measured in characters, never
//! bytes. All helpers take byte offsets that lie on char boundaries (as
//! returned by `regex` matches) and return borrowed slices.

/// Punctuation kept by [`clean_text`]; everything else that is not
/// alphanumeric, `_` or whitespace becomes a space.
const KEPT_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '%', '-', '+', '/', '"', '\'',
];

/// Replace noise characters with spaces, collapse whitespace, trim.
///
/// Letters with Vietnamese diacritics are alphanumeric and survive.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() || KEPT_PUNCTUATION.contains(&c)
            {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Up to `n` characters ending at byte offset `end`.
pub fn chars_before(text: &str, end: usize, n: usize) -> &str {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(end, |(i, _)| i);
    &head[start..]
}

/// Up to `n` characters starting at byte offset `start`.
pub fn chars_after(text: &str, start: usize, n: usize) -> &str {
    let tail = &text[start..];
    let end = tail
        .char_indices()
        .nth(n)
        .map_or(tail.len(), |(i, _)| i);
    &tail[..end]
}

/// Character offset of byte offset `byte`.
pub fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_keeps_diacritics_and_punctuation() {
        assert_eq!(
            clean_text("  Lợi nhuận  tăng 25%!\n\t★ (quý 3) "),
            "Lợi nhuận tăng 25%! (quý 3)"
        );
    }

    #[test]
    fn clean_text_replaces_symbols() {
        assert_eq!(clean_text("A★B•C"), "A B C");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn windows_count_characters() {
        let text = "cổ phiếu SHS";
        let at = text.find("SHS").unwrap();
        assert_eq!(chars_before(text, at, 4), "iếu ");
        assert_eq!(chars_before(text, at, 100), "cổ phiếu ");
        assert_eq!(chars_after(text, 0, 2), "cổ");
        assert_eq!(chars_after(text, at, 100), "SHS");
        assert_eq!(char_offset(text, at), 9);
    }

    #[test]
    fn empty_windows() {
        assert_eq!(chars_before("abc", 0, 5), "");
        assert_eq!(chars_after("abc", 3, 5), "");
        assert_eq!(chars_before("abc", 3, 0), "");
    }
}
