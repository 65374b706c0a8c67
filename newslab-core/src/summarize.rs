//! Extractive summarizer.
//!
//! Sentences are scored on position, domain keywords, figures and length,
//! the best `max_sentences` are kept, and the kept sentences are put back in
//! document order before joining.

use regex::Regex;
use std::sync::LazyLock;

use crate::directory::TickerDirectory;
use crate::extract::scan::CODE_TOKEN;
use crate::lexicon::SUMMARY_KEYWORDS;
use crate::text::clean_text;

/// Bodies shorter than this (in characters) are returned as-is.
pub const MIN_BODY_CHARS: usize = 100;
/// Sentence fragments of at most this many characters are dropped.
pub const MIN_SENTENCE_CHARS: usize = 30;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern must compile"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*").expect("number pattern must compile"));

/// Picks the most informative sentences of an article.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer<'d> {
    directory: &'d TickerDirectory,
}

impl<'d> Summarizer<'d> {
    pub fn new(directory: &'d TickerDirectory) -> Self {
        Self { directory }
    }

    pub fn summarize(&self, body: &str, title: &str, max_sentences: usize) -> String {
        let body = clean_text(body);
        let title = clean_text(title);

        if body.is_empty() || body.chars().count() < MIN_BODY_CHARS {
            return body;
        }

        let full = format!("{title}. {body}");
        let sentences: Vec<&str> = split_sentences(&full);

        if sentences.is_empty() {
            return String::new();
        }
        if sentences.len() <= max_sentences {
            return format!("{}.", sentences.join(". "));
        }

        let mut scored: Vec<(usize, i32)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, self.score_sentence(i, s)))
            .collect();
        // Stable: equal scores keep document order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        let mut kept: Vec<usize> = scored.iter().take(max_sentences).map(|(i, _)| *i).collect();
        kept.sort_unstable();

        let mut summary = kept
            .iter()
            .map(|&i| sentences[i])
            .collect::<Vec<_>>()
            .join(". ");
        if !summary.ends_with('.') {
            summary.push('.');
        }
        clean_text(&summary)
    }

    fn score_sentence(&self, index: usize, sentence: &str) -> i32 {
        let lower = sentence.to_lowercase();
        let mut score = position_weight(index);

        score += SUMMARY_KEYWORDS
            .iter()
            .filter(|(kw, _)| lower.contains(kw))
            .map(|(_, w)| w)
            .sum::<i32>();

        let numbers: Vec<&str> = NUMBER.find_iter(sentence).map(|m| m.as_str()).collect();
        score += numbers.len() as i32;
        if numbers.iter().any(|n| significant_digits(n) >= 4) {
            score += 2;
        }

        if sentence.contains('%') {
            score += 3;
        }

        score += match sentence.split_whitespace().count() {
            12..=35 => 2,
            n if n < 8 || n > 50 => -1,
            _ => 0,
        };

        if self.mentions_known_code(sentence) {
            score += 3;
        }

        score
    }

    fn mentions_known_code(&self, sentence: &str) -> bool {
        let upper = sentence.to_uppercase();
        CODE_TOKEN
            .find_iter(&upper)
            .any(|m| self.directory.contains(m.as_str()))
    }
}

/// Split on sentence-ending punctuation and keep fragments longer than
/// [`MIN_SENTENCE_CHARS`].
fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

fn position_weight(index: usize) -> i32 {
    match index {
        0 => 5,
        1 => 3,
        2..=4 => 1,
        _ => 0,
    }
}

fn significant_digits(number: &str) -> usize {
    number.chars().filter(|c| *c != '.' && *c != ',').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exchange, TickerEntry};

    fn directory() -> TickerDirectory {
        TickerDirectory::build(vec![TickerEntry::new("SHS", Exchange::Hnx, "")])
    }

    const BODY: &str = "Trong phiên sáng nay thị trường diễn biến khá giằng co. \
        SHS công bố lợi nhuận quý 3 đạt 1250 tỷ đồng, tăng 35% so với cùng kỳ năm trước. \
        Thời tiết Hà Nội hôm nay khá đẹp và nhiều nắng. \
        Ban lãnh đạo cho biết doanh thu năm nay dự kiến vượt kế hoạch đề ra. \
        Một số nhà đầu tư nhỏ lẻ vẫn đứng ngoài quan sát thêm. \
        Công ty dự kiến phát hành trái phiếu 500 tỷ đồng trong quý 4.";

    #[test]
    fn short_body_is_returned_cleaned() {
        let dir = directory();
        let s = Summarizer::new(&dir);
        assert_eq!(s.summarize("  Tin  ngắn ★ gọn. ", "Tiêu đề", 4), "Tin ngắn gọn.");
        assert_eq!(s.summarize("", "Tiêu đề", 4), "");
    }

    #[test]
    fn few_sentences_are_all_kept() {
        let dir = directory();
        let s = Summarizer::new(&dir);
        let out = s.summarize(BODY, "SHS báo lãi lớn trong quý 3 năm nay", 10);
        assert!(out.starts_with("SHS báo lãi lớn trong quý 3 năm nay. Trong phiên sáng"));
        assert!(out.ends_with("trong quý 4."));
    }

    #[test]
    fn body_of_fragments_has_no_summary() {
        let dir = directory();
        let s = Summarizer::new(&dir);
        let body = "Ngắn. ".repeat(18);
        assert!(clean_text(&body).chars().count() >= MIN_BODY_CHARS);
        assert_eq!(s.summarize(&body, "Tiêu đề", 4), "");
    }

    #[test]
    fn selection_keeps_document_order() {
        let dir = directory();
        let s = Summarizer::new(&dir);
        let title = "SHS báo lãi lớn trong quý 3 năm nay";
        let out = s.summarize(BODY, title, 3);

        let full = format!("{title}. {}", clean_text(BODY));
        let all = split_sentences(&full);
        let picked: Vec<usize> = all
            .iter()
            .enumerate()
            .filter(|(_, sent)| out.contains(*sent))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(picked.len(), 3);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert!(!out.contains("Thời tiết"));
        assert!(out.contains("1250 tỷ đồng"));
    }

    #[test]
    fn weather_sentence_scores_low() {
        let dir = directory();
        let s = Summarizer::new(&dir);
        let weather = s.score_sentence(5, "Thời tiết Hà Nội hôm nay khá đẹp và nhiều nắng");
        let figures = s.score_sentence(5, "SHS công bố lợi nhuận quý 3 đạt 1250 tỷ đồng, tăng 35%");
        assert!(figures > weather);
    }

    #[test]
    fn significant_digits_ignore_separators() {
        assert_eq!(significant_digits("1.250"), 4);
        assert_eq!(significant_digits("35"), 2);
        assert_eq!(significant_digits("1,5"), 2);
    }
}
