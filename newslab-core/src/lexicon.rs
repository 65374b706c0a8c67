//! Curated word tables driving extraction, risk and sentiment scoring.
//!
//! Everything language-specific lives here as data. Adding a new colliding
//! code or a new risk phrase is a table edit, not a code change.

use crate::domain::Severity;

// ─── Mention extraction ─────────────────────────────────────────────

/// Codes that are also ordinary Vietnamese words, with the phrases in which
/// the token is a word rather than a security reference.
pub const RISKY_CODES: &[(&str, &[&str])] = &[
    ("THU", &["doanh thu", "thu nhập", "thu được", "thu về"]),
    ("TIN", &["tin vắn", "tin tức", "nhận tin", "tin nhanh", "tin mới"]),
    ("USD", &["usd", "đô la", "dollar"]),
    ("CEO", &["ceo của", "vị trí ceo", "làm ceo"]),
    ("CAR", &["car", "xe hơi", "ô tô"]),
    ("HAI", &["hai năm", "hai quý", "hai tháng", "cả hai"]),
    ("TOP", &["top", "đứng top", "nằm trong top"]),
    ("VAN", &["văn bản", "văn phòng"]),
    ("BAO", &["bao gồm", "bao nhiêu"]),
    ("GIA", &["giá", "gia đình", "gia tăng"]),
    ("NAM", &["nam", "năm", "miền nam"]),
    ("MAI", &["mai", "ngày mai"]),
    ("HOI", &["hội", "hội đồng", "hội nghị"]),
    ("CAN", &["cần", "cần thiết"]),
    ("DAT", &["đạt", "đạt được"]),
    ("SAO", &["sao", "ngôi sao", "tại sao"]),
];

/// Phrases that, shortly before a risky code, override its common-word reading.
/// Patterns run against upper-cased text.
pub const STRONG_INDICATORS: &[&str] = &[
    r"\bCÔNG\s+TY\s+",
    r"\bCTCP\s+",
    r"\bTẬP\s+ĐOÀN\s+",
    r"\bNGÂN\s+HÀNG\s+",
    r"\bMÃ\s+(?:CK|CP|CHỨNG\s+KHOÁN)?\s*:?\s*",
    r"\bCỔ\s+PHIẾU\s+",
];

/// Broader indicator set: at least one must precede a scanned code.
pub const CONTEXT_INDICATORS: &[&str] = &[
    r"\bCÔNG\s+TY\s+",
    r"\bMÃ\s+",
    r"\bCỔ\s+PHIẾU\s+",
    r"\bCP\s+",
    r"\bCK\s+",
    r"\bCTCP\s+",
    r"\bTNHH\s+",
    r"\bTẬP\s+ĐOÀN\s+",
    r"\bNGÂN\s+HÀNG\s+",
    r"\bNH\s+",
];

/// Phrases that, immediately before a code, mark it as a brokerage name
/// ("securities company SHS") rather than the issuer the article is about.
pub const BLACKLIST_PREFIXES: &[&str] = &[r"\bCHỨNG\s+KHOÁN", r"\bCTCK"];

/// Phrases that, anywhere near a code, mark market commentary: the code is
/// the commenting brokerage, not the subject.
pub const BLACKLIST_CONTEXTS: &[&str] = &[r"NHẬN\s+ĐỊNH", r"VN-?INDEX"];

/// Characters on each side of a token searched for blacklist context phrases.
pub const BLACKLIST_CONTEXT_WINDOW_CHARS: usize = 50;

/// Characters before a token searched for indicator phrases.
pub const INDICATOR_WINDOW_CHARS: usize = 30;

/// Characters on each side of a risky token searched for its common-word phrases.
pub const COMMON_WORD_WINDOW_CHARS: usize = 100;

// ─── Risk keywords ──────────────────────────────────────────────────

/// One entry of the risk keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lower-case phrase, matched as a substring.
    pub phrase: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub score: i32,
    /// Comma-separated violation codes; empty for positive rules.
    pub violations: &'static str,
}

const fn rule(
    phrase: &'static str,
    category: &'static str,
    severity: Severity,
    score: i32,
    violations: &'static str,
) -> KeywordRule {
    KeywordRule {
        phrase,
        category,
        severity,
        score,
        violations,
    }
}

const INTERNAL: &str = "A. Internal";
const FINANCIAL: &str = "B. Financial";
const MANIPULATION: &str = "C. Manipulation";
const MERGERS: &str = "D. M&A";
const LEGAL: &str = "E. Legal";
const EXTERNAL: &str = "F. External events";
const POSITIVE: &str = "Positive";

pub const RISK_KEYWORDS: &[KeywordRule] = &[
    // A. Insiders and governance
    rule("lãnh đạo bị bắt", INTERNAL, Severity::Severe, -95, "I.2, II.A"),
    rule("lãnh đạo bỏ trốn", INTERNAL, Severity::Severe, -95, "I.2, II.A"),
    rule("cổ đông lớn bán chui", INTERNAL, Severity::Severe, -85, "I.1, II.A"),
    rule("chủ tịch bất ngờ thoái hết vốn", INTERNAL, Severity::Severe, -85, "I.1, II.A"),
    // B. Financial distress
    rule("bất ngờ báo lỗ", FINANCIAL, Severity::Severe, -80, "I.4, II.B"),
    rule("âm vốn chủ", FINANCIAL, Severity::Severe, -90, "II.B"),
    rule("mất khả năng thanh toán", FINANCIAL, Severity::Severe, -90, "II.B"),
    rule("nợ xấu bất thường", FINANCIAL, Severity::Severe, -80, "II.B"),
    // C. Manipulation and abnormal price moves
    rule("đội lái làm giá", MANIPULATION, Severity::Severe, -95, "I.3, II.C"),
    rule("tăng trần liên tiếp", MANIPULATION, Severity::Warning, -60, "I.2, II.C"),
    rule("giảm sàn liên tục", MANIPULATION, Severity::Warning, -70, "I.2, II.C"),
    rule("bốc đầu", MANIPULATION, Severity::Warning, -65, "I.2, I.3, II.C"),
    rule("kịch trần", MANIPULATION, Severity::Warning, -65, "I.2, I.3, II.C"),
    rule("rớt đáy", MANIPULATION, Severity::Warning, -70, "I.2, I.3, II.C"),
    rule("cổ phiếu tăng phi mã", MANIPULATION, Severity::Warning, -65, "I.2, I.4, II.C"),
    rule("tăng dựng đứng", MANIPULATION, Severity::Warning, -60, "I.2, II.C"),
    rule("khối lượng tăng bất thường", MANIPULATION, Severity::Warning, -65, "I.6, II.C"),
    rule("giao dịch nội gián", MANIPULATION, Severity::Severe, -90, "I.1, II.C"),
    // D. M&A
    rule("niêm yết cửa sau", MERGERS, Severity::Severe, -85, "I.5, II.D"),
    rule("thâu tóm", MERGERS, Severity::Warning, -50, "I.5, II.D"),
    // E. Legal
    rule("công an điều tra", LEGAL, Severity::Severe, -90, "II.E"),
    rule("khởi tố lãnh đạo", LEGAL, Severity::Severe, -95, "II.E"),
    rule("gian lận tài chính", LEGAL, Severity::Severe, -95, "II.E"),
    // F. External events
    rule("cháy nhà xưởng", EXTERNAL, Severity::Severe, -75, "II.F"),
    rule("bị thu hồi giấy phép", EXTERNAL, Severity::Severe, -90, "II.F"),
    // Positive
    rule("lợi nhuận tăng", POSITIVE, Severity::Positive, 70, ""),
    rule("tăng trưởng mạnh", POSITIVE, Severity::Positive, 65, ""),
    rule("doanh thu kỷ lục", POSITIVE, Severity::Positive, 75, ""),
];

// ─── Sentiment ──────────────────────────────────────────────────────

pub const POSITIVE_WORDS: &[&str] = &[
    "tăng",
    "tăng trưởng",
    "lợi nhuận",
    "thành công",
    "tốt",
    "cao",
    "mạnh",
    "vượt",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "giảm",
    "sụt giảm",
    "lỗ",
    "thua lỗ",
    "khó khăn",
    "tiêu cực",
    "suy giảm",
];

// ─── Summarization ──────────────────────────────────────────────────

/// Domain keywords and the weight each adds to a sentence's score.
pub const SUMMARY_KEYWORDS: &[(&str, i32)] = &[
    ("tăng", 3),
    ("giảm", 3),
    ("tăng trưởng", 3),
    ("lợi nhuận", 4),
    ("doanh thu", 4),
    ("lỗ", 3),
    ("tỷ đồng", 3),
    ("nghìn tỷ", 4),
    ("cổ phiếu", 3),
    ("niêm yết", 3),
    ("giao dịch", 2),
    ("thanh khoản", 3),
    ("quý", 3),
    ("năm", 2),
    ("phát hành", 3),
    ("trái phiếu", 3),
    ("đầu tư", 2),
    ("vốn", 3),
];

// ─── Headline screen ────────────────────────────────────────────────

/// Round-up and digest headlines; matched against the lower-cased title.
pub const GENERIC_HEADLINES: &[&str] = &[
    r"lịch\s+sự\s+kiện",
    r"tin\s+vắn",
    r"tổng\s+hợp",
    r"điểm\s+tin",
    r"nhịp\s+đập",
    r"thị\s+trường\s+ngày",
    r"chứng\s+khoán\s+ngày",
    r"phiên\s+giao\s+dịch",
    r"các\s+tin\s+tức",
    r"tin\s+nhanh",
    r"cập\s+nhật",
    r"điểm\s+lại",
];
