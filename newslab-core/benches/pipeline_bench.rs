//! Criterion benchmarks for NewsLab hot paths.
//!
//! Benchmarks:
//! 1. Mention extraction (pattern hit vs. full scan fallback)
//! 2. Keyword risk detection
//! 3. Summarization over growing bodies
//! 4. Full per-article pipeline

use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use newslab_core::domain::{Article, Exchange, TickerEntry};
use newslab_core::{
    KeywordRiskDetector, MentionExtractor, Pipeline, PipelineConfig, Summarizer, TickerDirectory,
};

// ── Helpers ──────────────────────────────────────────────────────────

const SENTENCE: &str = "Công ty cho biết doanh thu quý 3 đạt 1250 tỷ đồng, tăng 18% so với cùng kỳ năm trước. ";

fn make_directory() -> TickerDirectory {
    let exchanges = [Exchange::Hnx, Exchange::Upcom, Exchange::Hose];
    let mut rows = vec![
        TickerEntry::new("SHS", Exchange::Hnx, "Chứng khoán Sài Gòn Hà Nội"),
        TickerEntry::new("LPB", Exchange::Upcom, "Ngân hàng Lộc Phát"),
        TickerEntry::new("THU", Exchange::Hnx, ""),
        TickerEntry::new("VCB", Exchange::Hose, "Ngân hàng Vietcombank"),
    ];
    // Synthetic three-letter codes for a realistically sized directory.
    for i in 0..600u32 {
        let code: String = [i / 26 % 26, i % 26, (i * 7) % 26]
            .iter()
            .map(|&n| char::from(b'A' + n as u8))
            .collect();
        rows.push(TickerEntry::new(
            code,
            exchanges[i as usize % 3],
            format!("Công ty cổ phần số {i}"),
        ));
    }
    TickerDirectory::build(rows)
}

fn make_body(sentences: usize) -> String {
    SENTENCE.repeat(sentences)
}

fn make_article(title: &str, sentences: usize) -> Article {
    Article {
        title: title.into(),
        body: make_body(sentences),
        published_at: DateTime::parse_from_rfc3339("2025-10-21T14:30:00+07:00").unwrap(),
        source_url: "https://example.vn/tin".into(),
    }
}

// ── 1. Mention Extraction ────────────────────────────────────────────

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mention_extraction");
    let dir = make_directory();
    let extractor = MentionExtractor::new(&dir);

    for &sentences in &[5, 20, 80] {
        let body = make_body(sentences);
        let pattern_hit = format!("Ngân hàng Lộc Phát (UPCOM: LPB) báo lãi. {body}");
        let scan_only = format!("Thị trường hôm nay. {body} Công ty SHS công bố.");

        group.bench_with_input(
            BenchmarkId::new("pattern_hit", sentences),
            &pattern_hit,
            |b, text| b.iter(|| extractor.extract(black_box(text))),
        );
        group.bench_with_input(
            BenchmarkId::new("scan_fallback", sentences),
            &scan_only,
            |b, text| b.iter(|| extractor.extract(black_box(text))),
        );
        group.bench_with_input(
            BenchmarkId::new("detect_codes", sentences),
            &scan_only,
            |b, text| b.iter(|| extractor.detect_codes(black_box(text))),
        );
    }

    group.finish();
}

// ── 2. Risk Detection ────────────────────────────────────────────────

fn bench_risk(c: &mut Criterion) {
    let mut group = c.benchmark_group("risk_detection");
    let detector = KeywordRiskDetector::new();

    for &sentences in &[5, 80] {
        let text = format!("Lãnh đạo bị bắt, công an điều tra. {}", make_body(sentences));
        group.bench_with_input(BenchmarkId::new("analyze", sentences), &text, |b, text| {
            b.iter(|| detector.analyze(black_box(text)))
        });
    }

    group.finish();
}

// ── 3. Summarization ─────────────────────────────────────────────────

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    let dir = make_directory();
    let summarizer = Summarizer::new(&dir);

    for &sentences in &[5, 20, 80] {
        let body = make_body(sentences);
        group.bench_with_input(BenchmarkId::new("max_4", sentences), &body, |b, body| {
            b.iter(|| summarizer.summarize(black_box(body), "SHS báo lãi quý 3 vượt kế hoạch", 4))
        });
    }

    group.finish();
}

// ── 4. Full Pipeline ─────────────────────────────────────────────────

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let dir = make_directory();
    let pipeline = Pipeline::new(&dir, PipelineConfig::default());

    let accepted = make_article("Cổ phiếu SHS báo lợi nhuận tăng mạnh quý 3", 20);
    let rejected = make_article("Thị trường đi ngang trong phiên sáng", 20);

    group.bench_function("accepted_20_sentences", |b| {
        b.iter(|| pipeline.process(black_box(&accepted)))
    });
    group.bench_function("rejected_20_sentences", |b| {
        b.iter(|| pipeline.process(black_box(&rejected)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_extraction,
    bench_risk,
    bench_summarize,
    bench_pipeline,
);
criterion_main!(benches);
