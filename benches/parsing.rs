//! Performance benchmarks for quern
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quern::analysis::{collect_tokens, standard_analyzer};
use quern::config::ParserConfig;
use quern::query::QueryParser;
use quern::term::rewrite::{AnalyzingRewriter, TermRewriter};
use quern::term::segment::segment;
use std::sync::Arc;

fn bench_query_parsing(c: &mut Criterion) {
    let queries = vec![
        "simple",
        "two words",
        "\"exact phrase\"",
        "title:Run*ing",
        "H?user | name:Häuser~",
        "field:[alpha TO omega] -draft",
    ];

    let config = ParserConfig {
        allow_leading_wildcard: true,
        ..ParserConfig::default()
    };
    let analyzer = config.build_analyzer().expect("default config builds");
    let parser = QueryParser::new(config, analyzer);

    let mut group = c.benchmark_group("query_parsing");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, q| {
            b.iter(|| parser.parse(black_box(q)));
        });
    }
    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let terms = vec![
        ("plain", "normalization"),
        ("wildcards", "no*mal?zat*on"),
        ("escapes", "no\\*mal\\?zation\\\\tail"),
    ];

    let mut group = c.benchmark_group("segmentation");
    for (name, term) in terms {
        group.bench_with_input(BenchmarkId::from_parameter(name), term, |b, t| {
            b.iter(|| segment(black_box(t)));
        });
    }
    group.finish();
}

fn bench_wildcard_rewrite(c: &mut Criterion) {
    let rewriter = AnalyzingRewriter::new(Arc::new(standard_analyzer::<&str>(&[])), true);

    c.bench_function("wildcard_rewrite", |b| {
        b.iter(|| rewriter.wildcard_term("body", black_box("Norm*liza?ion*Häuser")));
    });
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = standard_analyzer::<&str>(&[]);
    let text = "The quick brown Fox jumps over the lazy Häuser";

    c.bench_function("analysis", |b| {
        b.iter(|| collect_tokens(&analyzer, "body", black_box(text)));
    });
}

criterion_group!(
    benches,
    bench_query_parsing,
    bench_segmentation,
    bench_wildcard_rewrite,
    bench_analysis
);
criterion_main!(benches);
