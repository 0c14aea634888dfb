//! Performance benchmarks for katsuragi.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Parsing markup into the document arena
//! - Each extractor over an already parsed page
//! - Cache hits and eviction churn

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use katsuragi::{
    extract_description, extract_favicons, extract_links, extract_title, DocumentCache,
    LinkCategory, ParsedDocument,
};
use std::sync::Arc;

const PAGE_URL: &str = "https://www.example.com/articles/sample";

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta name="description" content="A sample article for benchmarking.">
    <meta property="og:title" content="Sample Article (OG)">
    <meta property="og:image" content="/images/square.png">
    <meta property="og:image:width" content="512">
    <meta property="og:image:height" content="512">
    <link rel="icon" href="/favicon.ico">
    <link rel="apple-touch-icon" href="/apple-touch-icon.png">
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
        <a href="https://blog.example.com/">Blog</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p>First paragraph with a <a href="https://other.org/ref">reference</a>.</p>
        <p>Second paragraph with a <a href="../related">related link</a>.</p>
    </article>
    <footer>
        <a href="https://twitter.com/example">Twitter</a>
        <a href="mailto:hello@example.com">Contact</a>
    </footer>
</body>
</html>
"#;

fn parse(html: &str) -> ParsedDocument {
    match ParsedDocument::parse(html) {
        Ok(doc) => doc,
        Err(err) => panic!("benchmark fixture failed to parse: {err}"),
    }
}

/// A page with many links, for scaling the traversal.
fn large_page(links: usize) -> String {
    let mut html = String::from("<html><head><title>Large</title></head><body><ul>");
    for i in 0..links {
        let host = if i % 3 == 0 { "www.example.com" } else { "elsewhere.net" };
        html.push_str(&format!(r#"<li><a href="https://{host}/page/{i}">Link {i}</a></li>"#));
    }
    html.push_str("</ul></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_sample", |b| {
        b.iter(|| ParsedDocument::parse(black_box(SAMPLE_HTML)));
    });
}

fn bench_extractors(c: &mut Criterion) {
    let doc = parse(SAMPLE_HTML);

    c.bench_function("extract_title", |b| {
        b.iter(|| extract_title(black_box(&doc)));
    });
    c.bench_function("extract_description", |b| {
        b.iter(|| extract_description(black_box(&doc)));
    });
    c.bench_function("extract_favicons", |b| {
        b.iter(|| extract_favicons(black_box(&doc), PAGE_URL, |_| false));
    });
    c.bench_function("extract_links_internal", |b| {
        b.iter(|| extract_links(black_box(&doc), PAGE_URL, LinkCategory::Internal));
    });
}

fn bench_links_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("links_scaling");

    for size in [10, 100, 500] {
        let html = large_page(size);
        let doc = parse(&html);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("all", size), &doc, |b, doc| {
            b.iter(|| extract_links(black_box(doc), PAGE_URL, LinkCategory::All));
        });
        group.bench_with_input(BenchmarkId::new("external", size), &doc, |b, doc| {
            b.iter(|| extract_links(black_box(doc), PAGE_URL, LinkCategory::External));
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let doc = Arc::new(parse(SAMPLE_HTML));

    let cache = DocumentCache::new(64);
    for i in 0..64 {
        cache.put(&format!("https://example.com/{i}"), Ok(Arc::clone(&doc)));
    }
    c.bench_function("cache_hit", |b| {
        b.iter(|| cache.get(black_box("https://example.com/42")));
    });

    let churn = DocumentCache::new(16);
    let mut i = 0_u64;
    c.bench_function("cache_put_with_eviction", |b| {
        b.iter(|| {
            i += 1;
            churn.put(&format!("https://example.com/{i}"), Ok(Arc::clone(&doc)));
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_extractors,
    bench_links_scaling,
    bench_cache
);
criterion_main!(benches);
