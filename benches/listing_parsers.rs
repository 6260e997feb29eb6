//! Parser throughput on synthetic listing pages
//!
//! Each page carries 25 entries, the size of one real listing page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scraper::Html;

use geekbench_scrape::infrastructure::parsing::{
    CardComputeParser, CardCpuParser, LegacyCpuParser, ListingParser, PaginationDetector,
};

const ENTRIES_PER_PAGE: usize = 25;

fn stat(label: &str, class: &str, value: &str) -> String {
    format!(
        r#"<div class="col-6 col-md-3 col-lg-2"><span class="list-col-subtitle">{label}</span><span class="{class}">{value}</span></div>"#
    )
}

fn card_page(link_prefix: &str, stats: &str) -> String {
    let cards: String = (0..ENTRIES_PER_PAGE)
        .map(|i| {
            format!(
                r#"<div class="list-col"><div class="list-col-inner"><div class="row">
                <div class="col-12 col-lg-4"><a href="{link_prefix}{i}">System {i}</a>
                <span class="list-col-model">Vendor CPU {i} 3{i:03} MHz (8 cores)</span></div>{stats}
                </div></div></div>"#
            )
        })
        .collect();
    let pages: String = (1..=10)
        .map(|p| format!(r#"<li><a href="?page={p}">{p}</a></li>"#))
        .collect();
    format!(r#"<html><body>{cards}<ul class="pagination">{pages}</ul></body></html>"#)
}

fn cpu_card_page() -> String {
    let stats = [
        stat("Uploaded", "list-col-text", "Mar 05, 2025 <a href=\"/user/1\">carol</a>"),
        stat("Platform", "list-col-text", "Linux"),
        stat("Single-Core Score", "list-col-text-score", "2,345"),
        stat("Multi-Core Score", "list-col-text-score", "12,345"),
    ]
    .concat();
    card_page("/v6/cpu/", &stats)
}

fn compute_card_page() -> String {
    let stats = [
        stat("Uploaded", "list-col-text", "Mar 05, 2025"),
        stat("Platform", "list-col-text", "Android"),
        stat("API", "list-col-text", "Vulkan"),
        stat("Vulkan Score", "list-col-text-score", "9,876"),
    ]
    .concat();
    card_page("/v6/compute/", &stats)
}

fn legacy_page() -> String {
    let rows: String = (0..ENTRIES_PER_PAGE)
        .map(|i| {
            format!(
                r#"<tr><td><span class="timestamp-to-local-min">Sat, 11 May 2019</span></td>
                <td><a href="/v4/cpu/{i}">System {i}</a><span>Intel Core i7 3600 MHz (4 cores)</span></td>
                <td>Windows</td><td><a href="/user/{i}">user{i}</a></td><td>4,{i:03}</td><td>15,{i:03}</td></tr>"#
            )
        })
        .collect();
    format!(r#"<html><body><table class="geekbench3-index"><tbody>{rows}</tbody></table></body></html>"#)
}

fn bench_parsers(c: &mut Criterion) {
    let cpu_cards = Html::parse_document(&cpu_card_page());
    let compute_cards = Html::parse_document(&compute_card_page());
    let legacy = Html::parse_document(&legacy_page());

    let cpu_parser = CardCpuParser::new().unwrap();
    let compute_parser = CardComputeParser::new().unwrap();
    let legacy_parser = LegacyCpuParser::new().unwrap();
    let pagination = PaginationDetector::new().unwrap();

    c.bench_function("card_cpu_parse_page", |b| {
        b.iter(|| cpu_parser.parse_page(black_box(&cpu_cards)));
    });
    c.bench_function("card_compute_parse_page", |b| {
        b.iter(|| compute_parser.parse_page(black_box(&compute_cards)));
    });
    c.bench_function("legacy_cpu_parse_page", |b| {
        b.iter(|| legacy_parser.parse_page(black_box(&legacy)));
    });
    c.bench_function("detect_max_page", |b| {
        b.iter(|| pagination.detect_max_page(black_box(&cpu_cards)));
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
