use criterion::{Criterion, criterion_group, criterion_main};
use envrunner::core::env_file::parse_env_entries;
use std::hint::black_box;

fn sample_env_file(lines: usize) -> String {
    (0..lines)
        .map(|i| match i % 4 {
            0 => format!("# comment {i}"),
            1 => format!("KEY_{i}=value-{i}"),
            2 => String::new(),
            _ => format!("URL_{i}=http://host/{i}#fragment"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse_env_entries(c: &mut Criterion) {
    let content = sample_env_file(10_000);

    c.bench_function("parse_env_entries", |b| {
        b.iter(|| parse_env_entries(black_box(&content)));
    });
}

criterion_group!(benches, bench_parse_env_entries);
criterion_main!(benches);
