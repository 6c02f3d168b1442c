#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ijson::{basic_parse, ParserOptions};

/// Deterministically builds a JSON document of roughly `target_len` bytes:
/// an array of `{"id": N, "name": "..."}` objects.
fn make_json_payload(target_len: usize) -> String {
    let mut s = String::from("[");
    let mut id = 0u64;
    while s.len() < target_len {
        if id > 0 {
            s.push(',');
        }
        s.push_str(&format!(r#"{{"id":{id},"name":"item-{id}"}}"#));
        id += 1;
    }
    s.push(']');
    s
}

fn run_basic_parse(payload: &str) -> usize {
    let mut parser = basic_parse(payload.as_bytes(), ParserOptions::default());
    let mut events = 0usize;
    while parser.next_event().unwrap().is_some() {
        events += 1;
    }
    events
}

fn bench_basic_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("basic_parse_throughput");
    for &size in &[1_024usize, 64 * 1024, 1024 * 1024] {
        let payload = make_json_payload(size);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| run_basic_parse(payload));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_basic_parse);
criterion_main!(benches);
