use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonlens::{JsonCache, MemorySource};
use serde_json::Value;

/// A wide document: `section_i` objects each holding `keys_per_section`
/// scalar entries. Lazy lookup should only ever parse one entry of it.
fn build_document(sections: usize, keys_per_section: usize) -> String {
    let mut out = String::from("{");
    for s in 0..sections {
        if s > 0 {
            out.push(',');
        }
        out.push_str(&format!("\"section_{s}\": {{"));
        for k in 0..keys_per_section {
            if k > 0 {
                out.push(',');
            }
            out.push_str(&format!("\"key_{k}\": \"value {s}-{k} with some padding\""));
        }
        out.push('}');
    }
    out.push('}');
    out
}

fn bench_lookup(c: &mut Criterion) {
    let document = build_document(100, 100);
    let source = MemorySource::new(&document);

    let mut group = c.benchmark_group("lookup");

    group.bench_function("cold_single_key", |b| {
        b.iter(|| {
            let mut cache = JsonCache::new(source.clone());
            let value = cache.get(black_box("section_50/key_50")).unwrap();
            black_box(value);
        });
    });

    group.bench_function("warm_single_key", |b| {
        let mut cache = JsonCache::new(source.clone());
        cache.get("section_50/key_50").unwrap();
        b.iter(|| {
            let value = cache.get(black_box("section_50/key_50")).unwrap();
            black_box(value);
        });
    });

    group.bench_function("siblings_after_one_population", |b| {
        b.iter(|| {
            let mut cache = JsonCache::new(source.clone());
            for k in 0..10 {
                let value = cache.get(&format!("section_50/key_{k}")).unwrap();
                black_box(value);
            }
        });
    });

    group.bench_function("full_parse_reference", |b| {
        b.iter(|| {
            let parsed: Value = serde_json::from_str(black_box(&document)).unwrap();
            black_box(parsed["section_50"]["key_50"].clone());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
