use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use strict_json::{from_str, from_value, to_string, to_value, JsonValue};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product \"{}\"\twith escapes", i),
            price: 9.99 + f64::from(i),
            quantity: i,
            tags: vec!["new".to_string(), "sale".to_string()],
        })
        .collect()
}

fn catalog(size: u32) -> JsonValue {
    to_value(&products(size)).unwrap()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&catalog(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000].iter() {
        let tree = catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| to_string(black_box(tree)))
        });
    }
    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let integers = to_string(&to_value(&(0..1000).collect::<Vec<i32>>()).unwrap());
    let floats = to_string(&to_value(&(0..1000).map(|i| i as f64 * 1.37e-3).collect::<Vec<_>>()).unwrap());
    let bools = to_string(&to_value(&(0..1000).map(|i| i % 2 == 0).collect::<Vec<_>>()).unwrap());

    group.bench_function("parse_integers", |b| b.iter(|| from_str(black_box(&integers))));
    group.bench_function("parse_floats", |b| b.iter(|| from_str(black_box(&floats))));
    group.bench_function("parse_booleans", |b| b.iter(|| from_str(black_box(&bools))));

    group.finish();
}

fn benchmark_comparison_with_serde_json(c: &mut Criterion) {
    let text = to_string(&catalog(100));

    let mut group = c.benchmark_group("comparison");

    group.bench_function("strict_json_parse", |b| b.iter(|| from_str(black_box(&text))));

    group.bench_function("serde_json_parse", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&text)))
    });

    group.finish();
}

fn benchmark_typed_roundtrip(c: &mut Criterion) {
    let items = products(100);

    c.bench_function("typed_roundtrip", |b| {
        b.iter(|| {
            let text = to_string(&to_value(black_box(&items)).unwrap());
            let _back: Vec<Product> = from_value(from_str(black_box(&text)).unwrap()).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_serialize,
    benchmark_primitive_array,
    benchmark_comparison_with_serde_json,
    benchmark_typed_roundtrip
);
criterion_main!(benches);
