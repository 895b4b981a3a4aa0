use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_knot::{from_str, parse_document, parse_node, to_string};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Location {
    city: String,
    country: String,
}

#[derive(Serialize, Deserialize, Clone)]
struct User {
    name: String,
    age: u32,
    premium: bool,
    location: Location,
    topics: Vec<String>,
}

fn user() -> User {
    User {
        name: "Cansu".to_string(),
        age: 25,
        premium: false,
        location: Location {
            city: "Istanbul".to_string(),
            country: "TR".to_string(),
        },
        topics: vec![
            "politics".to_string(),
            "sports".to_string(),
            "technology".to_string(),
        ],
    }
}

fn catalog(size: u32) -> BTreeMap<String, Product> {
    (0..size)
        .map(|i| {
            (
                format!("p{}", i),
                Product {
                    sku: format!("SKU{}", i),
                    name: format!("Product {}", i),
                    price: 9.99 + f64::from(i),
                    quantity: i,
                    tags: vec!["new".to_string(), "sale".to_string()],
                },
            )
        })
        .collect()
}

fn benchmark_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for size in [10, 50, 100, 500].iter() {
        let knot = to_string(&catalog(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &knot, |b, knot| {
            b.iter(|| parse_document(black_box(knot)))
        });
    }
    group.finish();
}

fn benchmark_parse_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_node");

    for size in [10, 50, 100, 500].iter() {
        let knot = to_string(&catalog(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &knot, |b, knot| {
            b.iter(|| parse_node(black_box(knot)))
        });
    }
    group.finish();
}

fn benchmark_serialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_catalog");

    for size in [10, 50, 100, 500].iter() {
        let products = catalog(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, products| {
            b.iter(|| to_string(black_box(products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_catalog");

    for size in [10, 50, 100, 500].iter() {
        let knot = to_string(&catalog(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &knot, |b, knot| {
            b.iter(|| from_str::<BTreeMap<String, Product>>(black_box(knot)))
        });
    }
    group.finish();
}

fn benchmark_model_reply(c: &mut Criterion) {
    let reply = "user.name \"Cansu\"\nuser.age 25\nuser.premium false\n\
                 user.location.city \"Istanbul\"\nuser.location.country \"TR\"\n\
                 user.topics [\"politics\", \"sports\", \"technology\"]";

    c.bench_function("deserialize_model_reply", |b| {
        b.iter(|| from_str::<BTreeMap<String, User>>(black_box(reply)))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = user();
    let mut group = c.benchmark_group("knot_vs_json");

    group.bench_function("knot_serialize", |b| b.iter(|| to_string(black_box(&user))));
    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let knot = to_string(&user).unwrap();
    let json = serde_json::to_string(&user).unwrap();

    group.bench_function("knot_deserialize", |b| {
        b.iter(|| from_str::<User>(black_box(&knot)))
    });
    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_document,
    benchmark_parse_node,
    benchmark_serialize_catalog,
    benchmark_deserialize_catalog,
    benchmark_model_reply,
    benchmark_comparison_with_json
);
criterion_main!(benches);
