use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use storefront_cart::{CartEntry, reconcile, total_value};
use storefront_catalog::{Catalog, Product, Rating};
use storefront_core::{Money, ProductId};

fn catalog(size: usize) -> Catalog {
    let products = (0..size)
        .map(|i| {
            Product::new(
                ProductId::new(format!("p{i}")).unwrap(),
                format!("Product {i}"),
                "Bench",
                Money::from_minor(100 + i as u64),
                Rating::new((i % 6) as u8).unwrap(),
                "",
            )
            .unwrap()
        })
        .collect();
    Catalog::new(products).unwrap()
}

fn entries(count: usize) -> Vec<CartEntry> {
    // Every third entry references a product that is not sold any more.
    (0..count)
        .map(|i| {
            let id = if i % 3 == 0 { format!("gone{i}") } else { format!("p{i}") };
            CartEntry::new(ProductId::new(id).unwrap(), (i % 5 + 1) as i64)
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    let catalog = catalog(5_000);

    for size in [10, 100, 1_000] {
        let entries = entries(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| reconcile(black_box(entries), black_box(&catalog)));
        });
    }
    group.finish();
}

fn bench_totals(c: &mut Criterion) {
    let catalog = catalog(5_000);
    let items = reconcile(&entries(1_000), &catalog);

    c.bench_function("total_value_1000", |b| {
        b.iter(|| total_value(black_box(&items)).unwrap());
    });
}

criterion_group!(benches, bench_reconcile, bench_totals);
criterion_main!(benches);
