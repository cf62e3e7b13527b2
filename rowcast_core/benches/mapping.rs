// Criterion benches for row-to-struct mapping throughput.
// Run locally with:
//   cargo bench -p rowcast_core --bench mapping

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rowcast_core::{MemoryRow, TupleMapper};
use rowcast_macros::Mappable;

#[derive(Mappable, Clone, Debug, Default)]
struct BenchUser {
    #[db]
    id: i64,
    #[db(column = "email_address")]
    email: String,
    #[db]
    active: bool,
    #[db]
    last_seen: Option<i64>,
}

fn sample_row(id: i64) -> MemoryRow {
    MemoryRow::new()
        .with("id", id)
        .with("email_address", format!("user{id}@example.com"))
        .with("active", true)
        .with("last_seen", 1_700_000_000_i64)
}

fn bench_map_one(c: &mut Criterion) {
    let mapper = TupleMapper::new();
    let row = sample_row(1);
    let mut group = c.benchmark_group("map_one");
    group.bench_function("user_row", |b| {
        b.iter(|| black_box(mapper.map_one::<BenchUser, _>(black_box(&row))))
    });
    group.finish();
}

fn bench_map_many(c: &mut Criterion) {
    let mapper = TupleMapper::new();
    let mut group = c.benchmark_group("map_many");
    for size in [16_i64, 256] {
        let rows: Vec<MemoryRow> = (0..size).map(sample_row).collect();
        group.bench_function(format!("rows_{size}"), |b| {
            b.iter_batched(
                || rows.clone(),
                |rows| black_box(mapper.map_many::<BenchUser, _>(&rows)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_map_one, bench_map_many);
criterion_main!(benches);
