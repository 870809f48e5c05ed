use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dataset_ingestion::ingestion::ingest;

fn csv_input(rows: usize) -> Vec<u8> {
    let mut out = String::from("id,name,score,active\n");
    for i in 0..rows {
        out.push_str(&format!("{i},name-{i},{}.5,{}\n", i % 100, i % 2 == 0));
    }
    out.into_bytes()
}

fn json_input(rows: usize) -> Vec<u8> {
    let items: Vec<serde_json::Value> = (0..rows)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "name": format!("name-{i}"),
                "score": (i % 100) as f64 + 0.5,
                "active": i % 2 == 0,
            })
        })
        .collect();
    serde_json::to_vec(&items).unwrap_or_default()
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    for rows in [1_000usize, 10_000] {
        let csv = csv_input(rows);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::new("csv", rows), &csv, |b, input| {
            b.iter(|| ingest(black_box(input), "bench.csv", "text/csv").unwrap())
        });

        let json = json_input(rows);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("json", rows), &json, |b, input| {
            b.iter(|| ingest(black_box(input), "bench.json", "application/json").unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
