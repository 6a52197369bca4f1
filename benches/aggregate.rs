use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use station_stats::aggregator::StationTable;
use station_stats::input::LineReader;
use station_stats::output::render_report;
use station_stats::parser::{parse_record, Measurement};
use std::hint::black_box;

/// Deterministic `station;value` fixture, no RNG needed
fn fixture(records: usize, stations: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(records * 16);
    for i in 0..records {
        let tenths = (i * 7919) % 1999;
        let sign = if i % 2 == 0 { "-" } else { "" };
        let line = format!(
            "Station{};{}{}.{}\n",
            i % stations,
            sign,
            tenths / 10,
            tenths % 10
        );
        data.extend_from_slice(line.as_bytes());
    }
    data
}

fn bench_parse_record(c: &mut Criterion) {
    c.bench_function("parse_record", |b| {
        b.iter(|| parse_record(black_box(b"Ulaanbaatar;-13.2")).unwrap())
    });
}

fn bench_parse_measurement(c: &mut Criterion) {
    c.bench_function("parse_measurement", |b| {
        b.iter(|| Measurement::parse(black_box(b"-99.9")).unwrap())
    });
}

fn bench_fold(c: &mut Criterion) {
    let data = fixture(100_000, 100);

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("fold_100k", |b| {
        b.iter(|| {
            let mut reader = LineReader::new(black_box(&data[..]));
            let mut table = StationTable::new();
            while let Some(line) = reader.next_line().unwrap() {
                let record = parse_record(line).unwrap();
                table.fold(record.station, record.value);
            }
            table.len()
        })
    });
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let data = fixture(10_000, 500);
    let mut reader = LineReader::new(&data[..]);
    let mut table = StationTable::new();
    while let Some(line) = reader.next_line().unwrap() {
        let record = parse_record(line).unwrap();
        table.fold(record.station, record.value);
    }

    c.bench_function("render_report_500_stations", |b| {
        b.iter(|| render_report(black_box(&table.sorted_entries())))
    });
}

criterion_group!(
    benches,
    bench_parse_record,
    bench_parse_measurement,
    bench_fold,
    bench_render
);
criterion_main!(benches);
