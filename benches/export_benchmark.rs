//! Benchmarks for ticket export.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use ticketpdf::layout::flow_lines;
use ticketpdf::model::Snapshot;
use ticketpdf::{extract_view_lines, ExportConfig, Exporter, Ticket, TicketView};

fn sample_view() -> TicketView {
    Ticket {
        passenger_name: "Ada Lovelace".into(),
        flight_number: "AL 204".into(),
        airline_name: "Aero Link".into(),
        airline_logo: "https://cdn.example/aero.png".into(),
        departure: "LHR".into(),
        arrival: "JFK".into(),
        date: "2024-05-01".into(),
        time: "09:30".into(),
        tracking_number: "TRK123".into(),
        trip: "One way".into(),
        tour_type: "Business".into(),
        passenger_class: "Economy".into(),
    }
    .to_view()
}

fn snapshot(width: u32, height: u32) -> Snapshot {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut data = Cursor::new(Vec::new());
    img.write_to(&mut data, ImageFormat::Png)
        .expect("encode benchmark snapshot");
    Snapshot::new(data.into_inner())
}

fn bench_extract(c: &mut Criterion) {
    let view = sample_view();
    let config = ExportConfig::default();
    c.bench_function("extract_lines", |b| {
        b.iter(|| extract_view_lines(black_box(&view), &config))
    });
}

fn bench_flow(c: &mut Criterion) {
    let config = ExportConfig::default();
    let lines: Vec<String> = (0..500).map(|i| format!("Booking line {}", i)).collect();
    c.bench_function("flow_500_lines", |b| {
        b.iter(|| flow_lines(black_box(&lines), &config))
    });
}

fn bench_text_export(c: &mut Criterion) {
    let view = sample_view();
    let exporter = Exporter::with_defaults();
    c.bench_function("text_export", |b| {
        b.iter(|| exporter.render(black_box(&view)))
    });
}

fn bench_raster_export(c: &mut Criterion) {
    let view = sample_view().with_snapshot(snapshot(1000, 640));
    let exporter = Exporter::with_defaults();
    let mut group = c.benchmark_group("raster");
    group.sample_size(10);
    group.bench_function("raster_export", |b| {
        b.iter(|| exporter.render(black_box(&view)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_extract,
    bench_flow,
    bench_text_export,
    bench_raster_export
);
criterion_main!(benches);
