use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use log_ingest::decoder::decode;
use log_ingest::encoder::{encode, encode_to_vec};
use log_ingest::response::{PipelineOutcome, build};

fn make_body(message_len: usize) -> Vec<u8> {
    serde_json::json!({
        "deviceId": 42,
        "timeStamp": 1_700_000_000_123_i64,
        "eventType": "WARNING",
        "eventMessage": "x".repeat(message_len),
    })
    .to_string()
    .into_bytes()
}

// =========================================================================
// Benchmarks
// =========================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [16, 256, 4096] {
        let body = make_body(size);
        group.bench_with_input(BenchmarkId::new("valid", size), &body, |b, body| {
            b.iter(|| decode(black_box(Some(body.as_slice()))));
        });
    }

    let missing = br#"{"deviceId":42,"timeStamp":1,"eventType":"WARNING"}"#;
    group.bench_function("missing_field", |b| {
        b.iter(|| decode(black_box(Some(&missing[..]))));
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [16, 256, 4096] {
        let event = decode(Some(&make_body(size))).unwrap();
        group.bench_with_input(BenchmarkId::new("record", size), &event, |b, event| {
            b.iter(|| encode(black_box(event)));
        });
        group.bench_with_input(BenchmarkId::new("to_vec", size), &event, |b, event| {
            b.iter(|| encode_to_vec(black_box(event)));
        });
    }

    group.finish();
}

fn bench_ingest_hot_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_hot_path");

    for size in [16, 256, 4096] {
        let body = make_body(size);
        // decode + encode + response, without the transport
        group.bench_with_input(BenchmarkId::new("decode+encode+build", size), &body, |b, body| {
            b.iter(|| {
                let event = decode(black_box(Some(body.as_slice()))).unwrap();
                let payload = encode_to_vec(&event);
                let response = build(&PipelineOutcome::Delivered {
                    device_id: event.device_id,
                });
                (payload, response.body_json())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_ingest_hot_path);
criterion_main!(benches);
