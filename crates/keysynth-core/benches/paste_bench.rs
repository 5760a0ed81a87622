//! Criterion benchmarks for paste encoding and batch slicing.
//!
//! Run with:
//! ```bash
//! cargo bench --package keysynth-core --bench paste_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keysynth_core::domain::paste::{encode_paste, PasteJob, PasteSequence};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Multi-line shell snippet of roughly `lines * 40` characters.
fn build_snippet(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("echo \"line {i:04} of the pasted script\" ✓\n"))
        .collect()
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode_paste(c: &mut Criterion) {
    let mut group = c.benchmark_group("paste_encode");

    group.bench_function("single_line_short", |b| {
        b.iter(|| encode_paste(black_box("hunter2")))
    });

    for lines in [1usize, 10, 100] {
        let text = build_snippet(lines);
        group.bench_with_input(BenchmarkId::new("multi_line", lines), &text, |b, text| {
            b.iter(|| encode_paste(black_box(text)))
        });
    }

    group.finish();
}

fn bench_drain_job(c: &mut Criterion) {
    let mut group = c.benchmark_group("paste_job");
    let sequence = PasteSequence::from_text(&build_snippet(100));

    for batch_size in [1usize, 10, 100] {
        group.bench_with_input(
            BenchmarkId::new("drain_batches", batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    let mut job = PasteJob::from(sequence.clone());
                    let mut sent = job.take_leading().len();
                    while let Some(batch) = job.next_batch(batch_size) {
                        sent += batch.len();
                    }
                    sent + job.take_trailing().len()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_encode_paste, bench_drain_job);
criterion_main!(benches);
