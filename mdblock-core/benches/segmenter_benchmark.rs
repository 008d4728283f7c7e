//! Benchmarks for segmentation over streamed deltas

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use mdblock_core::Segmenter;
use std::hint::black_box;

/// Generate a mixed markdown document of roughly `size_kb` kilobytes
fn generate_test_text(size_kb: usize) -> String {
    let base_text = "A paragraph of prose that keeps going for a while.\n\n\
                     ![figure](https://example.com/figure.png)\n\
                     Inline math $a^2+b^2=c^2$ explained here.\n\
                     $$\\sum_{i=0}^{n} i = \\frac{n(n+1)}{2}$$\n";
    let repetitions = (size_kb * 1024) / base_text.len() + 1;
    base_text.repeat(repetitions)
}

/// Feed `text` in fixed-size deltas and count extracted units
fn pump(segmenter: &Segmenter, text: &str, delta_chars: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut buffer = String::new();
    let mut units = 0;

    for chunk in chars.chunks(delta_chars) {
        buffer.extend(chunk);
        while let Some(extraction) = segmenter.segment(&buffer) {
            buffer.drain(..extraction.consumed);
            units += 1;
        }
    }

    units
}

fn benchmark_streamed_deltas(c: &mut Criterion) {
    let mut group = c.benchmark_group("streamed_deltas");
    let segmenter = Segmenter::new().unwrap();
    let text = generate_test_text(64);

    group.throughput(Throughput::Bytes(text.len() as u64));
    for delta_chars in [4, 16, 256] {
        group.bench_function(format!("64KB/{delta_chars}-char deltas"), |b| {
            b.iter(|| pump(&segmenter, black_box(&text), delta_chars));
        });
    }

    group.finish();
}

fn benchmark_undecided_buffer(c: &mut Criterion) {
    let segmenter = Segmenter::new().unwrap();
    // A long line with no complete unit forces every rule to scan it all
    let text = "word ".repeat(4096);

    c.bench_function("undecided_20KB", |b| {
        b.iter(|| segmenter.segment(black_box(&text)));
    });
}

criterion_group!(benches, benchmark_streamed_deltas, benchmark_undecided_buffer);
criterion_main!(benches);
