//! Benchmarks for raster primitives and grid mapping.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixel_framebuf::{Draw, GridLayout, LayoutFlags, Orientation, PixelBuffer, Rgb};

fn draw_primitives(c: &mut Criterion) {
    let mut buffer = PixelBuffer::new(32, 32);

    c.bench_function("line_32x32_diagonal", |b| {
        b.iter(|| buffer.line(0, 0, black_box(31), black_box(31), Rgb::RED))
    });

    c.bench_function("circle_32x32_r15", |b| {
        b.iter(|| buffer.circle(16, 16, black_box(15), Rgb::GREEN))
    });

    c.bench_function("fill_rect_32x32", |b| {
        b.iter(|| buffer.fill_rect(0, 0, black_box(32), black_box(32), Rgb::BLUE))
    });
}

fn rotated_fill(c: &mut Criterion) {
    let mut buffer = PixelBuffer::new(32, 8);
    buffer.set_rotation(1).unwrap();

    c.bench_function("fill_rect_32x8_rotated", |b| {
        b.iter(|| buffer.fill_rect(0, 0, 8, 32, black_box(Rgb::WHITE)))
    });
}

fn strip_mapping(c: &mut Criterion) {
    let layout = GridLayout::new()
        .with_orientation(Orientation::Vertical)
        .with_flags(LayoutFlags::ALTERNATING | LayoutFlags::REVERSE_X);

    c.bench_function("strip_index_32x8_all", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for y in 0..8 {
                for x in 0..32 {
                    acc ^= layout.strip_index(black_box(x), black_box(y), 32, 8);
                }
            }
            acc
        })
    });
}

criterion_group!(benches, draw_primitives, rotated_fill, strip_mapping);
criterion_main!(benches);
