use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use otsu_seg::{
    label_regions, GrayImage, ImageGeometry, PipelinedSegmenter, ProcessingMode, RegionParams,
    Segmenter,
};

fn bench_image() -> GrayImage {
    let geometry = ImageGeometry::REFERENCE;
    let mut x = 0x12345u32;
    let mut img = GrayImage::filled(geometry, 0).expect("image");
    for px in img.data_mut() {
        x = x.wrapping_mul(1664525).wrapping_add(1013904223);
        *px = (x >> 24) as u8;
    }
    // A couple of bright blobs so region labeling has work to do.
    for (cx, cy, r) in [(80i64, 80i64, 20i64), (180, 170, 30)] {
        for y in 0..geometry.height {
            for x in 0..geometry.width {
                let dx = x as i64 - cx;
                let dy = y as i64 - cy;
                if dx * dx + dy * dy <= r * r {
                    img.set_pixel(x, y, 235);
                }
            }
        }
    }
    img
}

fn bench_modes(c: &mut Criterion) {
    let img = bench_image();
    let view = img.view();
    let mut engine = PipelinedSegmenter::new(img.geometry());

    let mut group = c.benchmark_group("segment");
    for mode in [
        ProcessingMode::Fast,
        ProcessingMode::Normal,
        ProcessingMode::Careful,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| engine.segment(&view, mode).expect("segment"));
        });
    }
    group.finish();
}

fn bench_labeling(c: &mut Criterion) {
    let img = bench_image();
    let view = img.view();
    let mut engine = PipelinedSegmenter::new(img.geometry());
    let (mask, _) = engine
        .segment(&view, ProcessingMode::Careful)
        .expect("segment");

    c.bench_function("label_regions", |b| {
        b.iter(|| label_regions(&mask, &RegionParams::default()));
    });
}

criterion_group!(benches, bench_modes, bench_labeling);
criterion_main!(benches);
