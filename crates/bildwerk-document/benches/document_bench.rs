// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the bildwerk-document crate: page placement and a
// full commit of small synthetic images.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use bildwerk_core::PageSize;
use bildwerk_document::{
    CommitPipeline, ImageDimensions, ImageProcessor, PageLayoutEngine, PdfAssembler,
    RasterDecoder, StagedFile,
};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Placement of a spread of aspect ratios on an A4 page.
fn bench_placement(c: &mut Criterion) {
    let engine = PageLayoutEngine::new(PageSize::a4());
    let sizes: Vec<ImageDimensions> = (1..=64u32)
        .map(|i| ImageDimensions::from((i * 37, (65 - i) * 23)))
        .collect();

    c.bench_function("placement (64 images, A4)", |b| {
        b.iter(|| {
            for dims in &sizes {
                black_box(engine.place(black_box(*dims)).ok());
            }
        });
    });
}

/// Decode, place, append, and seal eight 64x48 PNGs.
fn bench_commit(c: &mut Criterion) {
    let files: Vec<StagedFile> = (0..8u8)
        .map(|i| {
            let img = RgbImage::from_pixel(64, 48, Rgb([i * 30, 100, 200]));
            let png = ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(img))
                .to_png_bytes()
                .expect("encode fixture");
            StagedFile::new(format!("{i}.png"), png)
        })
        .collect();

    c.bench_function("commit (8 x 64x48 PNG)", |b| {
        b.iter(|| {
            let assembler = PdfAssembler::new(PageSize::a4());
            let result = CommitPipeline::new(RasterDecoder).assemble(black_box(&files), assembler);
            black_box(result.ok());
        });
    });
}

criterion_group!(benches, bench_placement, bench_commit);
criterion_main!(benches);
