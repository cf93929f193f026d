use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f64::consts::PI;
use std::hint::black_box;
use std::path::PathBuf;
use nematic_view::frame::FrameBuilder;
use nematic_view::import::{SiteBatch, SiteRecord};
use nematic_view::interfaces::Schema;
use nematic_view::lattice::LatticeDims;
use nematic_view::sampling::{coarsen, slice, Plane};
use nematic_view::tensor::{contract, Operand, TensorField};
use nalgebra::Vector3;

/// Cholesteric helix along z with a cylindrical inclusion, `l` sites per edge
fn synthetic_batch(l: usize) -> SiteBatch {
    let dims = LatticeDims::new(l, l, l).unwrap();
    let center = dims.center();
    let records = (0..dims.volume())
        .map(|index| {
            let [x, y, z] = dims.coords(index);
            let angle = 2.0 * PI * z as f64 / l as f64;
            let (nx, ny) = (angle.cos(), angle.sin());
            let s = 0.5;
            let r = ((x as f64 - center.x).powi(2) + (y as f64 - center.y).powi(2)).sqrt();
            SiteRecord {
                coords: [x, y, z],
                q5: [s * (nx * nx - 1.0 / 3.0), s * nx * ny, 0.0, s * (ny * ny - 1.0 / 3.0), 0.0],
                site_type: if r < l as f64 / 6.0 { 1 } else { 0 },
                order: s,
            }
        })
        .collect();
    SiteBatch {
        dims,
        records,
        schema: Schema::Canonical,
        source: PathBuf::from("bench_0.dat"),
        timestamp: Some(0),
    }
}

fn bench_frame_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_builder");
    group.sample_size(20);
    let builder = FrameBuilder::default();

    for l in [8usize, 16, 24] {
        let batch = synthetic_batch(l);
        group.bench_with_input(BenchmarkId::new("build", l), &batch, |b, batch| {
            b.iter(|| builder.build(black_box(batch)).unwrap());
        });
    }
    group.finish();
}

fn bench_contraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("contraction");
    let sites = 16 * 16 * 16;
    let dq = TensorField::from_raw(3, (0..sites * 27).map(|i| (i % 7) as f64 * 0.1).collect()).unwrap();
    let q = TensorField::from_raw(2, (0..sites * 9).map(|i| (i % 5) as f64 * 0.1).collect()).unwrap();

    for expr in ["ijk,ijk", "iik,jjk", "ijk,kij"] {
        group.bench_function(expr, |b| {
            b.iter(|| contract(black_box(expr), &[Operand::Field(&dq), Operand::Field(&dq)]).unwrap());
        });
    }
    group.bench_function("ij,ikl,jkl", |b| {
        b.iter(|| {
            contract(
                black_box("ij,ikl,jkl"),
                &[Operand::Field(&q), Operand::Field(&dq), Operand::Field(&dq)],
            )
            .unwrap()
        });
    });
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let frame = FrameBuilder::default().build(&synthetic_batch(16)).unwrap();

    group.bench_function("coarsen_stride_2", |b| {
        b.iter(|| coarsen(black_box(&frame), 2).unwrap());
    });

    let plane = Plane::new(Vector3::new(1.0, 1.0, 0.0), frame.dims().center()).unwrap();
    group.bench_function("slice_oblique", |b| {
        b.iter(|| slice(black_box(&frame), black_box(&plane), 2).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_frame_builder, bench_contraction, bench_sampling);
criterion_main!(benches);
