use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use objscene::{EmissionOptions, MaterialBlock, MeshModel, SceneConverter, ShadingVariant};
use std::io;

static TRIANGLE_COUNTS: [usize; 3] = [100, 1_000, 10_000];

fn build_model(triangles: usize) -> MeshModel {
    let mut model = MeshModel::new();
    for (i, name) in ["Red", "Green", "Blue", "Glass"].iter().enumerate() {
        let vertices = (0..triangles * 9)
            .map(|v| (v + i) as f32 * 0.125)
            .collect();
        model.add_material(MaterialBlock::new(name, vertices));
    }
    model
}

pub fn emit_benchmark(c: &mut Criterion) {
    let legacy = EmissionOptions {
        variant: ShadingVariant::Legacy,
        ..EmissionOptions::default()
    };
    let current = EmissionOptions {
        reflectiveness: Some(0.5),
        ..EmissionOptions::default()
    };

    let mut group = c.benchmark_group("Emit scene");
    for &triangles in &TRIANGLE_COUNTS {
        let model = build_model(triangles);

        group.bench_with_input(
            BenchmarkId::new("Legacy", triangles),
            &model,
            |b, model| {
                let converter = SceneConverter::new(model, &legacy);
                b.iter(|| converter.write_scene(&mut io::sink()).unwrap())
            },
        );
        group.bench_with_input(
            BenchmarkId::new("Current", triangles),
            &model,
            |b, model| {
                let converter = SceneConverter::new(model, &current);
                b.iter(|| converter.write_scene(&mut io::sink()).unwrap())
            },
        );
    }
    group.finish();
}

criterion_group!(benches, emit_benchmark);
criterion_main!(benches);
