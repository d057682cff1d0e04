use criterion::Criterion;
use rand::prelude::*;
use std::hint::black_box;
use vida::{
    Constant, GaussDisk, GaussianRing, Grid, IntensityMap, LogSpiral, Template, TemplateTrait,
};

fn templates() -> Vec<(&'static str, Template)> {
    vec![
        ("Constant", Constant::new(2.0).into()),
        ("GaussDisk", GaussDisk::modified(1.5, 0.2, 0.1, -0.3)),
        ("GaussianRing", GaussianRing::modified(1.5, 0.2, 0.1, -0.3)),
        (
            "LogSpiral",
            LogSpiral::modified(1.0, 0.3, 0.05, 3.0, 0.5, 0.1, -0.3),
        ),
    ]
}

pub fn bench_intensity(c: &mut Criterion) {
    const N: usize = 1000;

    let mut rng = StdRng::seed_from_u64(0);
    let points: Vec<(f64, f64)> = (0..N)
        .map(|_| (rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)))
        .collect();

    for (name, template) in templates() {
        c.bench_function(&format!("{name} intensity at {N} points"), |b| {
            b.iter(|| {
                points
                    .iter()
                    .map(|&(x, y)| template.intensity_point(black_box(x), black_box(y)))
                    .sum::<f64>()
            });
        });
    }
}

pub fn bench_render(c: &mut Criterion) {
    let grid = Grid::square(128, 3.0);
    for (name, template) in templates() {
        c.bench_function(&format!("{name} render 128x128"), |b| {
            b.iter(|| IntensityMap::render(black_box(&template), grid.clone()));
        });
    }
}
