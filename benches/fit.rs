use criterion::Criterion;
use rand::prelude::*;
use std::hint::black_box;
use vida::{
    Bhattacharyya, CobylaMinimizer, FitOptions, GaussDisk, Grid, IntensityMap, Minimizer, Params,
    Template, VidaProblem,
};

fn disk_family(p: &Params) -> Template {
    let value = |key: &str| p[key].as_scalar().unwrap_or(f64::NAN);
    GaussDisk::modified(value("r0"), value("sigma"), value("x0"), value("y0"))
}

pub fn bench_fit(c: &mut Criterion) {
    let image = IntensityMap::render(
        &GaussDisk::modified(1.5, 0.2, 0.3, -0.1),
        Grid::square(48, 3.0),
    );
    let problem = VidaProblem::new(
        Bhattacharyya::new(&image).unwrap(),
        disk_family,
        Params::record([("r0", 0.5), ("sigma", 0.05), ("x0", -1.0), ("y0", -1.0)]),
        Params::record([("r0", 2.5), ("sigma", 0.5), ("x0", 1.0), ("y0", 1.0)]),
    )
    .unwrap();

    let minimizers: Vec<(_, Minimizer)> = vec![
        (
            "GaussDisk fit: COBYLA 1000 iterations",
            CobylaMinimizer::new(1000, 0.1, 1e-6, None).into(),
        ),
        (
            "GaussDisk fit: MCMC 16 iterations + COBYLA",
            vida::McmcMinimizer::new(16, 0, Some(CobylaMinimizer::default().into())).into(),
        ),
    ];

    for (name, minimizer) in minimizers {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(0);
                problem
                    .fit(black_box(&minimizer), &mut rng, &FitOptions::default())
                    .unwrap()
            });
        });
    }
}
