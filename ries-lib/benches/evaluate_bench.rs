use std::collections::BTreeMap;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ries::{
    CrossSection, GridLimits, Parity, PseudoVoigt, QuadOptions, State, Voigt, quad_partition,
};

fn states() -> (State, State) {
    let gs = State::ground("3/2-_1", 3, Parity::Negative);
    let excited = State::excited(
        "5/2-_1",
        5,
        Parity::Negative,
        4.444_98,
        BTreeMap::from([("3/2-_1".to_string(), 0.55e-6)]),
    )
    .unwrap();
    (gs, excited)
}

fn bench_line_shapes(c: &mut Criterion) {
    let (gs, excited) = states();
    let pseudo = PseudoVoigt::new(&gs, &excited, None, 11.009_305_166, 300.0).unwrap();
    let voigt = Voigt::new(&gs, &excited, None, 11.009_305_166, 300.0).unwrap();
    let energies: Vec<f64> = (0..1000).map(|i| 4.4449 + i as f64 * 1e-7).collect();

    c.bench_function("pseudo_voigt_evaluate_many", |b| {
        b.iter(|| black_box(pseudo.evaluate_many(black_box(&energies))));
    });

    c.bench_function("voigt_evaluate_many", |b| {
        b.iter(|| black_box(voigt.evaluate_many(black_box(&energies))));
    });
}

fn bench_probability_grid(c: &mut Criterion) {
    let (gs, excited) = states();
    let voigt = Voigt::new(&gs, &excited, None, 11.009_305_166, 300.0).unwrap();

    c.bench_function("voigt_probability_grid", |b| {
        b.iter(|| {
            black_box(
                voigt
                    .equidistant_probability_grid(black_box(GridLimits::Energies(4.0, 5.0)), 200)
                    .unwrap(),
            );
        });
    });

    let grid = voigt
        .equidistant_probability_grid(GridLimits::Energies(4.0, 5.0), 200)
        .unwrap();
    c.bench_function("voigt_quad_partition", |b| {
        b.iter(|| {
            black_box(
                quad_partition(|e| voigt.evaluate(e), black_box(&grid), &QuadOptions::default())
                    .unwrap(),
            );
        });
    });
}

criterion_group!(benches, bench_line_shapes, bench_probability_grid);
criterion_main!(benches);
