use criterion::{criterion_group, Criterion};

use glyph_dict_codec::optimizer::{init_dictionary, optimize};

use crate::benchmarks::get_font;

fn optimization_benchmark(c: &mut Criterion) {
    let mut datafile = get_font();
    init_dictionary(&mut datafile);

    let mut group = c.benchmark_group("optimizer benchmark");
    group.sample_size(10);
    group.bench_function("optimize 10 iterations", |b| {
        b.iter(|| {
            let mut trial = datafile.clone();
            optimize(&mut trial, 10);
            trial
        })
    });
}

criterion_group! {
    name = optimizer_benches;
    config = Criterion::default();
    targets = optimization_benchmark
}
