use criterion::{criterion_group, Criterion};

use glyph_dict_codec::codec::encoder::encode_font;
use glyph_dict_codec::optimizer::init_dictionary;

use crate::benchmarks::get_font;

fn encoding_benchmark(c: &mut Criterion) {
    let mut datafile = get_font();
    init_dictionary(&mut datafile);

    let mut group = c.benchmark_group("codec benchmark");
    group.bench_function("encode_font", |b| {
        b.iter(|| encode_font(&datafile).encoded_size())
    });
}

criterion_group! {
    name = encoder_benches;
    config = Criterion::default();
    targets = encoding_benchmark
}
