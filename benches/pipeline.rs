use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cpq::{codegen, lexer, parser};

const WORKLOADS: [(&str, &str); 2] = [
    ("minmax", include_str!("../tests/programs/minmax.ou")),
    ("average", include_str!("../tests/programs/average.ou")),
];

fn bench_pipeline(c: &mut Criterion) {
    for (label, source) in WORKLOADS {
        let (program, _) = parser::parse(source);
        let (quad, _) = codegen::generate(&program);

        c.bench_function(&format!("tokenize_{label}"), |b| {
            b.iter(|| black_box(lexer::tokenize(black_box(source))));
        });

        c.bench_function(&format!("parse_{label}"), |b| {
            b.iter(|| black_box(parser::parse(black_box(source))));
        });

        c.bench_function(&format!("generate_{label}"), |b| {
            b.iter(|| black_box(codegen::generate(black_box(&program))));
        });

        c.bench_function(&format!("finalize_{label}"), |b| {
            b.iter(|| black_box(codegen::finalize(black_box(&quad))));
        });

        c.bench_function(&format!("compile_{label}"), |b| {
            b.iter(|| black_box(cpq::compile(black_box(source))));
        });
    }
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
