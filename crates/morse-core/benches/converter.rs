use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use morse_core::converter::convert;
use morse_core::settings::Settings;

const PANGRAM: &str = "The quick brown fox jumps over the lazy dog 0123456789";

fn bench_convert(c: &mut Criterion) {
    let settings = Settings::default();
    let mut group = c.benchmark_group("convert");
    for repeat in [1usize, 16, 256] {
        let input = vec![PANGRAM; repeat].join("\n");
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &input, |b, input| {
            b.iter(|| convert(input, &settings))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
