use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vig2p_core::SyllableCodec;

const SENTENCE: &str = "Tiếng Việt là ngôn ngữ của người Việt và là ngôn ngữ chính thức tại Việt Nam";

fn bench_is_syllable(c: &mut Criterion) {
    let codec = SyllableCodec::global();
    let mut group = c.benchmark_group("is_syllable");
    for token in ["a", "tiếng", "nghiêng", "hello"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), token, |b, t| {
            b.iter(|| codec.is_syllable(black_box(t)))
        });
    }
    group.finish();
}

fn bench_to_phonetic(c: &mut Criterion) {
    let codec = SyllableCodec::global();
    let paragraph = [SENTENCE; 20].join(" ");
    let mut group = c.benchmark_group("to_phonetic");
    group.bench_function("sentence", |b| b.iter(|| codec.to_phonetic(black_box(SENTENCE))));
    group.bench_function("paragraph", |b| {
        b.iter(|| codec.to_phonetic(black_box(&paragraph)))
    });
    group.finish();
}

fn bench_codec_build(c: &mut Criterion) {
    c.bench_function("codec_new", |b| b.iter(SyllableCodec::new));
}

criterion_group!(benches, bench_is_syllable, bench_to_phonetic, bench_codec_build);
criterion_main!(benches);
