use ansvg_escape::Decoder;
use criterion::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

fn colored_listing(lines: usize) -> String {
    let mut out = String::new();
    for i in 0..lines {
        out.push_str(&format!(
            "\x1b[1;3{}m{i:>6}\x1b[0m\t\x1b[38;5;{}mentry-{i}\x1b[39m \
             \x1b[48;2;10;20;{}mpayload\x1b[m\r\n",
            i % 8,
            i % 256,
            i % 256,
        ));
    }
    out
}

fn bench_decode(c: &mut Criterion) {
    let input = colored_listing(2_000);
    let mut group = c.benchmark_group("decoder");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("colored_listing", |b| {
        b.iter(|| {
            let decoder = Decoder::new(black_box(input.as_bytes()));
            let count = decoder.filter_map(Result::ok).count();
            black_box(count);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
