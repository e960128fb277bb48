use cachelayout::count::country_count;
use cachelayout::generator::{generate, GeneratorConfig};
use cachelayout::image::{HeapImage, InlineImage};
use cachelayout::user::User;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const NUM_USERS: usize = 10_000;

fn bench_country_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("country_count");
    group.throughput(Throughput::Elements(NUM_USERS as u64));

    let config = GeneratorConfig::new().with_size(NUM_USERS);

    let inline: Vec<User<InlineImage>> = generate(&config).unwrap();
    group.bench_function(BenchmarkId::new("InlineUser", NUM_USERS), |b| {
        b.iter(|| black_box(country_count(black_box(&inline))))
    });
    drop(inline);

    let heap: Vec<User<HeapImage>> = generate(&config).unwrap();
    group.bench_function(BenchmarkId::new("HeapUser (no icons)", NUM_USERS), |b| {
        b.iter(|| black_box(country_count(black_box(&heap))))
    });
    drop(heap);

    // icons allocated but never followed by the scan
    let heap_icons: Vec<User<HeapImage>> = generate(&config.clone().with_icons(true)).unwrap();
    group.bench_function(BenchmarkId::new("HeapUser (icons)", NUM_USERS), |b| {
        b.iter(|| black_box(country_count(black_box(&heap_icons))))
    });

    group.finish();
}

criterion_group!(benches, bench_country_count);
criterion_main!(benches);
