use criterion::{criterion_group, criterion_main, Criterion};
use sortgtf::commands::{sortgtf_sort, SortOptions};
use sortgtf::io::FeatureFilter;
use sortgtf::prelude::*;
use sortgtf::test_utilities::{random_gtf_records, temp_gtffile, write_random_gtf};

const GTF_LENGTH: usize = 200_000;

fn bench_sort(c: &mut Criterion) {
    // create the benchmark group
    let mut group = c.benchmark_group("sort");

    // create the test data
    let records = GtfRecords::new(random_gtf_records(GTF_LENGTH));
    let input_gtffile = temp_gtffile();
    write_random_gtf(input_gtffile.path(), GTF_LENGTH).unwrap();
    let output_gtffile = temp_gtffile();

    // configure the sample size for the group
    group.sample_size(10);

    // in-memory sort only
    group.bench_function("in_memory", |b| {
        b.iter(|| records.clone().sort().unwrap().len());
    });

    // the full load, sort, write pipeline (exon records only)
    group.bench_function("pipeline", |b| {
        let input = input_gtffile.path().to_path_buf();
        let output = output_gtffile.path().to_path_buf();
        b.iter(|| {
            sortgtf_sort(&input, Some(&output), &SortOptions::default()).unwrap();
        });
    });

    // every feature type is loaded and sorted
    group.bench_function("pipeline_all_features", |b| {
        let input = input_gtffile.path().to_path_buf();
        let output = output_gtffile.path().to_path_buf();
        let options = SortOptions {
            features: FeatureFilter::All,
            ..Default::default()
        };
        b.iter(|| {
            sortgtf_sort(&input, Some(&output), &options).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
