use catclump::cluster::{
    assign, compute_centroids, CategoricalClustering, CategoricalDataset, CategoricalPmf,
    CentroidOutcome, ClusterState,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

fn synthetic(n: usize, n_cat: &[usize], rng: &mut StdRng) -> CategoricalDataset {
    let rows: Vec<Vec<usize>> = (0..n)
        .map(|_| n_cat.iter().map(|&c| rng.random_range(0..c)).collect())
        .collect();
    CategoricalDataset::from_multi_indexes(&rows, n_cat.to_vec()).unwrap()
}

fn bench_pmf(c: &mut Criterion) {
    let mut group = c.benchmark_group("pmf");

    let mut rng = StdRng::seed_from_u64(42);
    let n_cat = [4, 7, 3, 12, 5, 9, 2, 6];
    let k = 10;
    let data = synthetic(1000, &n_cat, &mut rng);

    group.bench_function("fit_predict_n1000_d8_k10", |b| {
        b.iter(|| {
            let model = CategoricalPmf::new(k).with_max_iter(10).with_seed(42);
            model.fit_predict(black_box(&data)).unwrap();
        })
    });

    let state = ClusterState::random(&data, k, &mut rng).unwrap();
    group.bench_function("centroids_n1000_d8_k10", |b| {
        b.iter(|| compute_centroids(black_box(state.stats())))
    });

    let centroids = match compute_centroids(state.stats()) {
        CentroidOutcome::Ready(m) => m,
        CentroidOutcome::Degenerate { .. } => unreachable!("random init fills every cluster"),
    };
    group.bench_function("assign_n1000_d8_k10", |b| {
        b.iter(|| {
            let mut s = state.clone();
            assign(&mut s, &data, black_box(&centroids)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pmf);
criterion_main!(benches);
