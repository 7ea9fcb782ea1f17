use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_explorer::{render, Tree};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        let mut tree = Tree::new();
        b.iter(|| {
            for value in &values {
                tree.insert(*value);
            }
        })
    });

    let tree: Tree = values.iter().copied().collect();

    c.bench_function("tree_contains", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.contains(*value));
            }
        })
    });

    c.bench_function("tree_inorder", |b| {
        b.iter(|| tree.inorder(|visit| {
            black_box(visit);
        }))
    });

    c.bench_function("tree_remove", |b| {
        let mut tree = tree.clone();
        b.iter(|| {
            for value in &values {
                tree.remove(*value);
            }
        })
    });

    let small: Tree = (0..1_000).collect();
    c.bench_function("render_dot", |b| b.iter(|| black_box(render::dot(&small))));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
