//! Criterion benchmarks for the flatconf store.
//!
//! Measures line classification, entry splitting, full-file loads at
//! several sizes, and getter lookups against a populated store.
//!
//! Run with:
//! ```bash
//! cargo bench --package flatconf-core --bench store_bench
//! ```

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flatconf_core::{is_entry_line, parse::split_entry, ConfigStore};
use uuid::Uuid;

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Writes a generated config with `entries` lines to a unique temp dir.
fn write_config(entries: usize) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flatconf_bench_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create bench dir");
    let path = dir.join("bench.conf");

    let mut contents = String::from("# generated benchmark fixture\n");
    for i in 0..entries {
        contents.push_str(&format!("section{}.key{i}=value-{i}\n", i % 16));
    }
    std::fs::write(&path, contents).expect("write bench fixture");
    path
}

fn remove_config(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).ok();
    }
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_line_classification(c: &mut Criterion) {
    let lines = [
        "# a comment line",
        "",
        "mysql.host=localhost",
        "welcome.message=a=b=c",
        "no delimiter here",
    ];

    c.bench_function("is_entry_line/mixed", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(is_entry_line(black_box(line)));
            }
        })
    });

    c.bench_function("split_entry/multi_equals", |b| {
        b.iter(|| black_box(split_entry(black_box("welcome.message=a=b=c"))))
    });
}

fn bench_reload(c: &mut Criterion) {
    let mut group = c.benchmark_group("reload");
    for entries in [100usize, 1_000, 10_000] {
        let path = write_config(entries);
        let mut store = ConfigStore::new(&path);

        group.bench_with_input(BenchmarkId::from_parameter(entries), &entries, |b, _| {
            b.iter(|| store.reload().expect("reload must succeed"))
        });

        remove_config(&path);
    }
    group.finish();
}

fn bench_getters(c: &mut Criterion) {
    let path = write_config(1_000);
    let store = ConfigStore::load(&path).expect("load bench fixture");

    c.bench_function("get_str/hit", |b| {
        b.iter(|| black_box(store.get_str(black_box("section0.key0"), "default")))
    });

    c.bench_function("get_str/miss", |b| {
        b.iter(|| black_box(store.get_str(black_box("absent.key"), "default")))
    });

    c.bench_function("contains/mixed_case", |b| {
        b.iter(|| black_box(store.contains(black_box("SECTION0.KEY0"))))
    });

    remove_config(&path);
}

criterion_group!(
    benches,
    bench_line_classification,
    bench_reload,
    bench_getters
);
criterion_main!(benches);
