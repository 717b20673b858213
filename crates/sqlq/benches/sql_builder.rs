use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlq::prelude::*;

/// Build a SELECT with `n` columns and `n` bound conditions:
/// SELECT "t"."col0", ... FROM "t" WHERE ("t"."col0" = ?)AND(...)
fn build_select(n: usize) -> Select {
    let table = t("t");
    let mut q = select().from(&table);
    for i in 0..n {
        q = q.column(table.c(format!("col{i}")));
    }
    for i in 0..n {
        q = q.where_(eq(table.c(format!("col{i}")), i as i64));
    }
    q
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let q = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(q.to_sql_with(Dialect::PostgreSql)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let q = build_select(n);
                black_box(q.to_sql_with(Dialect::MySql))
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let table = t("t");
                let q = select()
                    .from(&table)
                    .where_(in_(table.c("id"), values.clone()));
                black_box(q.to_sql_with(Dialect::PostgreSql))
            });
        });
    }

    group.finish();
}

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/joins");

    for n in [1, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let root = t("t0");
                for i in 1..=n {
                    let other = t(format!("t{i}"));
                    root.left_join(&other, [eq(root.c("id"), other.c("parent_id"))]);
                }
                black_box(select().from(&root).to_sql_with(Dialect::Sqlite))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_build_and_render,
    bench_in_list,
    bench_joins
);
criterion_main!(benches);
