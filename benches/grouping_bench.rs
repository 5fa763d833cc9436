use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huji_core::{group_households, RawRow};
use huji_sheet::CellValue;

fn make_rows(size: usize) -> Vec<RawRow> {
    (0..size)
        .map(|i| {
            let mut row = RawRow::new();
            row.insert("户号".to_string(), CellValue::from(format!("{:05}", (i * 7919) % (size / 3 + 1))));
            row.insert("地址".to_string(), CellValue::from(format!("幸福路{}号", i % 97)));
            row.insert("姓名".to_string(), CellValue::from(format!("成员{i}")));
            row.insert("性别".to_string(), CellValue::from(if i % 2 == 0 { "男" } else { "女" }));
            row.insert("出生日期".to_string(), CellValue::Float(30000.0 + i as f64));
            row
        })
        .collect()
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_households");

    for size in [100, 1_000, 10_000] {
        let rows = make_rows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| group_households(black_box(rows)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grouping);
criterion_main!(benches);
