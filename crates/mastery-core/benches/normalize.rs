use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mastery_core::classifier::{classify_columns, ScoreSuffix};
use mastery_core::loader::read_csv;
use mastery_core::normalize::{normalize, normalize_cell};

fn make_export(students: usize, questions: usize) -> String {
    let mut csv = String::from("Timestamp,Email Address,Total score");
    for q in 1..=questions {
        csv.push_str(&format!(",Q{q},Q{q} [Score]"));
    }
    csv.push('\n');

    for s in 0..students {
        csv.push_str(&format!("2024/03/01 9:00:00,student{s}@school.org,0 / {questions}"));
        for q in 0..questions {
            let score = if (s + q) % 3 == 0 { "0.00 / 1" } else { "1.00 / 1" };
            csv.push_str(&format!(",answer {q},{score}"));
        }
        csv.push('\n');
    }
    csv
}

fn bench_normalize_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_cell");

    group.bench_function("correct", |b| {
        b.iter(|| normalize_cell(black_box(Some("1.00 / 1"))))
    });

    group.bench_function("padded", |b| {
        b.iter(|| normalize_cell(black_box(Some("   0.50 / 1   "))))
    });

    group.bench_function("missing", |b| b.iter(|| normalize_cell(black_box(None))));

    group.finish();
}

fn bench_normalize_dataset(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_dataset");
    let suffix = ScoreSuffix::default();

    for &(students, questions) in &[(30, 10), (1000, 40)] {
        let export = make_export(students, questions);
        let raw = read_csv(export.as_bytes()).unwrap();
        let columns = classify_columns(raw.columns(), &suffix).unwrap();

        group.bench_function(format!("read_csv/{students}x{questions}"), |b| {
            b.iter(|| read_csv(black_box(export.as_bytes())))
        });

        group.bench_function(format!("normalize/{students}x{questions}"), |b| {
            b.iter(|| normalize(black_box(&raw), black_box(&columns)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_cell, bench_normalize_dataset);
criterion_main!(benches);
