use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rillc::builtins::{self, Name, MOD_BASICS, MOD_SIGNAL};
use rillc::types::CanonicalType;
use rillc::{alias, loopback, wire};

// Checker throughput scenarios. All types are valid so every benchmark
// measures a full traversal rather than an early short-circuit.

fn int() -> CanonicalType {
    CanonicalType::Named(Name::new(MOD_BASICS, "Int"))
}

/// Nested pairs: ( Int, ( Int, ( ... ) ) ).
fn deep_tuple(depth: usize) -> CanonicalType {
    let mut ty = int();
    for _ in 0..depth {
        ty = CanonicalType::Applied(builtins::tuple(2), vec![int(), ty]);
    }
    ty
}

/// A flat record with `width` primitive fields.
fn wide_record(width: usize) -> CanonicalType {
    CanonicalType::Record(
        (0..width)
            .map(|i| rillc::types::RecordField {
                name: format!("field{i}"),
                ty: int(),
            })
            .collect(),
        None,
    )
}

/// `depth` nested alias layers around a record payload.
fn alias_chain(depth: usize, payload: CanonicalType) -> CanonicalType {
    let mut ty = payload;
    for i in 0..depth {
        ty = CanonicalType::Aliased(
            Name::new("App", format!("Layer{i}")),
            vec![],
            Box::new(ty),
        );
    }
    ty
}

fn bench_wire_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_check");

    for depth in [4usize, 16, 48] {
        let ty = deep_tuple(depth);
        group.bench_with_input(BenchmarkId::new("deep_tuple", depth), &ty, |b, ty| {
            b.iter(|| wire::check_input(black_box("p"), black_box(ty)))
        });
    }

    for width in [8usize, 64, 256] {
        let ty = wide_record(width);
        group.bench_with_input(BenchmarkId::new("wide_record", width), &ty, |b, ty| {
            b.iter(|| wire::check_output(black_box("p"), black_box(ty)))
        });
    }

    let signal = CanonicalType::Applied(Name::new(MOD_SIGNAL, "Stream"), vec![wide_record(32)]);
    group.bench_function("signal_wrapped_record", |b| {
        b.iter(|| wire::check_input(black_box("p"), black_box(&signal)))
    });

    group.finish();
}

fn bench_alias_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias");

    for depth in [4usize, 16, 48] {
        let ty = alias_chain(depth, wide_record(8));
        group.bench_with_input(BenchmarkId::new("deep_dealias", depth), &ty, |b, ty| {
            b.iter(|| alias::deep_dealias(black_box(ty)))
        });
        group.bench_with_input(BenchmarkId::new("checked_through", depth), &ty, |b, ty| {
            b.iter(|| wire::check_input(black_box("p"), black_box(ty)))
        });
    }

    group.finish();
}

fn bench_loopback(c: &mut Criterion) {
    let mailbox_shape = CanonicalType::record(vec![
        (
            "mailbox",
            CanonicalType::Applied(Name::new(MOD_SIGNAL, "Mailbox"), vec![wide_record(16)]),
        ),
        (
            "stream",
            CanonicalType::Applied(Name::new(MOD_SIGNAL, "Stream"), vec![wide_record(16)]),
        ),
    ]);

    c.bench_function("loopback_classify_mailbox", |b| {
        b.iter(|| loopback::classify(black_box("m"), None, black_box(&mailbox_shape)))
    });
}

criterion_group!(
    benches,
    bench_wire_check,
    bench_alias_expansion,
    bench_loopback
);
criterion_main!(benches);
