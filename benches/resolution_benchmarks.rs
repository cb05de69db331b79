//! Performance benchmarks for conversion classification and overload resolution.
//!
//! - `conversion/*`: lattice sweeps and reference-hierarchy lookups
//! - `overload/*`: numeric overload sets of growing size and generic inference
//!
//! Build with the `profiling` feature to emit scopes for the resolver entry
//! points:
//!
//! ```bash
//! cargo bench --features profiling -- overload
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sable::prelude::*;
use std::hint::black_box;

/// `Shape <- Circle <- Ring`, each level adding an interface.
fn hierarchy(registry: &mut TypeRegistry) -> (TypeHash, TypeHash) {
    let mut interfaces = Vec::new();
    for name in ["IA", "IB", "IC"] {
        interfaces.push(registry.register_type(InterfaceEntry::new(name)).unwrap());
    }
    let shape = registry
        .register_type(ClassEntry::reference("Shape").with_interface(interfaces[0]))
        .unwrap();
    let circle = registry
        .register_type(
            ClassEntry::reference("Circle")
                .with_base(shape)
                .with_interface(interfaces[1]),
        )
        .unwrap();
    let ring = registry
        .register_type(
            ClassEntry::reference("Ring")
                .with_base(circle)
                .with_interface(interfaces[2]),
        )
        .unwrap();
    (ring, interfaces[0])
}

fn bench_conversions(c: &mut Criterion) {
    let mut registry = TypeRegistry::with_platform_types();
    let (ring, root_interface) = hierarchy(&mut registry);

    let mut group = c.benchmark_group("conversion");

    group.throughput(Throughput::Elements((PrimitiveKind::NUMERIC.len().pow(2)) as u64));
    group.bench_function("numeric_lattice_sweep", |b| {
        b.iter(|| {
            let ctx = CompilationContext::new(&registry);
            for from in PrimitiveKind::NUMERIC {
                for to in PrimitiveKind::NUMERIC {
                    black_box(type_exists(
                        &ctx,
                        from.type_hash(),
                        to.type_hash(),
                        ConversionMode::Implicit,
                    ));
                }
            }
        });
    });

    group.bench_function("constant_narrowing", |b| {
        let ctx = CompilationContext::new(&registry);
        b.iter(|| {
            convert(
                &ctx,
                black_box(Expr::int_literal(200)),
                primitives::UINT8,
                ConversionMode::Implicit,
            )
        });
    });

    group.bench_function("derived_to_inherited_interface", |b| {
        let ctx = CompilationContext::new(&registry);
        b.iter(|| type_exists(&ctx, black_box(ring), root_interface, ConversionMode::Implicit));
    });

    group.bench_function("boxing", |b| {
        let ctx = CompilationContext::new(&registry);
        b.iter(|| {
            find_conversion(
                &ctx,
                black_box(&Expr::value(primitives::DOUBLE)),
                well_known::OBJECT,
                ConversionMode::Implicit,
            )
        });
    });

    group.finish();
}

fn bench_overloads(c: &mut Criterion) {
    let mut registry = TypeRegistry::with_platform_types();
    let numeric: Vec<TypeHash> = PrimitiveKind::NUMERIC
        .iter()
        .map(|kind| {
            registry
                .register_function(FunctionDef::new(
                    "Write",
                    vec![Param::new("value", kind.type_hash())],
                    primitives::VOID,
                ))
                .unwrap()
        })
        .collect();

    let owner = TypeHash::from_name("First");
    let t = registry
        .register_type(TypeParamEntry::for_owner("T", 0, owner, "First"))
        .unwrap();
    let ts = registry.array_of(t, 1);
    let first = registry
        .register_function(
            FunctionDef::new("First", vec![Param::new("items", ts)], t).with_generic_param(t),
        )
        .unwrap();
    let doubles = registry.array_of(primitives::DOUBLE, 1);

    let mut group = c.benchmark_group("overload");

    for size in [2, 6, numeric.len()] {
        let candidates = &numeric[..size];
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("numeric_set_{size}"), |b| {
            let ctx = CompilationContext::new(&registry);
            let args = [Argument::new(Expr::int_literal(5))];
            b.iter(|| resolve_overload(&ctx, black_box(candidates), &args));
        });
    }

    group.bench_function("numeric_set_count_only", |b| {
        let ctx = CompilationContext::new(&registry);
        let args = [Argument::new(Expr::value(primitives::INT16))];
        b.iter(|| {
            resolve_overload_with(&ctx, black_box(&numeric), &args, ResolveMode::ArgumentCountOnly)
        });
    });

    group.bench_function("generic_inference", |b| {
        let ctx = CompilationContext::new(&registry);
        let args = [Argument::new(Expr::value(doubles))];
        b.iter(|| resolve_overload(&ctx, black_box(&[first]), &args));
    });

    group.finish();
}

criterion_group!(benches, bench_conversions, bench_overloads);
criterion_main!(benches);
