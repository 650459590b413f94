//! Benchmarks for header generation.
//!
//! Builds a synthetic module with a few hundred interlinked types and measures:
//! - Registry construction from a module dump
//! - Rendering a single unit
//! - Rendering every unit of the module

extern crate bnm_sdkgen;

use std::{hint::black_box, sync::Arc};

use bnm_sdkgen::{
    codegen::Generator,
    config::GeneratorConfig,
    metadata::{
        FieldAttributes, FieldDescriptor, MethodAttributes, MethodDescriptor, ModuleDump,
        ParamDescriptor, TypeDescriptor, TypeKind, TypeReference, TypeRegistry,
    },
};
use criterion::{criterion_group, criterion_main, Criterion};

const TYPE_COUNT: usize = 400;

fn field(name: &str, field_type: TypeReference, flags: FieldAttributes) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        field_type,
        flags,
        constant: None,
    }
}

/// Every type references its neighbours, so units carry both includes and forward
/// declarations.
fn synthetic_module() -> ModuleDump {
    let mut types = Vec::with_capacity(TYPE_COUNT);
    for index in 0..TYPE_COUNT {
        let namespace = format!("Game.Area{}", index % 8);
        let mut descriptor =
            TypeDescriptor::new(namespace, format!("Type{index}"), TypeKind::Class);

        if index > 0 {
            let previous = index - 1;
            descriptor.base = Some(TypeReference::named(format!(
                "Game.Area{}.Type{previous}",
                previous % 8
            )));
        }

        let next = (index + 1) % TYPE_COUNT;
        let next = TypeReference::named(format!("Game.Area{}.Type{next}", next % 8));
        descriptor
            .fields
            .push(field("next", next.clone(), FieldAttributes::empty()));
        descriptor.fields.push(field(
            "values",
            TypeReference::named("System.Int32").array(),
            FieldAttributes::empty(),
        ));
        descriptor.fields.push(field(
            "Instances",
            TypeReference::named("System.Int32"),
            FieldAttributes::STATIC,
        ));
        descriptor.methods.push(MethodDescriptor {
            name: "Link".to_string(),
            return_type: TypeReference::named("System.Boolean"),
            params: vec![ParamDescriptor {
                name: "other".to_string(),
                param_type: next,
            }],
            generic_params: Vec::new(),
            flags: MethodAttributes::HIDE_BY_SIG,
        });

        types.push(Arc::new(descriptor));
    }

    ModuleDump {
        name: "Assembly-CSharp".to_string(),
        types,
    }
}

fn bench_registry_build(c: &mut Criterion) {
    let dump = synthetic_module();

    c.bench_function("registry_build", |b| {
        b.iter(|| {
            let mut registry = TypeRegistry::new();
            registry.register_module(black_box(&dump));
            black_box(registry)
        });
    });
}

fn bench_generate_type(c: &mut Criterion) {
    let mut registry = TypeRegistry::new();
    registry.register_module(&synthetic_module());
    let config = GeneratorConfig::default();
    let generator = Generator::new(&registry, &config);

    c.bench_function("generate_type", |b| {
        b.iter(|| {
            let unit = generator.generate_type(black_box("Game.Area0.Type200")).unwrap();
            black_box(unit)
        });
    });
}

fn bench_generate_module(c: &mut Criterion) {
    let mut registry = TypeRegistry::new();
    registry.register_module(&synthetic_module());
    let config = GeneratorConfig::default();

    c.bench_function("generate_module", |b| {
        b.iter(|| {
            let generator = Generator::new(&registry, &config);
            black_box(generator.generate())
        });
    });
}

criterion_group!(
    benches,
    bench_registry_build,
    bench_generate_type,
    bench_generate_module
);
criterion_main!(benches);
