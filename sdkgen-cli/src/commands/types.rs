use std::path::Path;

use bnm_sdkgen::{codegen::Generator, config::GeneratorConfig};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_project, parse_collisions},
    output::{print_output, Align, Columns},
};

#[derive(Debug, Serialize)]
struct TypeEntry {
    module: String,
    kind: String,
    name: String,
    symbol: String,
    unit: String,
}

#[derive(Debug, Serialize)]
struct TypesOutput {
    types: Vec<TypeEntry>,
    count: usize,
}

pub fn run(
    input: &Path,
    namespace: Option<&str>,
    collisions: &str,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let result = load_project(input, false)?;
    let config = GeneratorConfig::default().with_collisions(parse_collisions(collisions)?);
    let generator = Generator::new(result.project.registry(), &config);
    let mapper = generator.mapper();

    let mut entries = Vec::new();
    for entry in result.project.registry().iter() {
        if let Some(ns) = namespace {
            if entry.namespace() != ns {
                continue;
            }
        }

        let unit = if config.skips(&entry.descriptor) {
            "(filtered)".to_string()
        } else if generator.symbols().is_suppressed(&entry.identity) {
            "(collision)".to_string()
        } else {
            mapper.unit_path(entry)
        };

        entries.push(TypeEntry {
            module: entry.module.to_string(),
            kind: entry.descriptor.kind.to_string(),
            name: entry.identity.clone(),
            symbol: mapper.cpp_path(entry),
            unit,
        });
    }

    let count = entries.len();
    let output = TypesOutput {
        types: entries,
        count,
    };

    print_output(&output, opts, |out| {
        let mut table = Columns::new(&[
            ("Module", Align::Left),
            ("Kind", Align::Left),
            ("Name", Align::Left),
            ("C++", Align::Left),
            ("Unit", Align::Left),
        ]);
        for e in &out.types {
            table.row(vec![
                e.module.clone(),
                e.kind.clone(),
                e.name.clone(),
                e.symbol.clone(),
                e.unit.clone(),
            ]);
        }
        table.print();
        println!("\n{} type(s) listed.", out.count);
    })
}
