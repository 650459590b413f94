use std::path::Path;

use anyhow::Context;
use bnm_sdkgen::{codegen::Generator, config::GeneratorConfig, output::OutputWriter};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_failures, load_project, parse_collisions, LoadFailure},
    output::{print_output, Align, Columns},
};

pub struct GenerateOptions<'a> {
    pub output: &'a Path,
    pub type_map: Option<&'a Path>,
    pub collisions: &'a str,
    pub keep_compiler_generated: bool,
    pub clean: bool,
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ModuleSummary {
    name: String,
    units: usize,
    skipped: usize,
    written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateOutput {
    output: String,
    modules: Vec<ModuleSummary>,
    namespaces: usize,
    files_written: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    load_failures: Vec<LoadFailure>,
}

pub fn run(
    input: &Path,
    options: &GenerateOptions<'_>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::default()
        .with_collisions(parse_collisions(options.collisions)?)
        .keep_compiler_generated(options.keep_compiler_generated);
    if let Some(type_map) = options.type_map {
        config
            .type_map
            .merge_file(type_map)
            .with_context(|| format!("failed to read type map: {}", type_map.display()))?;
    }

    let result = load_project(input, options.strict)?;
    let generator = Generator::new(result.project.registry(), &config);
    let sdk = generator.generate();

    let writer = OutputWriter::new(options.output);
    if options.clean {
        writer.clean()?;
    }
    let report = writer.write_sdk(&sdk);

    let modules = sdk
        .modules
        .iter()
        .map(|module| {
            let error = report
                .failed
                .iter()
                .find(|(name, _)| *name == module.name)
                .map(|(_, error)| error.to_string());
            ModuleSummary {
                name: module.name.to_string(),
                units: module.units.len(),
                skipped: module.failures.len(),
                written: error.is_none(),
                error,
            }
        })
        .collect();

    let summary = GenerateOutput {
        output: writer.include_dir().display().to_string(),
        modules,
        namespaces: sdk.indices.len(),
        files_written: report.written,
        load_failures: load_failures(&result),
    };

    print_output(&summary, opts, |summary| {
        let mut table = Columns::new(&[
            ("Module", Align::Left),
            ("Units", Align::Right),
            ("Skipped", Align::Right),
            ("Status", Align::Left),
        ]);
        for module in &summary.modules {
            table.row(vec![
                module.name.clone(),
                module.units.to_string(),
                module.skipped.to_string(),
                module
                    .error
                    .clone()
                    .unwrap_or_else(|| "written".to_string()),
            ]);
        }
        table.print();

        for failure in &summary.load_failures {
            println!("{}: failed to load: {}", failure.file, failure.error);
        }
        println!(
            "\n{} file(s) for {} namespace(s) written to {}",
            summary.files_written, summary.namespaces, summary.output
        );
    })
}
