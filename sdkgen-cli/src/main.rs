mod app;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // Show bnm_sdkgen info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("bnm_sdkgen", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Generate {
            input,
            output,
            type_map,
            collisions,
            keep_compiler_generated,
            clean,
            strict,
        } => commands::generate::run(
            input,
            &commands::generate::GenerateOptions {
                output,
                type_map: type_map.as_deref(),
                collisions,
                keep_compiler_generated: *keep_compiler_generated,
                clean: *clean,
                strict: *strict,
            },
            &cli.global,
        ),
        Command::Types {
            input,
            namespace,
            collisions,
        } => commands::types::run(input, namespace.as_deref(), collisions, &cli.global),
    }
}
