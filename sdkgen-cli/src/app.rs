use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bnm-sdkgen - ByNameModding C++ headers from IL2CPP module dumps
#[derive(Debug, Parser)]
#[command(name = "bnm-sdkgen", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate headers for every type of the given module dumps.
    Generate {
        /// Module dump file, or a directory containing .json dumps.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory; headers are written below <DIR>/include.
        #[arg(short, long, value_name = "DIR", default_value = "sdk")]
        output: PathBuf,

        /// JSON type map layered on top of the built-in table.
        #[arg(long, value_name = "FILE")]
        type_map: Option<PathBuf>,

        /// Handling of types whose C++ names collide: preserve or suffix.
        #[arg(long, default_value = "preserve")]
        collisions: String,

        /// Also emit <Module> and <PrivateImplementationDetails> types.
        #[arg(long)]
        keep_compiler_generated: bool,

        /// Remove the output directory before writing.
        #[arg(long)]
        clean: bool,

        /// Abort on the first module dump that fails to load.
        #[arg(long)]
        strict: bool,
    },

    /// List the types of the given module dumps and where they are emitted.
    Types {
        /// Module dump file, or a directory containing .json dumps.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Filter by namespace.
        #[arg(long)]
        namespace: Option<String>,

        /// Handling of types whose C++ names collide: preserve or suffix.
        #[arg(long, default_value = "preserve")]
        collisions: String,
    },
}
