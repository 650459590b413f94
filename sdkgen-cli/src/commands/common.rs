use std::{path::Path, str::FromStr};

use anyhow::{anyhow, Context};
use bnm_sdkgen::{
    config::CollisionPolicy,
    project::{ProjectLoader, ProjectResult},
};
use serde::Serialize;

/// A dump file that could not be loaded.
#[derive(Debug, Serialize)]
pub struct LoadFailure {
    pub file: String,
    pub error: String,
}

/// Load every module dump found at `input`.
pub fn load_project(input: &Path, strict: bool) -> anyhow::Result<ProjectResult> {
    ProjectLoader::new()
        .input(input)
        .and_then(|loader| loader.strict_mode(strict).build())
        .with_context(|| format!("failed to load module dumps: {}", input.display()))
}

/// The load failures of `result`, for reporting.
pub fn load_failures(result: &ProjectResult) -> Vec<LoadFailure> {
    result
        .failed_loads
        .iter()
        .map(|(file, error)| LoadFailure {
            file: file_display_name(Path::new(file)),
            error: error.clone(),
        })
        .collect()
}

/// Parse a `--collisions` value.
pub fn parse_collisions(value: &str) -> anyhow::Result<CollisionPolicy> {
    CollisionPolicy::from_str(value)
        .map_err(|_| anyhow!("unknown collision policy: {value} (expected preserve or suffix)"))
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}
