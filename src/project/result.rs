//! Project loading result types and statistics.

use crate::project::SdkProject;

/// Result of a project loading operation.
///
/// Contains the loaded project along with the modules that were loaded and the dump
/// files that failed, so a caller can report failures and still generate the rest.
///
/// # Usage
///
/// ```rust,no_run
/// use bnm_sdkgen::project::{ProjectLoader, ProjectResult};
///
/// # fn main() -> bnm_sdkgen::Result<()> {
/// let result: ProjectResult = ProjectLoader::new().input("dumps")?.build()?;
///
/// if result.is_complete_success() {
///     println!("Loaded {} modules successfully", result.success_count());
/// } else {
///     println!(
///         "Loaded {} modules, {} failed",
///         result.success_count(),
///         result.failure_count()
///     );
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ProjectResult {
    /// The loaded project containing all successfully loaded modules
    pub project: SdkProject,
    /// Names of the successfully loaded modules, in load order
    pub loaded_modules: Vec<String>,
    /// Detailed failure information (file path -> error message)
    pub failed_loads: Vec<(String, String)>,
    /// Total number of successfully loaded modules
    pub loaded_count: usize,
    /// Total number of failed loading attempts
    pub failed_count: usize,
}

impl ProjectResult {
    /// Create a new empty project result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the loading operation was completely successful (no failures).
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed_count == 0
    }

    /// Check if the loading operation had any failures.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }

    /// Get the number of successfully loaded modules.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.loaded_count
    }

    /// Get the number of failed module loads.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed_count
    }

    /// Record a successful module load.
    pub(crate) fn record_success(&mut self, module: String) {
        self.loaded_modules.push(module);
        self.loaded_count += 1;
    }

    /// Record a failed module load.
    pub(crate) fn record_failure(&mut self, file_path: String, error_message: String) {
        self.failed_loads.push((file_path, error_message));
        self.failed_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_counters() {
        let mut result = ProjectResult::new();
        assert!(result.is_complete_success());

        result.record_success("Assembly-CSharp".to_string());
        result.record_failure("broken.json".to_string(), "Provided input was empty".to_string());

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.failure_count(), 1);
        assert!(result.has_failures());
        assert_eq!(result.loaded_modules, vec!["Assembly-CSharp"]);
    }
}
