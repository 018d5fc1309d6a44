use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

use crate::LintBuilder;

/// Extension trait for LintBuilder that adds runtime linting capabilities
pub trait LintBuilderExt {
    /// Writes the current builder configuration to a temporary file and runs
    /// the heeler binary from PATH against it
    ///
    /// # Arguments
    ///
    /// * `project_path` - Optional path to the project to run lints on
    fn assert_lints(&self, project_path: Option<&str>) -> Result<Output>;

    /// Same as assert_lints, but with an explicit heeler binary. Used by
    /// integration tests that run the freshly built binary.
    fn assert_lints_with_binary(&self, binary: &Path, project_path: Option<&str>)
    -> Result<Output>;
}

impl LintBuilderExt for LintBuilder {
    fn assert_lints(&self, project_path: Option<&str>) -> Result<Output> {
        self.assert_lints_with_binary(Path::new("heeler"), project_path)
    }

    fn assert_lints_with_binary(
        &self,
        binary: &Path,
        project_path: Option<&str>,
    ) -> Result<Output> {
        let output = run_command(self, binary, "check", project_path)?;

        // Check if the command failed (non-zero exit status)
        if !output.status.success() {
            // Print the output
            if !output.stdout.is_empty() {
                println!("Lint stdout:\n{}", String::from_utf8_lossy(&output.stdout));
            }
            if !output.stderr.is_empty() {
                eprintln!("Lint stderr:\n{}", String::from_utf8_lossy(&output.stderr));
            }

            // Panic to fail the test
            panic!("heeler checks failed!");
        }

        Ok(output)
    }
}

fn run_command(
    lint_builder: &LintBuilder,
    binary: &Path,
    command: &str,
    project_path: Option<&str>,
) -> Result<Output> {
    // Create a temporary file to store the configuration
    let temp_file = NamedTempFile::new().context("Failed to create temporary configuration file")?;
    let config_path = temp_file.path().to_path_buf();

    // Write the configuration to the temporary file
    lint_builder
        .write_to_file(&config_path)
        .context("Failed to write configuration to temporary file")?;

    // Prepare the heeler command
    let mut cmd = Command::new(binary);
    cmd.arg(command);
    cmd.arg("--heeler-config");
    cmd.arg(&config_path);

    // Point at the project under test, if given
    if let Some(path) = project_path {
        cmd.arg("--project");
        cmd.arg(path);
    }

    // Run the command and capture the output
    let output = cmd.output().context("Failed to execute heeler")?;

    // Return the command output
    Ok(output)
}
