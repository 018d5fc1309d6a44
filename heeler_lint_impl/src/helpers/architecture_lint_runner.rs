// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::architecture_lint_rule::run_lint_on_file;
use crate::helpers::architecture_lint_collection::ArchitectureLintCollection;
use crate::helpers::queries::{file_layer, in_layer, is_test_like_path, normalize_path};
use crate::lint_result::LintResult;
use crate::lints::property_tests::extract_exported_functions;
use crate::source_file::SourceFile;
use ansi_term::Colour::{Green, Red, Yellow};
use anyhow::{Context, Result};
use heeler_common::project_context::{FileInfo, FunctionInfo, HEELER_DIR, ProjectContext};
use heeler_lint_config::Severity;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

/// Directories that never contain first-party TypeScript sources
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "build", "coverage"];

///
/// The mode our lint runner should operate in
///
#[derive(Clone, PartialEq, Debug)]
pub enum Mode {
    /// Run the lints
    Check,

    /// Print source files and their layers
    PrintFiles,

    /// Print exported functions
    PrintFunctions,

    /// Generate configuration
    GenerateConfig,
}

/// Per-file outcome of a check pass. Unreadable or unparseable files are
/// skipped with a warning rather than failing the run.
enum FileOutcome {
    Linted(Vec<LintResult>),
    Skipped,
}

///
/// Runs architecture lints over a TypeScript project tree.
///
pub struct ArchitectureLintRunner {
    mode: Mode,
    lint_collection: Arc<ArchitectureLintCollection>,
    project_root: PathBuf,

    // Because linting happens per file across worker threads, we need
    // somewhere we can stash our merged results internally.
    result_text: String,
    results: Vec<LintResult>,
    files_skipped: usize,
}

impl ArchitectureLintRunner {
    pub fn new(
        mode: Mode,
        project_root: PathBuf,
        lint_collection: ArchitectureLintCollection,
    ) -> Self {
        ArchitectureLintRunner {
            mode,
            lint_collection: Arc::new(lint_collection),
            project_root,
            result_text: String::new(),
            results: Vec::new(),
            files_skipped: 0,
        }
    }

    ///
    /// Borrow the lint results in formatted text style.
    ///
    pub fn lint_results_text(&self) -> &String {
        &self.result_text
    }

    /// Borrow the raw lint results, sorted by file and position.
    pub fn results(&self) -> &[LintResult] {
        &self.results
    }

    pub fn has_errors(&self) -> bool {
        self.results
            .iter()
            .any(|r| r.severity == Severity::Error)
    }

    pub fn run(&mut self) -> Result<()> {
        let files = self.collect_source_files();
        self.handle_mode(files)
    }

    // Handles the different execution modes we have, potentially returning a failure
    fn handle_mode(&mut self, files: Vec<(PathBuf, String)>) -> Result<()> {
        match self.mode {
            Mode::Check => {
                let collection = Arc::clone(&self.lint_collection);
                let project_root = self.project_root.clone();

                let outcomes: Vec<FileOutcome> = files
                    .par_iter()
                    .map(|(path, relative)| {
                        Self::lint_file(&collection, &project_root, path, relative)
                    })
                    .collect();

                let mut results = Vec::new();
                for outcome in outcomes {
                    match outcome {
                        FileOutcome::Linted(mut file_results) => results.append(&mut file_results),
                        FileOutcome::Skipped => self.files_skipped += 1,
                    }
                }

                // Worker threads finish in arbitrary order, so sort before
                // rendering to keep output stable run to run
                results.sort_by(|a, b| {
                    a.file
                        .cmp(&b.file)
                        .then_with(|| a.span.cmp(&b.span))
                        .then_with(|| a.lint.cmp(&b.lint))
                });

                self.results = results;
                self.result_text = self.render_results();
                Ok(())
            }
            Mode::PrintFiles | Mode::PrintFunctions => {
                // For these modes, we build the project context, then serialize it
                // out to .heeler. The outer call - e.g. the heeler binary - then
                // grabs it all and renders a complete view for the user.
                //
                // We don't print any of our own output! We're just discovering
                // project structure info for heeler.
                let context = self
                    .build_project_context(&files)
                    .context("Failed to build project context for print mode")?;

                if let Err(e) = context.serialize_to_file() {
                    eprintln!("Warning: Failed to serialize project context: {e}");
                }

                Ok(())
            }
            Mode::GenerateConfig => {
                // For config generation, just build the project context and
                // serialize it like we do for PrintFiles and PrintFunctions. The
                // heeler binary handles generating the config from the
                // serialized context.
                let context = self
                    .build_project_context(&files)
                    .context("Failed to build project context for generate-config mode")?;

                if let Err(e) = context.serialize_to_file() {
                    eprintln!("Warning: Failed to serialize project context: {e}");
                }

                self.result_text = format!(
                    "Project context successfully generated for project {}",
                    context.project_root
                );
                Ok(())
            }
        }
    }

    /// Walk the project tree and collect lintable TypeScript sources as
    /// (absolute path, project-relative path) pairs.
    fn collect_source_files(&self) -> Vec<(PathBuf, String)> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.project_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                // The root itself may carry a dot-name (tempdirs do); only
                // prune entries below it
                if entry.depth() == 0 {
                    return true;
                }
                !is_skipped_dir(entry)
            });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().map(|ext| ext == "ts").unwrap_or(false)
                && let Ok(relative) = path.strip_prefix(&self.project_root)
            {
                files.push((
                    path.to_path_buf(),
                    normalize_path(&relative.to_string_lossy()),
                ));
            }
        }

        files
    }

    fn lint_file(
        collection: &ArchitectureLintCollection,
        project_root: &Path,
        path: &Path,
        relative: &str,
    ) -> FileOutcome {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Warning: Failed to read {relative}: {e}");
                return FileOutcome::Skipped;
            }
        };

        let file = match SourceFile::parse(relative.to_string(), text) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Warning: Failed to parse {relative}: {e}");
                return FileOutcome::Skipped;
            }
        };

        let mut results = Vec::new();
        for lint in collection.lints_for_file(relative) {
            results.extend(run_lint_on_file(lint.as_ref(), &file, project_root));
        }
        FileOutcome::Linted(results)
    }

    /// Build ProjectContext. This includes file and exported-function
    /// information - and is typically used by the heeler binary - on the
    /// outside of the lint run - to display project info to the user.
    fn build_project_context(&self, files: &[(PathBuf, String)]) -> Result<ProjectContext> {
        let lints = self.lint_collection.lints();

        let mut file_infos = Vec::new();
        let mut function_infos = Vec::new();

        for (path, relative) in files {
            let applicable_lints: Vec<String> = lints
                .iter()
                .filter(|lint| lint.applies_to_file(relative))
                .map(|lint| lint.name())
                .collect();

            let layer = if is_test_like_path(relative) {
                "test".to_string()
            } else {
                file_layer(relative).unwrap_or("other").to_string()
            };

            file_infos.push(FileInfo {
                name: relative.clone(),
                layer,
                applicable_lints,
            });

            // Exported functions are only interesting in the utils layer
            if !in_layer(relative, "utils") || is_test_like_path(relative) {
                continue;
            }
            let Ok(text) = fs::read_to_string(path) else {
                continue;
            };
            for function in extract_exported_functions(&text) {
                let applicable_lints: Vec<String> = lints
                    .iter()
                    .filter(|lint| lint.applies_to_function(relative, &function))
                    .map(|lint| lint.name())
                    .collect();

                function_infos.push(FunctionInfo {
                    name: function,
                    defined_in: relative.clone(),
                    applicable_lints,
                });
            }
        }

        let mut context = ProjectContext::with_base_dir(self.project_root.join(HEELER_DIR));
        context.project_root = self.project_name();
        context.files = file_infos;
        context.functions = function_infos;
        Ok(context)
    }

    /// Project name from package.json, falling back to the directory name
    fn project_name(&self) -> String {
        let manifest = self.project_root.join("package.json");
        if let Ok(text) = fs::read_to_string(&manifest)
            && let Ok(value) = serde_json::from_str::<serde_json::Value>(&text)
            && let Some(name) = value.get("name").and_then(|n| n.as_str())
        {
            // Scoped package names contain a slash, which cannot appear in
            // the context filename
            return name.trim_start_matches('@').replace('/', "_");
        }

        self.project_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown_project".to_string())
    }

    fn render_results(&self) -> String {
        let mut out = String::new();
        let mut errors = 0usize;
        let mut warnings = 0usize;

        for result in &self.results {
            out.push_str(&result.render());
            out.push('\n');
            match result.severity {
                Severity::Error => errors += 1,
                Severity::Warn => warnings += 1,
            }
        }

        if errors + warnings > 0 {
            let summary = format!(
                "{} problems ({} errors, {} warnings)",
                errors + warnings,
                errors,
                warnings
            );
            let styled = if errors > 0 {
                Red.bold().paint(summary)
            } else {
                Yellow.bold().paint(summary)
            };
            out.push_str(&format!("{styled}\n"));
        } else {
            out.push_str(&format!("{}\n", Green.bold().paint("No problems found")));
        }

        if self.files_skipped > 0 {
            out.push_str(&format!(
                "note: skipped {} file(s) that could not be read or parsed\n",
                self.files_skipped
            ));
        }

        out
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
        .unwrap_or(false)
}
