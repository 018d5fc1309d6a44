use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const HEELER_DIR: &str = ".heeler";
pub const CONTEXT_FILE_SUFFIX: &str = "_context.json";

/// Information about a source file and the lints that apply to it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Project-relative path, forward slashes
    pub name: String,
    /// Architectural layer the file sits in (routes, services, plugins,
    /// utils, config, test, other)
    pub layer: String,
    /// List of lint names that apply to this file
    #[serde(default)]
    pub applicable_lints: Vec<String>,
}

// Add PartialEq implementation to allow comparisons with strings
impl PartialEq<str> for FileInfo {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for FileInfo {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

/// Information about an exported function discovered in a utils file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FunctionInfo {
    /// Function identifier as it appears in the export
    pub name: String,
    /// Project-relative path of the defining file
    pub defined_in: String,
    /// List of lint names that apply to this function
    #[serde(default)]
    pub applicable_lints: Vec<String>,
}

/// Context for configuration generation containing scan-time discoverable
/// context about the project we're running heeler on.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProjectContext {
    /// List of all linted source files with their applicable lints
    pub files: Vec<FileInfo>,
    /// The project name (package name, or directory name as a fallback)
    pub project_root: String,
    /// List of exported functions found in utils files
    pub functions: Vec<FunctionInfo>,
    /// Base directory for storing context files (not serialized)
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ProjectContext {
    /// Creates a new empty project context with default base directory (.heeler)
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            project_root: String::new(),
            functions: Vec::new(),
            base_dir: PathBuf::from(HEELER_DIR),
        }
    }

    /// Creates a new empty project context with a custom base directory
    pub fn with_base_dir(dir_path: impl AsRef<Path>) -> Self {
        Self {
            files: Vec::new(),
            project_root: String::new(),
            functions: Vec::new(),
            base_dir: dir_path.as_ref().to_path_buf(),
        }
    }

    /// Serialize this project context to a file in the base directory
    /// with a name based on the project_root
    pub fn serialize_to_file(&self) -> Result<PathBuf> {
        if self.project_root.is_empty() {
            return Err(anyhow::anyhow!(
                "Cannot serialize ProjectContext with empty project_root"
            ));
        }

        // Ensure the base directory exists
        fs::create_dir_all(&self.base_dir).context(format!(
            "Failed to create directory: {}",
            self.base_dir.display()
        ))?;

        // Create a predictable filename using just the project name
        let filename = format!("{}{}", self.project_root, CONTEXT_FILE_SUFFIX);
        let file_path = self.base_dir.join(&filename);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .context(format!(
                "Failed to open file for writing: {}",
                file_path.display()
            ))?;

        serde_json::to_writer_pretty(file, &self).context(format!(
            "Failed to serialize ProjectContext to: {}",
            file_path.display()
        ))?;

        Ok(file_path)
    }

    /// Load all project contexts from the default .heeler directory and return
    /// the merged result
    pub fn load_all_contexts() -> Result<ProjectContext> {
        let (context, _) = Self::load_all_contexts_with_project_names()?;
        Ok(context)
    }

    /// Load all project contexts from the default .heeler directory and return
    /// the merged result along with a list of all project names that were found
    pub fn load_all_contexts_with_project_names() -> Result<(ProjectContext, Vec<String>)> {
        Self::load_all_contexts_from_dir(&PathBuf::from(HEELER_DIR))
    }

    /// Load all project contexts from a specific directory and return the merged
    /// result along with a list of all project names that were found
    pub fn load_all_contexts_from_dir(dir_path: &Path) -> Result<(ProjectContext, Vec<String>)> {
        if !dir_path.exists() {
            return Err(anyhow::anyhow!(
                "Directory not found: {}",
                dir_path.display()
            ));
        }

        // Create aggregated context with the specified base directory
        let mut aggregated_context = ProjectContext::with_base_dir(dir_path);

        // Track project names for better presentation
        let mut project_names = Vec::new();

        // Read all JSON files in the directory
        let entries = fs::read_dir(dir_path)
            .context(format!("Failed to read directory: {}", dir_path.display()))?;

        // Process each file
        let mut contexts_found = false;
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if let Some(filename) = path.file_name().and_then(|f| f.to_str()) {
                // Look specifically for our deterministic *_context.json pattern
                if filename.ends_with(CONTEXT_FILE_SUFFIX) {
                    let content = fs::read_to_string(&path)
                        .context(format!("Failed to read file: {}", path.display()))?;

                    let context: ProjectContext = serde_json::from_str(&content)
                        .context(format!("Failed to parse JSON from: {}", path.display()))?;

                    // Found a valid context
                    contexts_found = true;

                    // Add project name to our list
                    if !project_names.contains(&context.project_root) {
                        project_names.push(context.project_root.clone());
                    }

                    // Merge this context into our aggregate
                    aggregated_context.merge(&context);
                }
            }
        }

        if !contexts_found {
            return Err(anyhow::anyhow!(
                "No project context files found in {}",
                dir_path.display()
            ));
        }

        // Put the aggregated context into a stable order
        aggregated_context.normalize();

        Ok((aggregated_context, project_names))
    }

    /// Clean up all context files from the base directory
    pub fn clean_context_files(&self) -> Result<()> {
        if !self.base_dir.exists() {
            return Ok(()); // Nothing to clean if directory doesn't exist
        }

        let entries = fs::read_dir(&self.base_dir).context(format!(
            "Failed to read directory: {}",
            self.base_dir.display()
        ))?;

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if let Some(filename) = path.file_name().and_then(|f| f.to_str()) {
                if filename.ends_with(CONTEXT_FILE_SUFFIX) {
                    let _ = fs::remove_file(&path); // Ignore errors on deletion
                }
            }
        }

        Ok(())
    }

    /// Clean up all context files from the default .heeler directory
    pub fn clean_default_context_files() -> Result<()> {
        let default_context = ProjectContext::new();
        default_context.clean_context_files()
    }

    // Private implementation methods

    /// Merge another ProjectContext into this one
    fn merge(&mut self, other: &ProjectContext) {
        // Take the project root if ours is empty
        if self.project_root.is_empty() {
            self.project_root = other.project_root.clone();
        }

        // Add files
        self.files.extend(other.files.clone());

        // Add functions (each function is qualified by its defining file,
        // so collisions only happen when the same context is loaded twice)
        self.functions.extend(other.functions.clone());
    }

    /// Sorts files and functions for consistent ordering
    fn normalize(&mut self) {
        // Sort files by name
        self.files.sort_by(|a, b| a.name.cmp(&b.name));

        // Sort functions by defining file, then name
        self.functions
            .sort_by(|a, b| (&a.defined_in, &a.name).cmp(&(&b.defined_in, &b.name)));
    }
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self::new()
    }
}
