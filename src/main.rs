//!
//! heeler
//! This is the entry point for heeler, an architectural linter for TypeScript
//! backend services built on Fastify. It is what runs when you type `heeler`
//! on the command line.
//!
//! Unlike compiler-integrated linters, heeler does not need to proxy a build:
//! it parses TypeScript sources directly with tree-sitter and runs every
//! configured lint rule in-process. The overall execution flow looks like:
//!
//!   1. Parse the command line (`check`, `print-files`, `print-functions`,
//!      `generate-config`) and resolve the project root, either from
//!      `--project` or by walking up from the current directory to the
//!      nearest package.json.
//!   2. Load lint configuration from heeler.ron (or `--heeler-config`)
//!      through `LintConfigurationFactory`.
//!   3. Hand the lint collection to `ArchitectureLintRunner`, which walks
//!      the project tree and runs the rules over each source file.
//!   4. For the print and generate-config commands, the runner serializes a
//!      `ProjectContext` into the `.heeler/` directory; we then load it all
//!      back here and use it to render project structure to the user, or to
//!      propose an initial configuration.
//!

mod utils;

use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;
use anyhow::Context;
use heeler_common::cli::{HeelerArgs, HeelerCommand};
use heeler_common::project_context::{HEELER_DIR, ProjectContext};
use heeler_common::workspace;
use heeler_lint_impl::{
    ArchitectureLintCollection, ArchitectureLintRunner, LintConfigurationFactory, Mode,
};
use std::env;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;

#[derive(Debug, PartialEq)]
enum ProjectType {
    ConfiguredHeelerProject,
    NodeProject,
    OtherDirectory,
}

/// Simple error type that wraps a command exit code
#[derive(Debug)]
struct CommandExitStatus(i32);

impl fmt::Display for CommandExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command failed with exit code: {}", self.0)
    }
}

impl Error for CommandExitStatus {}

/// Validates the project root to determine the project type
fn validate_project(project_root: &Path) -> ProjectType {
    let has_heeler_ron = project_root.join("heeler.ron").exists();
    let has_package_json = project_root.join("package.json").exists();

    if has_heeler_ron && has_package_json {
        ProjectType::ConfiguredHeelerProject
    } else if has_package_json {
        ProjectType::NodeProject
    } else {
        ProjectType::OtherDirectory
    }
}

/// Resolve the directory we should lint: `--project` wins, otherwise walk up
/// from the current directory to the nearest package.json
fn resolve_project_root(args: &HeelerArgs) -> PathBuf {
    match &args.project_root {
        Some(dir) => PathBuf::from(dir),
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            workspace::find_project_root(&cwd).unwrap_or(cwd)
        }
    }
}

fn show_ascii_heeler() {
    println!(
        "{}",
        Cyan.paint(
            r#"
      /^-----^\
      V  o o  V
       |  Y  |
        \ Q /
        / - \
        |    \
        |     \____
        \  heel!   )
         \________/
"#
        )
    );
}

fn show_help() {
    show_ascii_heeler();
    println!("{}", help_message());
}

fn show_version() {
    println!(
        "{} {}",
        Style::new().bold().paint("heeler version"),
        Green.paint(env!("CARGO_PKG_VERSION"))
    );
}

pub fn main() {
    // Handle help and version flags
    if env::args().any(|a| a == "--help" || a == "-h") {
        show_help();
        return;
    }

    if env::args().any(|a| a == "--version" || a == "-V") {
        show_version();
        return;
    }

    let args = HeelerArgs::parse(env::args());

    for arg in &args.extra_args {
        eprintln!("Warning: ignoring unrecognised argument '{arg}'");
    }

    let project_root = resolve_project_root(&args);

    // Skip environment checks if we're generating a config
    if args.command != HeelerCommand::GenerateConfig {
        match validate_project(&project_root) {
            ProjectType::ConfiguredHeelerProject => {
                // Good to go - continue with normal operation
            }
            ProjectType::NodeProject if args.config_path.is_some() => {
                // No heeler.ron, but the caller supplied a configuration
            }
            ProjectType::NodeProject => {
                // In a Node project but missing heeler.ron
                show_ascii_heeler();
                println!("{}", Red.bold().paint("Missing heeler.ron - nothing to do!"));
                println!("Consider generating an initial configuration:");
                println!("  {}", Green.paint("heeler generate-config"));
                exit(-1)
            }
            ProjectType::OtherDirectory => {
                // Not in a Node project directory
                show_ascii_heeler();
                println!("{}", Red.bold().paint("Not in a Node.js project directory!"));
                println!(
                    "{}",
                    Yellow.paint(
                        "heeler is an architectural linting tool for TypeScript backends."
                    )
                );
                println!("It needs a directory containing a package.json file.");
                println!("\nTo use heeler:");
                println!("  1. Navigate to a Node.js project directory (or pass --project)");
                println!("  2. Run {}", Green.paint("heeler generate-config"));
                println!("  3. Edit the generated heeler.ron file");
                println!("  4. Run {}", Green.paint("heeler check"));
                exit(-1)
            }
        }
    }

    // Process the command
    match args.command {
        HeelerCommand::Check => {
            if let Err(code) = process_check(&args, &project_root) {
                exit(code.0);
            }
        }
        HeelerCommand::PrintFiles | HeelerCommand::PrintFunctions => {
            if let Err(code) = process_print(&args, &project_root) {
                exit(code.0);
            }
        }
        HeelerCommand::GenerateConfig => {
            if let Err(code) = process_generate_config(&args, &project_root) {
                exit(code.0);
            }
        }
    }
}

/// Load the configured lint rules, honouring an explicit `--heeler-config`
fn load_lint_collection(
    args: &HeelerArgs,
    project_root: &Path,
) -> anyhow::Result<ArchitectureLintCollection> {
    let config_path = match &args.config_path {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.exists() {
                anyhow::bail!("Configuration file {} not found", path.display());
            }
            path
        }
        None => project_root.join("heeler.ron"),
    };

    if config_path.exists() {
        let lints = LintConfigurationFactory::from_file(config_path.to_string_lossy().to_string())
            .with_context(|| {
                format!(
                    "Failed to load lint configuration from {}",
                    config_path.display()
                )
            })?;
        Ok(ArchitectureLintCollection::new(lints))
    } else {
        // The print and generate-config commands work without configuration
        Ok(ArchitectureLintCollection::new(Vec::new()))
    }
}

fn build_runner(
    args: &HeelerArgs,
    project_root: &Path,
    mode: Mode,
) -> anyhow::Result<ArchitectureLintRunner> {
    let collection = load_lint_collection(args, project_root)?;
    let mut runner = ArchitectureLintRunner::new(mode, project_root.to_path_buf(), collection);
    runner.run()?;
    Ok(runner)
}

fn process_check(args: &HeelerArgs, project_root: &Path) -> Result<(), CommandExitStatus> {
    let runner = build_runner(args, project_root, Mode::Check).map_err(|e| {
        eprintln!("Error: {e:#}");
        CommandExitStatus(1)
    })?;

    let results_text = runner.lint_results_text();
    if !results_text.is_empty() {
        println!("{results_text}");
    }

    if runner.has_errors() {
        Err(CommandExitStatus(1))
    } else {
        Ok(())
    }
}

fn process_print(args: &HeelerArgs, project_root: &Path) -> Result<(), CommandExitStatus> {
    let mode = match args.command {
        HeelerCommand::PrintFunctions => Mode::PrintFunctions,
        _ => Mode::PrintFiles,
    };

    // First run the lint runner to generate context data, then load it all
    // back and display it
    let display = |(context, project_names): (ProjectContext, Vec<String>)| match mode {
        Mode::PrintFunctions => print_functions(&context, &project_names),
        _ => print_files(&context, &project_names),
    };

    build_runner(args, project_root, mode.clone())
        .and_then(|_| {
            ProjectContext::load_all_contexts_from_dir(&project_root.join(HEELER_DIR))
                .context("Failed to load project context data")
        })
        .map(display)
        .map_err(|e| {
            eprintln!("Error: {e:#}");
            CommandExitStatus(1)
        })
}

fn process_generate_config(
    args: &HeelerArgs,
    project_root: &Path,
) -> Result<(), CommandExitStatus> {
    // Check for any existing generated config files before doing any work
    let existing_configs = utils::config_generation::find_generated_configs(project_root);
    if !existing_configs.is_empty() {
        println!("Error: Generated config files already exist:");
        for name in &existing_configs {
            println!("  - {name}");
        }
        println!("Remove these files if you want to regenerate the configuration.");
        return Err(CommandExitStatus(1));
    }

    let result = build_runner(args, project_root, Mode::GenerateConfig).and_then(|runner| {
        println!("{}", runner.lint_results_text());

        // Load the merged context back and propose a configuration from it
        let (context, _) =
            ProjectContext::load_all_contexts_from_dir(&project_root.join(HEELER_DIR))
                .context("Failed to load project context data")?;

        utils::config_generation::generate_config_file(project_root, &context)
    });

    let generated_path = match result {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Err(CommandExitStatus(1));
        }
    };

    println!("Config written to {}", generated_path.display());

    // If heeler.ron doesn't exist yet, promote the generated file to it
    let heeler_ron = project_root.join("heeler.ron");
    if !heeler_ron.exists() {
        if let Err(e) = fs::rename(&generated_path, &heeler_ron) {
            println!("Warning: Failed to rename generated config to heeler.ron: {e}");
        } else {
            println!(
                "Created heeler.ron from {}",
                generated_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn print_files(context: &ProjectContext, project_names: &[String]) {
    println!(
        "{}",
        Style::new()
            .bold()
            .paint(format!("Source files for {}", project_names.join(", ")))
    );
    for file in &context.files {
        println!(
            "{} ({}) [{}]",
            Blue.paint(&file.name),
            file.layer,
            Green.paint(file.applicable_lints.join(", "))
        );
    }
}

fn print_functions(context: &ProjectContext, project_names: &[String]) {
    println!(
        "{}",
        Style::new().bold().paint(format!(
            "Exported utils functions for {}",
            project_names.join(", ")
        ))
    );
    for function in &context.functions {
        println!(
            "{}::{} [{}]",
            Blue.paint(&function.defined_in),
            function.name,
            Green.paint(function.applicable_lints.join(", "))
        );
    }
}

#[must_use]
pub fn help_message() -> String {
    format!(
        "
{title}: Checks your backend architecture against your architecture lint file.

{usage_label}:
    heeler [COMMAND] [OPTIONS]

{commands_label}:
    {check}            Run architectural lints (default)
    {print_files}      Print source files, their layers, and applicable lints
    {print_functions}  Print exported utils functions and applicable lints
    {generate_config}  Generates an initial heeler.ron for your project.

{options_label}:
    --heeler-config PATH   Use a specific lint configuration file
    --project DIR          Lint the project rooted at DIR
                           (default: nearest directory with a package.json)
    -h, --help             Print this message
    -V, --version          Print version info and exit
",
        title = Style::new().bold().paint("Heeler"),
        usage_label = Blue.bold().paint("Usage"),
        commands_label = Blue.bold().paint("Commands"),
        check = Green.paint("check"),
        print_files = Green.paint("print-files"),
        print_functions = Green.paint("print-functions"),
        generate_config = Green.paint("generate-config"),
        options_label = Blue.bold().paint("Options")
    )
}
