pub mod helpers;

mod architecture_lint_rule;
mod lint_context;
mod lint_result;
mod matchers;
mod source_file;
pub mod lints;

// Re-export our public API
pub use architecture_lint_rule::ArchitectureLintRule;
pub use architecture_lint_rule::run_lint_on_file;
pub use helpers::architecture_lint_collection::ArchitectureLintCollection;
pub use helpers::architecture_lint_runner::ArchitectureLintRunner;
pub use helpers::architecture_lint_runner::Mode;
pub use lint_context::LintContext;
pub use lint_result::{LintResult, Span};
pub use lints::configuration_factory::LintConfigurationFactory;
pub use lints::property_tests::extract_exported_functions;
pub use source_file::SourceFile;
