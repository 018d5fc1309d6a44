use crate::ArchitectureLintRule;
use crate::lints::{
    DependencyInjectionRule, EnvAccessRule, ErrorHandlingRule, InputValidationRule,
    PluginWrapperRule, PropertyTestsRule, ResultTypeRule,
};
use anyhow::{Context, Result};
use heeler_lint_config::ConfiguredLint;
use heeler_lint_config::lint_builder::LintBuilder;
use std::fs;
use std::path::Path;

///
/// Turns lint configuration into runnable lint rules.
///
/// Configuration arrives either as a path to a `heeler.ron` file, as
/// inline RON content, or as an in-memory `LintBuilder`. Every route
/// funnels through the same constructor table, so an invalid rule
/// option (for example a malformed exclusion regex) fails the whole
/// load rather than silently dropping the rule.
///
pub struct LintConfigurationFactory {}

impl LintConfigurationFactory {
    pub fn new() -> Self {
        Self {}
    }

    pub fn from_file(file: String) -> Result<Vec<Box<dyn ArchitectureLintRule + Send>>> {
        // Check if this is a file path or actual content
        let path = Path::new(&file);
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read lint configuration {file}"))?;
            Self::from_content(&content)
        } else {
            Self::from_content(&file)
        }
    }

    // Process content regardless of source
    pub fn from_content(content: &str) -> Result<Vec<Box<dyn ArchitectureLintRule + Send>>> {
        let lints: Vec<ConfiguredLint> =
            ron::from_str(content).context("Failed to parse lint configuration as RON")?;
        Self::from_builder(&LintBuilder { lints })
    }

    pub fn from_builder(
        builder: &LintBuilder,
    ) -> Result<Vec<Box<dyn ArchitectureLintRule + Send>>> {
        builder
            .lints
            .iter()
            .map(|l| match l {
                ConfiguredLint::EnvAccess(_) => EnvAccessRule::new(l),
                ConfiguredLint::ErrorHandling(_) => ErrorHandlingRule::new(l),
                ConfiguredLint::InputValidation(_) => InputValidationRule::new(l),
                ConfiguredLint::DependencyInjection(_) => DependencyInjectionRule::new(l),
                ConfiguredLint::PluginWrapper(_) => PluginWrapperRule::new(l),
                ConfiguredLint::PropertyTests(_) => PropertyTestsRule::new(l),
                ConfiguredLint::ResultType(_) => ResultTypeRule::new(l),
            })
            .collect()
    }
}
