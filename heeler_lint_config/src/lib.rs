// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod lint_builder;
pub mod lint_builder_ext;
mod dependency_injection;
mod env_access;
mod error_handling;
mod input_validation;
mod plugin_wrapper;
mod property_tests;
mod result_type;

// Make sure our extensions are visible
pub use dependency_injection::{DependencyInjectionLint, DependencyInjectionLintExt};
pub use env_access::{EnvAccessLint, EnvAccessLintExt};
pub use error_handling::{ErrorHandlingLint, ErrorHandlingLintExt};
pub use input_validation::{InputValidationLint, InputValidationLintExt};
pub use lint_builder::LintBuilder;
pub use lint_builder_ext::LintBuilderExt;
pub use plugin_wrapper::{PluginWrapperLint, PluginWrapperLintExt};
pub use property_tests::{PropertyTestsLint, PropertyTestsLintExt};
pub use result_type::{ResultTypeLint, ResultTypeLintExt};

use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

/// How a lint's findings are graded when results are rendered and when the
/// check exit code is computed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Warn,
    Error,
}

/// One configured lint, tagged by rule kind
#[derive(Debug, Serialize, Deserialize)]
pub enum ConfiguredLint {
    EnvAccess(EnvAccessLint),
    ErrorHandling(ErrorHandlingLint),
    InputValidation(InputValidationLint),
    DependencyInjection(DependencyInjectionLint),
    PluginWrapper(PluginWrapperLint),
    PropertyTests(PropertyTestsLint),
    ResultType(ResultTypeLint),
}

impl ConfiguredLint {
    /// The configured instance name, whatever the rule kind
    pub fn name(&self) -> &str {
        match self {
            ConfiguredLint::EnvAccess(l) => &l.name,
            ConfiguredLint::ErrorHandling(l) => &l.name,
            ConfiguredLint::InputValidation(l) => &l.name,
            ConfiguredLint::DependencyInjection(l) => &l.name,
            ConfiguredLint::PluginWrapper(l) => &l.name,
            ConfiguredLint::PropertyTests(l) => &l.name,
            ConfiguredLint::ResultType(l) => &l.name,
        }
    }
}

/// Implemented by each lint configuration type to propose a starter
/// configuration from what a project scan discovered
pub trait GenerateFromContext {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder);
}

/// Layer marker helpers shared by the per-lint config generators
pub(crate) fn context_has_layer(context: &ProjectContext, layer: &str) -> bool {
    context.files.iter().any(|f| f.layer == layer)
}
