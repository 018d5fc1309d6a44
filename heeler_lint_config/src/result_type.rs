use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity, context_has_layer};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Requires async functions in services and utils to declare an explicit
/// Result-style return type, and forbids `throw new Error(...)` inside them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResultTypeLint {
    pub name: String,
    /// Grade async functions in the services layer
    #[serde(default = "default_true")]
    pub enforce_in_services: bool,
    /// Grade async functions in the utils layer
    #[serde(default = "default_true")]
    pub enforce_in_utils: bool,
    /// When true, test files are out of scope entirely; when false they are
    /// checked for throws in async functions (return types stay ungraded)
    #[serde(default = "default_true")]
    pub allow_throw_in_tests: bool,
    pub severity: Severity,
}

/// Extension trait that adds result-type linting to LintBuilder
pub trait ResultTypeLintExt {
    /// Build a lint rule requiring Result-typed async functions
    fn result_type(&mut self) -> ResultTypeLintBuilder<'_>;
}

impl ResultTypeLintExt for LintBuilder {
    fn result_type(&mut self) -> ResultTypeLintBuilder<'_> {
        ResultTypeLintBuilder { parent: self }
    }
}

/// Initial builder for creating a result-type lint
pub struct ResultTypeLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> ResultTypeLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> ResultTypeNamedBuilder<'a> {
        ResultTypeNamedBuilder {
            parent: self.parent,
            name: name.into(),
            enforce_in_services: true,
            enforce_in_utils: true,
            allow_throw_in_tests: true,
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct ResultTypeNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    enforce_in_services: bool,
    enforce_in_utils: bool,
    allow_throw_in_tests: bool,
    severity: Severity,
}

impl<'a> ResultTypeNamedBuilder<'a> {
    /// Grade async functions in the services layer
    pub fn enforce_in_services(mut self, enforce: bool) -> Self {
        self.enforce_in_services = enforce;
        self
    }

    /// Grade async functions in the utils layer
    pub fn enforce_in_utils(mut self, enforce: bool) -> Self {
        self.enforce_in_utils = enforce;
        self
    }

    /// Tolerate throws inside async functions in test files
    pub fn allow_throw_in_tests(mut self, allow: bool) -> Self {
        self.allow_throw_in_tests = allow;
        self
    }

    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::ResultType(ResultTypeLint {
            name: self.name,
            enforce_in_services: self.enforce_in_services,
            enforce_in_utils: self.enforce_in_utils,
            allow_throw_in_tests: self.allow_throw_in_tests,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for ResultTypeLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        for context in contexts {
            let has_services = context_has_layer(context, "services");
            let has_utils = context_has_layer(context, "utils");
            if !has_services && !has_utils {
                continue;
            }
            builder
                .result_type()
                .lint_named(format!("require_result_type_{}", context.project_root))
                .enforce_in_services(has_services)
                .enforce_in_utils(has_utils)
                .with_severity(Severity::Warn)
                .build();
        }
    }
}
