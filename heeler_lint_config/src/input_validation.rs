use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity, context_has_layer};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

/// Requires route files that read the request body to declare a validation
/// schema in the route options.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputValidationLint {
    pub name: String,
    pub severity: Severity,
}

/// Extension trait that adds input-validation linting to LintBuilder
pub trait InputValidationLintExt {
    /// Build a lint rule requiring request-body schemas in routes
    fn input_validation(&mut self) -> InputValidationLintBuilder<'_>;
}

impl InputValidationLintExt for LintBuilder {
    fn input_validation(&mut self) -> InputValidationLintBuilder<'_> {
        InputValidationLintBuilder { parent: self }
    }
}

/// Initial builder for creating an input-validation lint
pub struct InputValidationLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> InputValidationLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> InputValidationNamedBuilder<'a> {
        InputValidationNamedBuilder {
            parent: self.parent,
            name: name.into(),
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct InputValidationNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    severity: Severity,
}

impl<'a> InputValidationNamedBuilder<'a> {
    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::InputValidation(InputValidationLint {
            name: self.name,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for InputValidationLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        for context in contexts {
            if !context_has_layer(context, "routes") {
                continue;
            }
            builder
                .input_validation()
                .lint_named(format!("require_input_validation_{}", context.project_root))
                .with_severity(Severity::Error)
                .build();
        }
    }
}
