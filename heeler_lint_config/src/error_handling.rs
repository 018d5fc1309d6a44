use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity, context_has_layer};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

/// Forbids `throw new Error(...)` in route handlers; routes are expected to
/// map failures onto HTTP replies instead of raising.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorHandlingLint {
    pub name: String,
    pub severity: Severity,
}

/// Extension trait that adds route error-handling linting to LintBuilder
pub trait ErrorHandlingLintExt {
    /// Build a lint rule forbidding thrown errors in route handlers
    fn error_handling(&mut self) -> ErrorHandlingLintBuilder<'_>;
}

impl ErrorHandlingLintExt for LintBuilder {
    fn error_handling(&mut self) -> ErrorHandlingLintBuilder<'_> {
        ErrorHandlingLintBuilder { parent: self }
    }
}

/// Initial builder for creating an error-handling lint
pub struct ErrorHandlingLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> ErrorHandlingLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> ErrorHandlingNamedBuilder<'a> {
        ErrorHandlingNamedBuilder {
            parent: self.parent,
            name: name.into(),
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct ErrorHandlingNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    severity: Severity,
}

impl<'a> ErrorHandlingNamedBuilder<'a> {
    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::ErrorHandling(ErrorHandlingLint {
            name: self.name,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for ErrorHandlingLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        for context in contexts {
            // Only worth proposing when the project actually has route files
            if !context_has_layer(context, "routes") {
                continue;
            }
            builder
                .error_handling()
                .lint_named(format!("fastify_error_handling_{}", context.project_root))
                .with_severity(Severity::Error)
                .build();
        }
    }
}
