use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity, context_has_layer};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

/// Requires service classes to take their dependencies through a
/// constructor rather than reaching for them internally.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DependencyInjectionLint {
    pub name: String,
    pub severity: Severity,
}

/// Extension trait that adds dependency-injection linting to LintBuilder
pub trait DependencyInjectionLintExt {
    /// Build a lint rule requiring constructor injection in services
    fn dependency_injection(&mut self) -> DependencyInjectionLintBuilder<'_>;
}

impl DependencyInjectionLintExt for LintBuilder {
    fn dependency_injection(&mut self) -> DependencyInjectionLintBuilder<'_> {
        DependencyInjectionLintBuilder { parent: self }
    }
}

/// Initial builder for creating a dependency-injection lint
pub struct DependencyInjectionLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> DependencyInjectionLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> DependencyInjectionNamedBuilder<'a> {
        DependencyInjectionNamedBuilder {
            parent: self.parent,
            name: name.into(),
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct DependencyInjectionNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    severity: Severity,
}

impl<'a> DependencyInjectionNamedBuilder<'a> {
    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::DependencyInjection(DependencyInjectionLint {
            name: self.name,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for DependencyInjectionLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        for context in contexts {
            if !context_has_layer(context, "services") {
                continue;
            }
            builder
                .dependency_injection()
                .lint_named(format!(
                    "service_dependency_injection_{}",
                    context.project_root
                ))
                .with_severity(Severity::Error)
                .build();
        }
    }
}
