use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity, context_has_layer};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

/// Requires plugin files to use the fastify-plugin wrapper so decorators
/// registered inside them escape the encapsulation scope.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PluginWrapperLint {
    pub name: String,
    pub severity: Severity,
}

/// Extension trait that adds plugin-wrapper linting to LintBuilder
pub trait PluginWrapperLintExt {
    /// Build a lint rule requiring the fastify-plugin wrapper
    fn plugin_wrapper(&mut self) -> PluginWrapperLintBuilder<'_>;
}

impl PluginWrapperLintExt for LintBuilder {
    fn plugin_wrapper(&mut self) -> PluginWrapperLintBuilder<'_> {
        PluginWrapperLintBuilder { parent: self }
    }
}

/// Initial builder for creating a plugin-wrapper lint
pub struct PluginWrapperLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> PluginWrapperLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> PluginWrapperNamedBuilder<'a> {
        PluginWrapperNamedBuilder {
            parent: self.parent,
            name: name.into(),
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct PluginWrapperNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    severity: Severity,
}

impl<'a> PluginWrapperNamedBuilder<'a> {
    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::PluginWrapper(PluginWrapperLint {
            name: self.name,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for PluginWrapperLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        for context in contexts {
            if !context_has_layer(context, "plugins") {
                continue;
            }
            builder
                .plugin_wrapper()
                .lint_named(format!("fastify_plugin_wrapper_{}", context.project_root))
                .with_severity(Severity::Error)
                .build();
        }
    }
}
