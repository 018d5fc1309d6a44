// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

/// Forbids reading the process environment directly outside the validated
/// config modules. Environment-definition and test files are exempt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnvAccessLint {
    pub name: String,
    pub severity: Severity,
}

/// Extension trait that adds env-access linting to LintBuilder
pub trait EnvAccessLintExt {
    /// Build a lint rule forbidding direct process.env access
    fn env_access(&mut self) -> EnvAccessLintBuilder<'_>;
}

impl EnvAccessLintExt for LintBuilder {
    fn env_access(&mut self) -> EnvAccessLintBuilder<'_> {
        EnvAccessLintBuilder { parent: self }
    }
}

/// Initial builder for creating an env-access lint
pub struct EnvAccessLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> EnvAccessLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> EnvAccessNamedBuilder<'a> {
        EnvAccessNamedBuilder {
            parent: self.parent,
            name: name.into(),
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct EnvAccessNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    severity: Severity,
}

impl<'a> EnvAccessNamedBuilder<'a> {
    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::EnvAccess(EnvAccessLint {
            name: self.name,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for EnvAccessLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        // Env access can leak from any layer, so propose this for every project
        for context in contexts {
            builder
                .env_access()
                .lint_named(format!("no_direct_env_access_{}", context.project_root))
                .with_severity(Severity::Error)
                .build();
        }
    }
}
