// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::lint_builder::LintBuilder;
use crate::{ConfiguredLint, GenerateFromContext, Severity, context_has_layer};
use heeler_common::project_context::ProjectContext;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Requires every exported function in a utils file to be covered by a
/// property-based test in the sibling test file.
///
/// Exclusion patterns are regexes tested against `"{file}:{function}"` and
/// against the bare function name; a match on either opts the function out.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PropertyTestsLint {
    pub name: String,
    /// Regex patterns opting functions out of the coverage requirement
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    /// When false, a missing test file is tolerated silently; a present one
    /// is still graded
    #[serde(default = "default_true")]
    pub require_test_file: bool,
    pub severity: Severity,
}

/// Extension trait that adds property-test coverage linting to LintBuilder
pub trait PropertyTestsLintExt {
    /// Build a lint rule requiring property tests for exported utils functions
    fn property_tests(&mut self) -> PropertyTestsLintBuilder<'_>;
}

impl PropertyTestsLintExt for LintBuilder {
    fn property_tests(&mut self) -> PropertyTestsLintBuilder<'_> {
        PropertyTestsLintBuilder { parent: self }
    }
}

/// Initial builder for creating a property-tests lint
pub struct PropertyTestsLintBuilder<'a> {
    parent: &'a mut LintBuilder,
}

impl<'a> PropertyTestsLintBuilder<'a> {
    /// Give the lint a name
    pub fn lint_named(self, name: impl Into<String>) -> PropertyTestsNamedBuilder<'a> {
        PropertyTestsNamedBuilder {
            parent: self.parent,
            name: name.into(),
            exclude_patterns: Vec::new(),
            require_test_file: true,
            severity: Severity::default(),
        }
    }
}

/// Builder used after naming the lint
pub struct PropertyTestsNamedBuilder<'a> {
    parent: &'a mut LintBuilder,
    name: String,
    exclude_patterns: Vec<String>,
    require_test_file: bool,
    severity: Severity,
}

impl<'a> PropertyTestsNamedBuilder<'a> {
    /// Add one exclusion pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Replace the exclusion pattern list
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Whether a missing sibling test file is itself a finding
    pub fn require_test_file(mut self, require: bool) -> Self {
        self.require_test_file = require;
        self
    }

    /// Set the severity the lint reports with
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Finalize the lint and return to the parent builder
    pub fn build(self) -> &'a mut LintBuilder {
        let lint = ConfiguredLint::PropertyTests(PropertyTestsLint {
            name: self.name,
            exclude_patterns: self.exclude_patterns,
            require_test_file: self.require_test_file,
            severity: self.severity,
        });
        self.parent.push(lint);
        self.parent
    }
}

impl GenerateFromContext for PropertyTestsLint {
    fn generate_from_contexts(contexts: &[ProjectContext], builder: &mut LintBuilder) {
        for context in contexts {
            if !context_has_layer(context, "utils") {
                continue;
            }
            // Advisory by default; teams tighten this to Error once the
            // backlog of uncovered functions is cleared
            builder
                .property_tests()
                .lint_named(format!("require_property_tests_{}", context.project_root))
                .require_test_file(true)
                .with_severity(Severity::Warn)
                .build();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heeler_common::project_context::FileInfo;

    #[test]
    fn test_builder_collects_exclusions_in_order() {
        let mut builder = LintBuilder::new();
        builder
            .property_tests()
            .lint_named("require_property_tests")
            .exclude(r"^debug\w*$")
            .exclude("src/utils/format.ts:padLeft")
            .require_test_file(false)
            .with_severity(Severity::Warn)
            .build();

        assert_eq!(builder.lints.len(), 1);
        if let ConfiguredLint::PropertyTests(lint) = &builder.lints[0] {
            assert_eq!(lint.name, "require_property_tests");
            assert_eq!(
                lint.exclude_patterns,
                vec![
                    r"^debug\w*$".to_string(),
                    "src/utils/format.ts:padLeft".to_string()
                ]
            );
            assert!(!lint.require_test_file);
        } else {
            panic!("Expected PropertyTests lint");
        }
    }

    #[test]
    fn test_defaults_without_options() {
        let mut builder = LintBuilder::new();
        builder
            .property_tests()
            .lint_named("require_property_tests")
            .build();

        if let ConfiguredLint::PropertyTests(lint) = &builder.lints[0] {
            assert!(lint.exclude_patterns.is_empty());
            assert!(lint.require_test_file);
            assert_eq!(lint.severity, Severity::Warn);
        } else {
            panic!("Expected PropertyTests lint");
        }
    }

    #[test]
    fn test_generation_needs_utils_layer() {
        let mut with_utils = ProjectContext::new();
        with_utils.project_root = "orders-api".to_string();
        with_utils.files = vec![FileInfo {
            name: "src/utils/currency.ts".to_string(),
            layer: "utils".to_string(),
            applicable_lints: vec![],
        }];

        let mut without_utils = ProjectContext::new();
        without_utils.project_root = "gateway".to_string();

        let mut builder = LintBuilder::new();
        PropertyTestsLint::generate_from_contexts(&[with_utils, without_utils], &mut builder);

        assert_eq!(builder.lints.len(), 1);
        assert_eq!(builder.lints[0].name(), "require_property_tests_orders-api");
    }
}
