// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use super::coverage::{has_property_test_calls, missing_property_tests};
use super::extractor::extract_exported_functions;
use super::test_locator::{expected_test_path, read_test_file};
use crate::ArchitectureLintRule;
use crate::helpers::queries::{in_layer, is_test_like_path};
use crate::lint_context::LintContext;
use anyhow::{Context, Result};
use heeler_lint_config::{ConfiguredLint, Severity};
use regex::Regex;
use std::path::Path;

static MESSAGES: &[(&str, &str)] = &[
    (
        "missingPropertyTest",
        "Exported function '{{functionName}}' has no property-based test coverage in {{testFile}}",
    ),
    (
        "noPropertyTestFile",
        "No test file found at {{testFile}} covering exported functions: {{functions}}",
    ),
];

/// Outcome of analysing the expected test file for one source file.
struct TestFileAnalysis {
    test_path: String,
    exists: bool,
    has_property_tests: bool,
    missing: Vec<String>,
}

///
/// Requires property-based test coverage for every exported function in
/// the utils layer. Exported names are extracted from raw text, the
/// sibling test file is located and read, and six coverage patterns
/// decide per function whether a property test exists.
///
pub struct PropertyTestsRule {
    name: String,
    exclude_patterns: Vec<Regex>,
    require_test_file: bool,
    severity: Severity,
}

impl PropertyTestsRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::PropertyTests(c) = config {
            let exclude_patterns = c
                .exclude_patterns
                .iter()
                .map(|pattern| {
                    Regex::new(pattern).with_context(|| {
                        format!("invalid exclude pattern '{pattern}' in lint '{}'", c.name)
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Box::new(Self {
                name: c.name.clone(),
                exclude_patterns,
                require_test_file: c.require_test_file,
                severity: c.severity,
            }))
        } else {
            panic!("Expected a PropertyTests lint configuration")
        }
    }

    ///
    /// Exclusions are matched against `path:function` and against the
    /// bare function name, and they are evaluated before any test-file
    /// I/O, so an excluded function never triggers a read.
    ///
    fn is_excluded(&self, path: &str, function_name: &str) -> bool {
        let qualified = format!("{path}:{function_name}");
        self.exclude_patterns
            .iter()
            .any(|re| re.is_match(&qualified) || re.is_match(function_name))
    }

    fn analyse(
        &self,
        project_root: &Path,
        source_path: &str,
        functions: &[String],
    ) -> TestFileAnalysis {
        match read_test_file(project_root, source_path) {
            Ok((test_path, text)) => TestFileAnalysis {
                test_path,
                exists: true,
                has_property_tests: has_property_test_calls(&text),
                missing: missing_property_tests(&text, functions),
            },
            // Missing and unreadable collapse to the same "not found"
            // shape; this rule must never fail the lint pass over I/O
            Err(_) => TestFileAnalysis {
                test_path: expected_test_path(source_path),
                exists: false,
                has_property_tests: false,
                missing: functions.to_vec(),
            },
        }
    }
}

impl ArchitectureLintRule for PropertyTestsRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "require-property-tests"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        MESSAGES
    }

    fn applies_to_file(&self, path: &str) -> bool {
        in_layer(path, "utils") && !is_test_like_path(path)
    }

    fn applies_to_function(&self, path: &str, function_name: &str) -> bool {
        self.applies_to_file(path) && !self.is_excluded(path, function_name)
    }

    fn check_source_file(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file();

        let functions: Vec<String> = extract_exported_functions(&file.text)
            .into_iter()
            .filter(|name| !self.is_excluded(&file.path, name))
            .collect();
        if functions.is_empty() {
            return;
        }

        let analysis = self.analyse(ctx.project_root(), &file.path, &functions);
        let root = file.root();

        if !analysis.exists {
            if self.require_test_file {
                ctx.report(
                    root,
                    "noPropertyTestFile",
                    &[
                        ("testFile", analysis.test_path.clone()),
                        ("functions", functions.join(", ")),
                    ],
                    "Create the test file and cover each exported function with fc.assert(fc.property(...))",
                );
            }
            return;
        }

        let help = if analysis.has_property_tests {
            "Add a property-based test exercising this function's invariants"
        } else {
            "The test file never calls the property-testing framework; add fc.assert(fc.property(...)) cases"
        };

        for name in &analysis.missing {
            ctx.report(
                root,
                "missingPropertyTest",
                &[
                    ("functionName", name.clone()),
                    ("testFile", analysis.test_path.clone()),
                ],
                help,
            );
        }
    }
}
