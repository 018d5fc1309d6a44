// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::ArchitectureLintRule;
use crate::helpers::queries::{in_layer, is_example_path, is_test_like_path};
use crate::lint_context::LintContext;
use crate::matchers::{
    enclosing_async_function, function_name, has_result_return_type, is_async_function,
    match_throw_new_error,
};
use anyhow::Result;
use heeler_lint_config::{ConfiguredLint, Severity};
use tree_sitter::Node;

static MESSAGES: &[(&str, &str)] = &[
    (
        "missingResultType",
        "Async function '{{functionName}}' does not declare a Result return type",
    ),
    (
        "asyncThrows",
        "Async function '{{functionName}}' throws instead of returning an error Result",
    ),
];

///
/// Requires async functions in the services and utils layers to declare a
/// Result-style return type, and flags `throw new Error(...)` inside any
/// async function in scope. Which layers are enforced, and whether test
/// files keep their throw exemption, comes from configuration.
///
pub struct ResultTypeRule {
    name: String,
    enforce_in_services: bool,
    enforce_in_utils: bool,
    allow_throw_in_tests: bool,
    severity: Severity,
}

impl ResultTypeRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::ResultType(c) = config {
            Ok(Box::new(Self {
                name: c.name.clone(),
                enforce_in_services: c.enforce_in_services,
                enforce_in_utils: c.enforce_in_utils,
                allow_throw_in_tests: c.allow_throw_in_tests,
                severity: c.severity,
            }))
        } else {
            panic!("Expected a ResultType lint configuration")
        }
    }

    fn in_enforced_layer(&self, path: &str) -> bool {
        (self.enforce_in_services && in_layer(path, "services"))
            || (self.enforce_in_utils && in_layer(path, "utils"))
    }
}

impl ArchitectureLintRule for ResultTypeRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "require-result-type"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        MESSAGES
    }

    fn applies_to_file(&self, path: &str) -> bool {
        if is_example_path(path) || !self.in_enforced_layer(path) {
            return false;
        }
        if is_test_like_path(path) {
            // Test files stay in scope only when their throws are graded too
            return !self.allow_throw_in_tests;
        }
        true
    }

    fn check_function(&self, ctx: &mut LintContext<'_>, node: Node<'_>) {
        let file = ctx.file();

        // The return-type requirement never applies to test files, even
        // when the file is in scope for the throw check
        if is_test_like_path(&file.path) {
            return;
        }
        if !is_async_function(node) {
            return;
        }
        let Some(name) = function_name(file, node) else {
            return;
        };
        // Constructors and underscore-prefixed internals are exempt
        if name == "constructor" || name.starts_with('_') {
            return;
        }
        if has_result_return_type(file, node) {
            return;
        }

        ctx.report(
            node,
            "missingResultType",
            &[("functionName", name)],
            "Declare Result<T, E> or ServiceResult<T> so callers handle failures explicitly",
        );
    }

    fn check_throw_statement(&self, ctx: &mut LintContext<'_>, node: Node<'_>) {
        let file = ctx.file();
        if !match_throw_new_error(file, node) {
            return;
        }
        let Some((_, name)) = enclosing_async_function(file, node) else {
            return;
        };

        ctx.report(
            node,
            "asyncThrows",
            &[("functionName", name)],
            "Return err(...) from async functions instead of throwing",
        );
    }
}
