use crate::ArchitectureLintRule;
use crate::helpers::queries::in_layer;
use crate::lint_context::LintContext;
use crate::matchers::match_throw_new_error;
use anyhow::Result;
use heeler_lint_config::{ConfiguredLint, Severity};
use tree_sitter::Node;

static MESSAGES: &[(&str, &str)] = &[(
    "noThrowInRoutes",
    "Route handler throws a raw Error instead of replying with a structured error response",
)];

///
/// Keeps raw `throw new Error(...)` out of route handlers, where it would
/// bypass Fastify's error envelope.
///
pub struct ErrorHandlingRule {
    name: String,
    severity: Severity,
}

impl ErrorHandlingRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::ErrorHandling(c) = config {
            Ok(Box::new(Self {
                name: c.name.clone(),
                severity: c.severity,
            }))
        } else {
            panic!("Expected an ErrorHandling lint configuration")
        }
    }
}

impl ArchitectureLintRule for ErrorHandlingRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "fastify-error-handling"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        MESSAGES
    }

    fn applies_to_file(&self, path: &str) -> bool {
        in_layer(path, "routes")
    }

    fn check_throw_statement(&self, ctx: &mut LintContext<'_>, node: Node<'_>) {
        if match_throw_new_error(ctx.file(), node) {
            ctx.report(
                node,
                "noThrowInRoutes",
                &[],
                "Reply with reply.code(...).send(...) or throw a typed HTTP error",
            );
        }
    }
}
