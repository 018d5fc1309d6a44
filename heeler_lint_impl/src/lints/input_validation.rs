use crate::ArchitectureLintRule;
use crate::helpers::queries::in_layer;
use crate::lint_context::LintContext;
use crate::matchers::{declares_schema, reads_request_body};
use anyhow::Result;
use heeler_lint_config::{ConfiguredLint, Severity};

static MESSAGES: &[(&str, &str)] = &[(
    "missingSchema",
    "Route reads request.body but declares no schema for validation",
)];

///
/// Requires a schema declaration in any route file that consumes a
/// request body. One whole-file substring check, one diagnostic at most.
///
pub struct InputValidationRule {
    name: String,
    severity: Severity,
}

impl InputValidationRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::InputValidation(c) = config {
            Ok(Box::new(Self {
                name: c.name.clone(),
                severity: c.severity,
            }))
        } else {
            panic!("Expected an InputValidation lint configuration")
        }
    }
}

impl ArchitectureLintRule for InputValidationRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "require-input-validation"
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

    fn check_source_file(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file();
        if reads_request_body(&file.text) && !declares_schema(&file.text) {
            ctx.report(
                file.root(),
                "missingSchema",
                &[],
                "Attach a schema with a body JSON schema to the route options",
            );
        }
    }
}
