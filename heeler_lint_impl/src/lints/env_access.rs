// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use crate::ArchitectureLintRule;
use crate::helpers::queries::normalize_path;
use crate::lint_context::LintContext;
use crate::matchers::match_env_access;
use anyhow::Result;
use heeler_lint_config::{ConfiguredLint, Severity};
use tree_sitter::Node;

/// Paths where direct environment access is allowed: the typed env module
/// itself, its validators, and test code.
const EXEMPT_PATH_MARKERS: [&str; 5] = ["env.ts", "validate-env", "test/", ".test.", ".spec."];

static MESSAGES: &[(&str, &str)] = &[(
    "directEnvAccess",
    "Direct access to process.env.{{property}} bypasses the validated environment configuration",
)];

///
/// Flags every `process.env` read outside the typed configuration module,
/// so environment handling stays behind the validated env layer.
///
pub struct EnvAccessRule {
    name: String,
    severity: Severity,
}

impl EnvAccessRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::EnvAccess(c) = config {
            Ok(Box::new(Self {
                name: c.name.clone(),
                severity: c.severity,
            }))
        } else {
            panic!("Expected an EnvAccess lint configuration")
        }
    }
}

impl ArchitectureLintRule for EnvAccessRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "no-direct-env-access"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        MESSAGES
    }

    fn applies_to_file(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        !EXEMPT_PATH_MARKERS
            .iter()
            .any(|marker| normalized.contains(marker))
    }

    fn check_member_expression(&self, ctx: &mut LintContext<'_>, node: Node<'_>) {
        if let Some(access) = match_env_access(ctx.file(), node) {
            ctx.report(
                node,
                "directEnvAccess",
                &[("property", access.property)],
                "Read configuration through the validated env module instead of process.env",
            );
        }
    }
}
