use crate::ArchitectureLintRule;
use crate::helpers::queries::in_layer;
use crate::lint_context::LintContext;
use crate::matchers::wraps_fastify_plugin;
use anyhow::Result;
use heeler_lint_config::{ConfiguredLint, Severity};

static MESSAGES: &[(&str, &str)] = &[(
    "missingPluginWrapper",
    "Fastify plugin is not wrapped with fastify-plugin",
)];

///
/// Requires every file in the plugins layer to go through the
/// fastify-plugin wrapper, so decorators registered there cross
/// encapsulation boundaries.
///
pub struct PluginWrapperRule {
    name: String,
    severity: Severity,
}

impl PluginWrapperRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::PluginWrapper(c) = config {
            Ok(Box::new(Self {
                name: c.name.clone(),
                severity: c.severity,
            }))
        } else {
            panic!("Expected a PluginWrapper lint configuration")
        }
    }
}

impl ArchitectureLintRule for PluginWrapperRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "fastify-plugin-wrapper"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        MESSAGES
    }

    fn applies_to_file(&self, path: &str) -> bool {
        in_layer(path, "plugins")
    }

    fn check_source_file(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file();
        if !wraps_fastify_plugin(&file.text) {
            ctx.report(
                file.root(),
                "missingPluginWrapper",
                &[],
                "Export the plugin through fp(...) from fastify-plugin",
            );
        }
    }
}
