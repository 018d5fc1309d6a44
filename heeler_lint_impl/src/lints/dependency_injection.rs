use crate::ArchitectureLintRule;
use crate::helpers::queries::in_layer;
use crate::lint_context::LintContext;
use crate::matchers::{declares_class, declares_constructor};
use anyhow::Result;
use heeler_lint_config::{ConfiguredLint, Severity};

static MESSAGES: &[(&str, &str)] = &[(
    "missingConstructor",
    "Service class declares no constructor; collaborators should be injected, not imported",
)];

///
/// Requires service classes to take their collaborators through a
/// constructor. Shallow whole-file check: a class keyword without a
/// constructor anywhere in the file trips it.
///
pub struct DependencyInjectionRule {
    name: String,
    severity: Severity,
}

impl DependencyInjectionRule {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(config: &ConfiguredLint) -> Result<Box<dyn ArchitectureLintRule + Send>> {
        if let ConfiguredLint::DependencyInjection(c) = config {
            Ok(Box::new(Self {
                name: c.name.clone(),
                severity: c.severity,
            }))
        } else {
            panic!("Expected a DependencyInjection lint configuration")
        }
    }
}

impl ArchitectureLintRule for DependencyInjectionRule {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn lint_id(&self) -> &'static str {
        "service-dependency-injection"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        MESSAGES
    }

    fn applies_to_file(&self, path: &str) -> bool {
        in_layer(path, "services")
    }

    fn check_source_file(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file();
        if declares_class(&file.text) && !declares_constructor(&file.text) {
            ctx.report(
                file.root(),
                "missingConstructor",
                &[],
                "Add a constructor that receives the service's dependencies",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture_lint_rule::run_lint_on_file;
    use crate::source_file::SourceFile;
    use heeler_lint_config::DependencyInjectionLint;
    use std::path::Path;

    fn run(path: &str, source: &str) -> Vec<crate::lint_result::LintResult> {
        let rule = DependencyInjectionRule::new(&ConfiguredLint::DependencyInjection(
            DependencyInjectionLint {
                name: "service_dependency_injection".to_string(),
                severity: Severity::Error,
            },
        ))
        .unwrap();
        if !rule.applies_to_file(path) {
            return Vec::new();
        }
        let file = SourceFile::parse(path.to_string(), source.to_string()).unwrap();
        run_lint_on_file(rule.as_ref(), &file, Path::new("."))
    }

    #[test]
    fn test_reports_class_without_constructor() {
        let source = r#"
            import { db } from '../db';
            export class ReportService {
                generate() { return db.query('...'); }
            }
        "#;
        let results = run("src/services/report_service.ts", source);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message_id, "missingConstructor");
    }

    #[test]
    fn test_class_with_constructor_passes() {
        let source = r#"
            export class UserService {
                constructor(private readonly db: Database) {}
                findById(id: string) { return this.db.users.find(id); }
            }
        "#;
        assert!(run("src/services/user_service.ts", source).is_empty());
    }

    #[test]
    fn test_function_only_service_passes() {
        let source = "export async function sendWelcomeEmail(user: User) {}";
        assert!(run("src/services/email.ts", source).is_empty());
    }

    #[test]
    fn test_classes_outside_services_out_of_scope() {
        let source = "export class Whatever {}";
        assert!(run("src/utils/whatever.ts", source).is_empty());
    }
}
