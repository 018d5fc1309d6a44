use anyhow::Context;
use heeler_common::project_context::ProjectContext;
use heeler_lint_config::{
    DependencyInjectionLint, EnvAccessLint, ErrorHandlingLint, GenerateFromContext,
    InputValidationLint, LintBuilder, PluginWrapperLint, PropertyTestsLint, ResultTypeLint,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Propose a lint configuration from a scanned project context. Each lint
/// type decides for itself whether the project's layers warrant it.
pub fn builder_from_context(context: &ProjectContext) -> LintBuilder {
    let mut builder = LintBuilder::new();
    let contexts = std::slice::from_ref(context);

    EnvAccessLint::generate_from_contexts(contexts, &mut builder);
    ErrorHandlingLint::generate_from_contexts(contexts, &mut builder);
    InputValidationLint::generate_from_contexts(contexts, &mut builder);
    DependencyInjectionLint::generate_from_contexts(contexts, &mut builder);
    PluginWrapperLint::generate_from_contexts(contexts, &mut builder);
    PropertyTestsLint::generate_from_contexts(contexts, &mut builder);
    ResultTypeLint::generate_from_contexts(contexts, &mut builder);

    builder
}

/// Write the proposed configuration to heeler.generated.{project}.ron in the
/// project root, returning the path written
pub fn generate_config_file(
    project_root: &Path,
    context: &ProjectContext,
) -> anyhow::Result<PathBuf> {
    let builder = builder_from_context(context);

    let file_name = format!("heeler.generated.{}.ron", context.project_root);
    let path = project_root.join(&file_name);
    builder
        .write_to_file(&path)
        .with_context(|| format!("Failed to write configuration to {}", path.display()))?;

    Ok(path)
}

/// Find previously generated config files in the project root
pub fn find_generated_configs(project_root: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(project_root) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with("heeler.generated.") && name.ends_with(".ron"))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use heeler_common::project_context::FileInfo;
    use heeler_lint_config::ConfiguredLint;
    use tempfile::TempDir;

    fn context_with_layers(layers: &[&str]) -> ProjectContext {
        let mut context = ProjectContext::new();
        context.project_root = "api".to_string();
        context.files = layers
            .iter()
            .map(|layer| FileInfo {
                name: format!("src/{layer}/a.ts"),
                layer: layer.to_string(),
                applicable_lints: Vec::new(),
            })
            .collect();
        context
    }

    #[test]
    fn test_full_project_proposes_every_lint() {
        let context = context_with_layers(&["routes", "services", "plugins", "utils", "config"]);

        let builder = builder_from_context(&context);

        assert_eq!(builder.lints.len(), 7);
        let count = |matcher: fn(&ConfiguredLint) -> bool| {
            builder.lints.iter().filter(|l| matcher(l)).count()
        };
        assert_eq!(count(|l| matches!(l, ConfiguredLint::EnvAccess(_))), 1);
        assert_eq!(count(|l| matches!(l, ConfiguredLint::ErrorHandling(_))), 1);
        assert_eq!(count(|l| matches!(l, ConfiguredLint::InputValidation(_))), 1);
        assert_eq!(
            count(|l| matches!(l, ConfiguredLint::DependencyInjection(_))),
            1
        );
        assert_eq!(count(|l| matches!(l, ConfiguredLint::PluginWrapper(_))), 1);
        assert_eq!(count(|l| matches!(l, ConfiguredLint::PropertyTests(_))), 1);
        assert_eq!(count(|l| matches!(l, ConfiguredLint::ResultType(_))), 1);

        // Names carry the project so multi-project context merges stay distinct
        assert_eq!(builder.lints[0].name(), "no_direct_env_access_api");
    }

    #[test]
    fn test_config_only_project_proposes_env_access_only() {
        let context = context_with_layers(&["config"]);

        let builder = builder_from_context(&context);

        assert_eq!(builder.lints.len(), 1);
        assert!(matches!(builder.lints[0], ConfiguredLint::EnvAccess(_)));
    }

    #[test]
    fn test_generate_config_file_is_readable_back() {
        let temp_dir = TempDir::new().unwrap();
        let context = context_with_layers(&["routes", "utils"]);

        let path = generate_config_file(temp_dir.path(), &context).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "heeler.generated.api.ron"
        );

        // routes -> error handling + input validation, utils -> property
        // tests + result type, env access always
        let loaded = LintBuilder::read_from_file(&path).unwrap();
        assert_eq!(loaded.lints.len(), 5);
    }

    #[test]
    fn test_find_generated_configs_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        for name in [
            "heeler.generated.other.ron",
            "heeler.generated.api.ron",
            "heeler.ron",
            "notes.txt",
        ] {
            fs::write(temp_dir.path().join(name), "[]\n").unwrap();
        }

        assert_eq!(
            find_generated_configs(temp_dir.path()),
            vec![
                "heeler.generated.api.ron".to_string(),
                "heeler.generated.other.ron".to_string()
            ]
        );
    }

    #[test]
    fn test_find_generated_configs_missing_directory() {
        assert!(find_generated_configs(Path::new("/nonexistent/heeler-project")).is_empty());
    }
}
