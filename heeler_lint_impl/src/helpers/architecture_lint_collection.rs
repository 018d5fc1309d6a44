use crate::ArchitectureLintRule;

///
/// Collects a set of architecture lints configured
/// and ready to run.
///
pub struct ArchitectureLintCollection {
    lints: Vec<Box<dyn ArchitectureLintRule + Send>>,
}

impl ArchitectureLintCollection {
    pub fn new(lints: Vec<Box<dyn ArchitectureLintRule + Send>>) -> ArchitectureLintCollection {
        ArchitectureLintCollection { lints }
    }

    pub fn lints(&self) -> &Vec<Box<dyn ArchitectureLintRule + Send>> {
        &self.lints
    }

    ///
    /// The lints whose file scope covers a given project-relative path.
    /// This is what decides which rules walk which files.
    ///
    pub fn lints_for_file<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a Box<dyn ArchitectureLintRule + Send>> {
        self.lints.iter().filter(move |lint| lint.applies_to_file(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lints::configuration_factory::LintConfigurationFactory;
    use heeler_lint_config::{
        EnvAccessLintExt, ErrorHandlingLintExt, LintBuilder, PropertyTestsLintExt,
    };

    fn sample_collection() -> ArchitectureLintCollection {
        let mut builder = LintBuilder::new();
        builder.env_access().lint_named("env_access").build();
        builder
            .error_handling()
            .lint_named("route_error_handling")
            .build();
        builder
            .property_tests()
            .lint_named("utils_property_tests")
            .build();

        let lints = LintConfigurationFactory::from_builder(&builder).unwrap();
        ArchitectureLintCollection::new(lints)
    }

    #[test]
    fn test_collection_keeps_configuration_order() {
        let collection = sample_collection();
        let names: Vec<String> = collection.lints().iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            vec!["env_access", "route_error_handling", "utils_property_tests"]
        );
    }

    #[test]
    fn test_lints_for_file_filters_by_scope() {
        let collection = sample_collection();

        // A route file picks up env access and route error handling, but
        // not the utils property-test rule
        let for_route: Vec<String> = collection
            .lints_for_file("src/routes/users.ts")
            .map(|l| l.name())
            .collect();
        assert_eq!(for_route, vec!["env_access", "route_error_handling"]);

        let for_utils: Vec<String> = collection
            .lints_for_file("src/utils/currency.ts")
            .map(|l| l.name())
            .collect();
        assert_eq!(for_utils, vec!["env_access", "utils_property_tests"]);
    }
}
