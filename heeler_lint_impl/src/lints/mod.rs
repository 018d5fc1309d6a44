pub mod configuration_factory;
pub mod dependency_injection;
pub mod env_access;
pub mod error_handling;
pub mod input_validation;
pub mod plugin_wrapper;
pub mod property_tests;
pub mod result_type;

pub use dependency_injection::DependencyInjectionRule;
pub use env_access::EnvAccessRule;
pub use error_handling::ErrorHandlingRule;
pub use input_validation::InputValidationRule;
pub use plugin_wrapper::PluginWrapperRule;
pub use property_tests::PropertyTestsRule;
pub use result_type::ResultTypeRule;
