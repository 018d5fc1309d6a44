mod coverage;
mod extractor;
mod lint;
mod test_locator;

pub use extractor::extract_exported_functions;
pub use lint::PropertyTestsRule;
pub use test_locator::{LocatorError, expected_test_path};
