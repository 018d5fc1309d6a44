use regex::Regex;

///
/// The six shapes of property-test coverage the heuristic recognises.
/// `{fn}` is replaced with the escaped function name before compiling.
/// Matching is a disjunction: any single hit marks the function covered.
/// This is a heuristic, not a proof; a covered function can still be
/// flagged when its tests use none of these shapes.
///
const COVERAGE_PATTERNS: [&str; 6] = [
    // A describe/it/test title naming the function and "propert…"
    r#"(?is)(?:describe|it|test)\s*\(\s*['"`][^'"`]*\b{fn}\b[^'"`]*propert"#,
    // A describe/it/test title with "propert…" before the function name
    r#"(?is)(?:describe|it|test)\s*\(\s*['"`][^'"`]*propert[^'"`]*\b{fn}\b"#,
    // The function invoked shortly before an assert(...property( pair
    r#"(?s)\b{fn}\s*\(.{0,300}?assert\s*\(.{0,60}?property\s*\("#,
    // An assert(...property( pair followed shortly by the invocation
    r#"(?s)assert\s*\(.{0,60}?property\s*\(.{0,300}?\b{fn}\s*\("#,
    // Prose marker: "property-based" near the function name
    r#"(?is)propert(?:y|ies)[-\s]based.{0,200}?\b{fn}\b"#,
    // Invariant wording near the function name, either order
    r#"(?is)(?:\b{fn}\b.{0,200}?invariant|invariant.{0,200}?\b{fn}\b)"#,
];

/// Both framework invocations that must be present before any
/// per-function matching is attempted.
pub fn has_property_test_calls(test_text: &str) -> bool {
    test_text.contains("assert(") && test_text.contains("property(")
}

///
/// Returns true when any coverage pattern recognises a property test for
/// the named function. A pattern that fails to compile for a given name
/// simply never matches.
///
pub fn function_has_property_test(test_text: &str, function_name: &str) -> bool {
    let escaped = regex::escape(function_name);

    COVERAGE_PATTERNS.iter().any(|template| {
        let pattern = template.replace("{fn}", &escaped);
        match Regex::new(&pattern) {
            Ok(re) => re.is_match(test_text),
            Err(_) => false,
        }
    })
}

///
/// Splits an exported-function set into the functions lacking property
/// tests. When the file never invokes the property-test framework at all,
/// the whole set is missing.
///
pub fn missing_property_tests(test_text: &str, functions: &[String]) -> Vec<String> {
    if !has_property_test_calls(test_text) {
        return functions.to_vec();
    }

    functions
        .iter()
        .filter(|name| !function_has_property_test(test_text, name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COVERED_TEST: &str = r#"
        import fc from 'fast-check';
        import { calculateTotal } from '../../src/utils/currency';

        describe('calculateTotal - properties', () => {
            it('is order independent', () => {
                fc.assert(
                    fc.property(fc.array(lineItem()), (items) => {
                        expect(calculateTotal(items)).toBe(calculateTotal([...items].reverse()));
                    })
                );
            });
        });
    "#;

    #[test]
    fn test_has_property_test_calls() {
        assert!(has_property_test_calls(COVERED_TEST));
        assert!(!has_property_test_calls("describe('x', () => {});"));
        // Both calls are required, not either
        assert!(!has_property_test_calls("fc.assert(plain());"));
        assert!(!has_property_test_calls("fc.property(fc.nat());"));
    }

    #[test]
    fn test_title_pattern_covers_function() {
        assert!(function_has_property_test(COVERED_TEST, "calculateTotal"));
    }

    #[test]
    fn test_uncovered_function_is_missed_by_every_pattern() {
        assert!(!function_has_property_test(COVERED_TEST, "roundMoney"));
    }

    #[test]
    fn test_proximity_pattern_covers_call_inside_property() {
        // No title mentions the function; only the invocation near the
        // assert/property pair does
        let text = r#"
            it('keeps sums stable', () => {
                fc.assert(fc.property(fc.array(fc.nat()), (xs) => {
                    return sumAll(xs) === sumAll([...xs].sort());
                }));
            });
        "#;
        assert!(function_has_property_test(text, "sumAll"));
    }

    #[test]
    fn test_prose_markers_cover_function() {
        let prose = "// Property-based coverage for padLeft lives here\nassert(property(padding));";
        assert!(function_has_property_test(prose, "padLeft"));

        let invariant = "test('padLeft length invariant', () => { assert(property(x)); });";
        assert!(function_has_property_test(invariant, "padLeft"));
    }

    #[test]
    fn test_missing_property_tests_without_framework_calls_reports_all() {
        let functions = vec!["calculateTotal".to_string(), "roundMoney".to_string()];
        let text = "describe('calculateTotal - properties', () => {});";

        assert_eq!(missing_property_tests(text, &functions), functions);
    }

    #[test]
    fn test_missing_property_tests_filters_covered() {
        let functions = vec!["calculateTotal".to_string(), "roundMoney".to_string()];

        assert_eq!(
            missing_property_tests(COVERED_TEST, &functions),
            vec!["roundMoney".to_string()]
        );
    }

    #[test]
    fn test_regex_metacharacters_in_names_are_escaped() {
        // Extracted names are word characters in practice, but the
        // matcher must not blow up on anything else
        assert!(!function_has_property_test(COVERED_TEST, "calc(Total"));
    }
}
