///
/// Path classification helpers. Lint rules scope themselves by where a
/// file sits in the project tree; these keep the path conventions in one
/// place.
///

/// Architectural layers the lint rules know about, in the order they are
/// reported by `print-files`.
pub const KNOWN_LAYERS: [&str; 5] = ["routes", "services", "plugins", "utils", "config"];

/// Returns the path with forward slashes, whatever separators the
/// filesystem walk produced.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

///
/// Returns true if the path sits under the given layer directory. The
/// layer must appear as a whole path segment: `src/routes/users.ts` is in
/// the `routes` layer, `src/reroutes.ts` is not.
///
pub fn in_layer(path: &str, layer: &str) -> bool {
    let normalized = normalize_path(path);
    normalized.contains(&format!("/{layer}/")) || normalized.starts_with(&format!("{layer}/"))
}

/// Returns true for test and spec files, wherever they live.
pub fn is_test_like_path(path: &str) -> bool {
    let normalized = normalize_path(path);
    normalized.contains(".test.")
        || normalized.contains(".spec.")
        || normalized.contains("/test/")
        || normalized.starts_with("test/")
}

/// Returns true for example and fixture-style files.
pub fn is_example_path(path: &str) -> bool {
    normalize_path(path).contains("example")
}

///
/// The architectural layer a file belongs to, if it sits under one of the
/// directories the lint rules care about. A file under several layer
/// directories takes the first match in `KNOWN_LAYERS` order.
///
pub fn file_layer(path: &str) -> Option<&'static str> {
    KNOWN_LAYERS.into_iter().find(|layer| in_layer(path, layer))
}
