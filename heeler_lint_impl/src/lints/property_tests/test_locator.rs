use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

///
/// Failure modes of the test-file lookup. The lint collapses both
/// variants into "no test file" rather than surfacing an error; the
/// distinction exists so unit tests can tell a missing file from an
/// unreadable one.
///
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("no test file at {0}")]
    NotFound(PathBuf),

    #[error("test file at {path} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

///
/// Maps a project-relative source path to the expected test file path:
/// the first `src` directory segment becomes `test`, and a trailing
/// `.ts` becomes `.test.ts`. The mapping is purely textual; existence is
/// the caller's problem.
///
pub fn expected_test_path(source_path: &str) -> String {
    let relocated = if let Some(rest) = source_path.strip_prefix("src/") {
        format!("test/{rest}")
    } else {
        source_path.replacen("/src/", "/test/", 1)
    };

    match relocated.strip_suffix(".ts") {
        Some(stem) => format!("{stem}.test.ts"),
        None => relocated,
    }
}

///
/// Reads the expected test file for a source file, resolving the
/// project-relative path against `project_root`. Returns the relative
/// test path (for messages) together with its contents.
///
pub fn read_test_file(
    project_root: &Path,
    source_path: &str,
) -> Result<(String, String), LocatorError> {
    let test_path = expected_test_path(source_path);
    let absolute = project_root.join(&test_path);

    if !absolute.exists() {
        return Err(LocatorError::NotFound(absolute));
    }

    match fs::read_to_string(&absolute) {
        Ok(text) => Ok((test_path, text)),
        Err(source) => Err(LocatorError::Unreadable {
            path: absolute,
            source,
        }),
    }
}
