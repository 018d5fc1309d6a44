// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::path::{Path, PathBuf};

/// Find the project root by walking up from `start` to the first directory
/// containing a package.json
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start.to_path_buf());
    while let Some(current) = dir {
        if current.join("package.json").exists() {
            return Some(current);
        }
        dir = current.parent().map(Path::to_path_buf);
    }
    None
}

/// Find heeler.ron in the project root, starting the search from `start`
pub fn find_project_heeler_ron(start: &Path) -> Option<PathBuf> {
    let root = find_project_root(start)?;
    let heeler_ron = root.join("heeler.ron");
    if heeler_ron.exists() {
        Some(heeler_ron)
    } else {
        None
    }
}
