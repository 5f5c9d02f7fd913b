//! Lexical path helpers shared by the assembler steps.
//!
//! Paths are never canonicalized here; the bundler receives absolute,
//! cleaned paths and does its own resolution.

use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Join `path` onto `root` (unless it is already absolute) and clean it.
pub fn resolve_path(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.clean()
    } else {
        root.join(path).clean()
    }
}

/// Render a path with forward slashes only.
pub fn to_slash(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Last path segment of a bundle name (`lazy/vendor` -> `vendor`).
pub fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_against_root() {
        let root = Path::new("/work/app");
        assert_eq!(
            resolve_path(root, "src/../src/main.ts"),
            PathBuf::from("/work/app/src/main.ts")
        );
    }

    #[test]
    fn keeps_absolute_paths() {
        let root = Path::new("/work/app");
        assert_eq!(
            resolve_path(root, "/other/./main.ts"),
            PathBuf::from("/other/main.ts")
        );
    }

    #[test]
    fn slashes_are_normalized() {
        assert_eq!(to_slash("a\\b\\c"), "a/b/c");
    }

    #[test]
    fn basename_of_bundle_name() {
        assert_eq!(basename("lazy/vendor"), "vendor");
        assert_eq!(basename("scripts"), "scripts");
    }
}
