//! Filesystem capability used by the assembler.
//!
//! Every probe the assembler makes goes through [`ProjectHost`], so the
//! whole assembly can run against an in-memory [`FixedHost`].

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::to_slash;

/// Package whose flattened module directories feed the alias table.
const ALIAS_PACKAGE: &str = "rxjs";

/// Filesystem queries made during assembly.
pub trait ProjectHost {
    /// Whether a file or directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a text file, `None` when missing or unreadable.
    fn read_to_string(&self, path: &Path) -> Option<String>;

    /// Names of the direct subdirectories of `dir`, `None` when unreadable.
    fn list_dirs(&self, dir: &Path) -> Option<Vec<String>>;

    /// Closest `name` entry in `from` or any of its ancestors.
    fn find_up(&self, name: &str, from: &Path) -> Option<PathBuf> {
        let mut current = Some(from);
        while let Some(dir) = current {
            let candidate = dir.join(name);
            if self.exists(&candidate) {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }

    /// Every `name` entry from `from` upwards, stopping after `root`.
    fn find_all_up(&self, name: &str, from: &Path, root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut current = Some(from);
        while let Some(dir) = current {
            let candidate = dir.join(name);
            if self.is_dir(&candidate) {
                found.push(candidate);
            }
            if dir == root {
                break;
            }
            current = dir.parent();
        }
        found
    }

    /// Module alias table for the flattened `rxjs` build matching the
    /// output language level.
    ///
    /// Best effort: `None` whenever the package layout is not what is
    /// expected, which callers treat as "no aliases".
    fn path_mapping(&self, node_modules: &Path, es2015: bool) -> Option<IndexMap<String, String>> {
        let flavor = if es2015 { "_esm2015" } else { "_esm5" };
        let root = node_modules.join(ALIAS_PACKAGE).join(flavor);
        if !self.exists(&root.join("index.js")) {
            return None;
        }

        let mut names = self.list_dirs(&root)?;
        names.sort();

        let mut aliases = IndexMap::new();
        for name in names {
            if self.exists(&root.join(&name).join("index.js")) {
                aliases.insert(
                    format!("{ALIAS_PACKAGE}/{name}"),
                    to_slash(root.join(&name).join("index")),
                );
            }
        }
        aliases.insert(ALIAS_PACKAGE.to_string(), to_slash(root.join("index")));

        Some(aliases)
    }
}

/// [`ProjectHost`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

impl ProjectHost for NativeHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn list_dirs(&self, dir: &Path) -> Option<Vec<String>> {
        let entries = fs::read_dir(dir).ok()?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.ok()?;
            if entry.file_type().ok()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Some(names)
    }
}

/// In-memory [`ProjectHost`].
///
/// Directories are implied by the files they contain; empty ones can be
/// added explicitly.
///
/// ```
/// use ngpack_bundler::{FixedHost, ProjectHost};
/// use std::path::Path;
///
/// let host = FixedHost::new()
///     .dir("/work/node_modules")
///     .file("/work/.browserslistrc", "last 1 Chrome version");
///
/// assert_eq!(
///     host.find_up("node_modules", Path::new("/work/src")),
///     Some("/work/node_modules".into())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedHost {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl FixedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.files.insert(path, content.into());
        self
    }

    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl ProjectHost for FixedHost {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn list_dirs(&self, dir: &Path) -> Option<Vec<String>> {
        if !self.dirs.contains(dir) {
            return None;
        }
        Some(
            self.dirs
                .iter()
                .filter(|candidate| candidate.parent() == Some(dir))
                .filter_map(|candidate| candidate.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_up_walks_ancestors() {
        let host = FixedHost::new().dir("/work/node_modules");
        assert_eq!(
            host.find_up("node_modules", Path::new("/work/projects/app")),
            Some(PathBuf::from("/work/node_modules"))
        );
        assert_eq!(host.find_up("missing", Path::new("/work/projects/app")), None);
    }

    #[test]
    fn find_all_up_stops_at_root() {
        let host = FixedHost::new()
            .dir("/node_modules")
            .dir("/work/node_modules")
            .dir("/work/tools/node_modules");

        let found = host.find_all_up("node_modules", Path::new("/work/tools/shims"), Path::new("/work"));
        assert_eq!(
            found,
            vec![
                PathBuf::from("/work/tools/node_modules"),
                PathBuf::from("/work/node_modules"),
            ]
        );
    }

    #[test]
    fn find_all_up_reaches_filesystem_root_when_outside() {
        let host = FixedHost::new().dir("/node_modules").dir("/opt/node_modules");
        let found = host.find_all_up("node_modules", Path::new("/opt/shims"), Path::new("/work"));
        assert_eq!(
            found,
            vec![PathBuf::from("/opt/node_modules"), PathBuf::from("/node_modules")]
        );
    }

    #[test]
    fn path_mapping_lists_flattened_modules() {
        let host = FixedHost::new()
            .file("/nm/rxjs/_esm2015/index.js", "")
            .file("/nm/rxjs/_esm2015/operators/index.js", "")
            .file("/nm/rxjs/_esm2015/ajax/index.js", "")
            .dir("/nm/rxjs/_esm2015/internal");

        let aliases = host.path_mapping(Path::new("/nm"), true).unwrap();
        let keys: Vec<_> = aliases.keys().cloned().collect();
        assert_eq!(keys, vec!["rxjs/ajax", "rxjs/operators", "rxjs"]);
        assert_eq!(aliases["rxjs/operators"], "/nm/rxjs/_esm2015/operators/index");
        assert_eq!(aliases["rxjs"], "/nm/rxjs/_esm2015/index");
    }

    #[test]
    fn path_mapping_is_none_without_package() {
        let host = FixedHost::new().dir("/nm");
        assert!(host.path_mapping(Path::new("/nm"), false).is_none());
    }

    #[test]
    fn native_host_lists_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("rxjs/_esm5/operators")).unwrap();
        fs::write(dir.path().join("rxjs/_esm5/index.js"), "").unwrap();
        fs::write(dir.path().join("rxjs/_esm5/operators/index.js"), "").unwrap();

        let aliases = NativeHost.path_mapping(dir.path(), false).unwrap();
        assert!(aliases.contains_key("rxjs/operators"));
        assert!(aliases.contains_key("rxjs"));
        assert!(NativeHost.path_mapping(dir.path(), true).is_none());
    }
}
