//! Ambient project paths and compiler settings of one assembly.

use ngpack_config::{CompilerOptions, ScriptTarget};
use std::path::{Path, PathBuf};

use crate::paths::resolve_path;
use crate::rules::ModuleRule;

/// Shims directory used when none is configured, relative to the workspace root.
pub const DEFAULT_SHIMS_DIR: &str = "node_modules/ngpack/shims";

/// Everything the assembler needs besides the build options.
///
/// # Example
///
/// ```
/// use ngpack_bundler::ProjectContext;
/// use ngpack_config::{CompilerOptions, ScriptTarget};
///
/// let context = ProjectContext::new("/work")
///     .project_root("/work/projects/app")
///     .compiler_options(CompilerOptions::with_target(ScriptTarget::ES2015));
///
/// assert_eq!(context.script_target(), ScriptTarget::ES2015);
/// ```
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub workspace_root: PathBuf,
    pub project_root: PathBuf,
    /// Root of the project sources, `<project_root>/src` when unset
    pub source_root: Option<PathBuf>,
    pub shims_dir: PathBuf,
    pub compiler_options: CompilerOptions,
    /// Rules appended after the built-in module rules
    pub extra_rules: Vec<ModuleRule>,
}

impl ProjectContext {
    /// Context with the project living at the workspace root.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        let workspace_root = workspace_root.into();
        Self {
            project_root: workspace_root.clone(),
            source_root: None,
            shims_dir: workspace_root.join(DEFAULT_SHIMS_DIR),
            workspace_root,
            compiler_options: CompilerOptions::default(),
            extra_rules: Vec::new(),
        }
    }

    /// Project root; relative values are taken from the workspace root.
    pub fn project_root(mut self, path: impl AsRef<Path>) -> Self {
        self.project_root = resolve_path(&self.workspace_root, path);
        self
    }

    /// Source root; relative values are taken from the workspace root.
    pub fn source_root(mut self, path: impl AsRef<Path>) -> Self {
        self.source_root = Some(resolve_path(&self.workspace_root, path));
        self
    }

    /// Directory holding the bundled shim files (`es5-polyfills.js`, ...).
    pub fn shims_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.shims_dir = resolve_path(&self.workspace_root, path);
        self
    }

    pub fn compiler_options(mut self, options: CompilerOptions) -> Self {
        self.compiler_options = options;
        self
    }

    pub fn extra_rule(mut self, rule: ModuleRule) -> Self {
        self.extra_rules.push(rule);
        self
    }

    /// Resolve a workspace-relative path.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve_path(&self.workspace_root, path)
    }

    /// Effective source root.
    pub fn sources(&self) -> PathBuf {
        self.source_root
            .clone()
            .unwrap_or_else(|| self.project_root.join("src"))
    }

    /// Absolute path of a shim file.
    pub fn shim(&self, name: &str) -> PathBuf {
        self.shims_dir.join(name)
    }

    /// Compiler target, ES5 when the snapshot does not name one.
    pub fn script_target(&self) -> ScriptTarget {
        self.compiler_options.target.unwrap_or(ScriptTarget::ES5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_defaults_to_workspace_root() {
        let context = ProjectContext::new("/work");
        assert_eq!(context.project_root, PathBuf::from("/work"));
        assert_eq!(
            context.shims_dir,
            PathBuf::from("/work/node_modules/ngpack/shims")
        );
    }

    #[test]
    fn relative_roots_resolve_from_workspace() {
        let context = ProjectContext::new("/work")
            .project_root("projects/app")
            .shims_dir("tools/shims");
        assert_eq!(context.project_root, PathBuf::from("/work/projects/app"));
        assert_eq!(context.shim("a.js"), PathBuf::from("/work/tools/shims/a.js"));
    }

    #[test]
    fn source_root_follows_project_root() {
        let context = ProjectContext::new("/work").project_root("projects/app");
        assert_eq!(context.sources(), PathBuf::from("/work/projects/app/src"));

        let context = context.source_root("projects/app/lib");
        assert_eq!(context.sources(), PathBuf::from("/work/projects/app/lib"));
    }

    #[test]
    fn target_defaults_to_es5() {
        assert_eq!(ProjectContext::new("/work").script_target(), ScriptTarget::ES5);
    }
}
