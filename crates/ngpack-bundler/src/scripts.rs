//! Global script bundles.
//!
//! Scripts are merged in two phases: entries are grouped by bundle name
//! (first occurrence decides the bundle order), then every group is checked
//! for a single injection flag.

use indexmap::IndexMap;
use ngpack_config::{ExtraEntryPoint, NormalizedEntryPoint, normalize_extra_entry_points};

use crate::context::ProjectContext;
use crate::entries::NO_MODULE_SHIM;
use crate::hashing::HashFormat;
use crate::paths::{basename, to_slash};
use crate::{Error, Result};

/// Bundle that receives scripts without an explicit bundle name.
pub const DEFAULT_SCRIPTS_BUNDLE: &str = "scripts";

/// Bundle holding the Safari module/nomodule fix.
pub const NO_MODULE_BUNDLE: &str = "polyfills-nomodule-es5";

/// One global script bundle, ready for the scripts plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBundle {
    pub bundle_name: String,
    /// Resolved input files, in declaration order
    pub paths: Vec<String>,
    pub inject: bool,
}

impl ScriptBundle {
    /// Output file name; lazy bundles are loaded by name and never hashed.
    pub fn filename(&self, hash: &HashFormat) -> String {
        let hash = if self.inject { hash.script.as_str() } else { "" };
        format!("{}{hash}.js", basename(&self.bundle_name))
    }
}

#[derive(Default)]
struct Group {
    inject: Vec<bool>,
    paths: Vec<String>,
}

/// Normalize the configured scripts and append the nomodule fix if needed.
pub fn normalize_scripts(
    scripts: &[ExtraEntryPoint],
    context: &ProjectContext,
    no_module_polyfill: bool,
) -> Vec<NormalizedEntryPoint> {
    let mut normalized = normalize_extra_entry_points(scripts, DEFAULT_SCRIPTS_BUNDLE);
    if no_module_polyfill {
        normalized.push(NormalizedEntryPoint::new(
            context.shim(NO_MODULE_SHIM),
            NO_MODULE_BUNDLE,
            true,
        ));
    }
    normalized
}

/// Group normalized scripts into bundles.
///
/// # Errors
///
/// [`Error::MixedScriptInjection`] when one bundle holds both injected and
/// lazy scripts.
pub fn group_scripts(
    scripts: &[NormalizedEntryPoint],
    context: &ProjectContext,
) -> Result<Vec<ScriptBundle>> {
    let mut groups: IndexMap<&str, Group> = IndexMap::new();

    for script in scripts {
        let group = groups.entry(script.bundle_name.as_str()).or_default();
        if !group.inject.contains(&script.inject) {
            group.inject.push(script.inject);
        }
        group.paths.push(to_slash(context.resolve(&script.input)));
    }

    groups
        .into_iter()
        .map(|(bundle_name, group)| match group.inject.as_slice() {
            [inject] => Ok(ScriptBundle {
                bundle_name: bundle_name.to_string(),
                paths: group.paths,
                inject: *inject,
            }),
            _ => Err(Error::MixedScriptInjection {
                bundle_name: bundle_name.to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngpack_config::OutputHashing;

    fn context() -> ProjectContext {
        ProjectContext::new("/work").shims_dir("/shims")
    }

    #[test]
    fn groups_by_first_occurrence() {
        let scripts = vec![
            NormalizedEntryPoint::new("src/a.js", "scripts", true),
            NormalizedEntryPoint::new("src/b.js", "vendor", true),
            NormalizedEntryPoint::new("src/c.js", "scripts", true),
        ];
        let bundles = group_scripts(&scripts, &context()).unwrap();

        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[0].bundle_name, "scripts");
        assert_eq!(bundles[0].paths, vec!["/work/src/a.js", "/work/src/c.js"]);
        assert_eq!(bundles[1].bundle_name, "vendor");
    }

    #[test]
    fn mixed_injection_is_rejected() {
        let scripts = vec![
            NormalizedEntryPoint::new("src/a.js", "vendor", true),
            NormalizedEntryPoint::new("src/b.js", "vendor", false),
        ];
        let err = group_scripts(&scripts, &context()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The vendor bundle is mixing injected and non-injected scripts."
        );
    }

    #[test]
    fn lazy_then_injected_is_rejected_too() {
        let scripts = vec![
            NormalizedEntryPoint::new("src/a.js", "vendor", false),
            NormalizedEntryPoint::new("src/b.js", "vendor", true),
        ];
        assert!(matches!(
            group_scripts(&scripts, &context()),
            Err(Error::MixedScriptInjection { bundle_name }) if bundle_name == "vendor"
        ));
    }

    #[test]
    fn lazy_bundles_are_not_hashed() {
        let hash = HashFormat::for_mode(OutputHashing::All);
        let lazy = ScriptBundle {
            bundle_name: "lazy/widgets".to_string(),
            paths: Vec::new(),
            inject: false,
        };
        let injected = ScriptBundle {
            bundle_name: "scripts".to_string(),
            paths: Vec::new(),
            inject: true,
        };
        assert_eq!(lazy.filename(&hash), "widgets.js");
        assert_eq!(injected.filename(&hash), "scripts.[hash:20].js");
    }

    #[test]
    fn nomodule_fix_is_appended() {
        let scripts = vec![ExtraEntryPoint::from("src/a.js")];
        let normalized = normalize_scripts(&scripts, &context(), true);

        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[1].bundle_name, NO_MODULE_BUNDLE);
        assert!(normalized[1].inject);

        let bundles = group_scripts(&normalized, &context()).unwrap();
        assert_eq!(bundles[1].paths, vec!["/shims/safari-nomodule.js"]);
    }
}
