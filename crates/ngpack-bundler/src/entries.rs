//! Entry point map: `main`, `polyfills-es5` and `polyfills` bundles.

use indexmap::IndexMap;
use ngpack_config::BuildOptions;

use crate::context::ProjectContext;
use crate::features::LegacySupport;
use crate::paths::to_slash;

/// Bundle name to ordered entry files. Order matters within a bundle.
pub type EntryMap = IndexMap<String, Vec<String>>;

pub const MAIN_BUNDLE: &str = "main";
pub const POLYFILLS_BUNDLE: &str = "polyfills";
pub const ES5_POLYFILLS_BUNDLE: &str = "polyfills-es5";

/// Module that teaches the zone runtime about legacy browser APIs.
pub const LEGACY_RUNTIME_SHIM: &str = "zone.js/dist/zone-legacy";

pub const ES5_POLYFILLS_SHIM: &str = "es5-polyfills.js";
pub const JIT_POLYFILLS_SHIM: &str = "jit-polyfills.js";
pub const ES5_JIT_POLYFILLS_SHIM: &str = "es5-jit-polyfills.js";
pub const NO_MODULE_SHIM: &str = "safari-nomodule.js";

/// Build the entry point map.
///
/// Keys are inserted as `main`, `polyfills-es5`, `polyfills`; absent
/// bundles get no key at all.
pub fn build_entry_points(
    options: &BuildOptions,
    context: &ProjectContext,
    legacy: &LegacySupport,
) -> EntryMap {
    let mut entries = EntryMap::new();

    if let Some(main) = &options.main {
        entries.insert(MAIN_BUNDLE.to_string(), vec![to_slash(context.resolve(main))]);
    }

    if legacy.es5_polyfills {
        entries.insert(
            ES5_POLYFILLS_BUNDLE.to_string(),
            legacy_polyfills(options, context, legacy.differential_loading),
        );
    }

    let mut polyfills = Vec::new();
    if let Some(user) = &options.polyfills {
        polyfills.push(to_slash(context.resolve(user)));
    }
    if !options.aot {
        polyfills.push(to_slash(context.shim(JIT_POLYFILLS_SHIM)));
    }
    if !polyfills.is_empty() {
        entries.insert(POLYFILLS_BUNDLE.to_string(), polyfills);
    }

    tracing::debug!(bundles = ?entries.keys().collect::<Vec<_>>(), "entry points");
    entries
}

/// Files of the `polyfills-es5` bundle, in load order.
///
/// Skipped steps never reorder the remaining ones.
pub fn legacy_polyfills(
    options: &BuildOptions,
    context: &ProjectContext,
    differential_loading: bool,
) -> Vec<String> {
    let mut files = vec![to_slash(context.shim(ES5_POLYFILLS_SHIM))];

    if differential_loading {
        files.push(LEGACY_RUNTIME_SHIM.to_string());
    }
    if !options.aot && differential_loading {
        files.push(to_slash(context.shim(JIT_POLYFILLS_SHIM)));
    }
    if !options.aot {
        files.push(to_slash(context.shim(ES5_JIT_POLYFILLS_SHIM)));
    }
    if let Some(user) = options.polyfills.as_ref().filter(|_| differential_loading) {
        files.push(to_slash(context.resolve(user)));
    }

    files
}
