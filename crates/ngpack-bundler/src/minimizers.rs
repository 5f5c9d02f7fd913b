//! Minimizer selection.
//!
//! The minimizer list always starts with module-id hashing and budget
//! enforcement; style and script minifiers follow when the matching
//! optimization is on.

use indexmap::IndexMap;
use ngpack_config::{Budget, BuildOptions};
use serde::Serialize;

use crate::conditional::Conditional;
use crate::features::LegacySupport;
use crate::output::Pattern;

/// Files handed to the style minifier. Component styles are embedded in
/// script chunks and never match.
pub const STYLE_FILE_PATTERN: &str = r"\.(?:css|scss|sass|less|styl)$";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum Minimizer {
    /// Stable module ids derived from module paths
    HashedModuleIds,
    /// Size budget enforcement
    BundleBudget { budgets: Vec<Budget> },
    CleanCss(StyleMinifier),
    Terser(ScriptMinifier),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMinifier {
    pub source_map: bool,
    pub test: Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMinifier {
    pub source_map: bool,
    pub parallel: bool,
    pub cache: bool,
    pub chunk_filter: ChunkFilter,
    pub terser_options: TerserOptions,
}

/// Which chunks a script minifier handles, by chunk name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChunkFilter {
    /// Every chunk except the named ones
    ExcludeNames(Vec<String>),
    /// Only the named chunks
    OnlyNames(Vec<String>),
}

impl ChunkFilter {
    pub fn accepts(&self, chunk_name: &str) -> bool {
        match self {
            ChunkFilter::ExcludeNames(names) => !names.iter().any(|name| name == chunk_name),
            ChunkFilter::OnlyNames(names) => names.iter().any(|name| name == chunk_name),
        }
    }
}

/// Options forwarded to the script minifier, in its own vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerserOptions {
    pub warnings: bool,
    pub safari10: bool,
    pub output: TerserOutput,
    pub compress: TerserCompress,
    pub mangle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerserOutput {
    pub ecma: u8,
    pub comments: bool,
    pub webkit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerserCompress {
    pub ecma: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pure_getters: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passes: Option<u8>,
    pub global_defs: IndexMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_fnames: Option<bool>,
}

/// Compile-time constants folded away by the script minifier.
pub fn global_definitions(aot: bool) -> IndexMap<String, bool> {
    let mut defs = IndexMap::new();
    defs.insert("ngDevMode".to_string(), false);
    defs.insert("ngI18nClosureMode".to_string(), false);
    if aot {
        defs.insert("ngJitMode".to_string(), false);
    }
    defs
}

/// Minifier options for application bundles.
///
/// `es2015` selects the output language level; identifiers are not
/// mangled for server builds or when differential loading is on.
pub fn terser_options(options: &BuildOptions, legacy: &LegacySupport, es2015: bool) -> TerserOptions {
    let ecma = if es2015 { 6 } else { 5 };
    let global_defs = global_definitions(options.aot);

    let compress = if options.platform.is_server() {
        TerserCompress {
            ecma,
            pure_getters: None,
            passes: None,
            global_defs,
            keep_fnames: Some(true),
        }
    } else {
        TerserCompress {
            ecma,
            pure_getters: Some(options.build_optimizer),
            passes: Some(if options.build_optimizer { 3 } else { 1 }),
            global_defs,
            keep_fnames: None,
        }
    };

    TerserOptions {
        warnings: options.verbose,
        safari10: true,
        output: TerserOutput {
            ecma,
            comments: false,
            webkit: true,
        },
        compress,
        mangle: options.mangle && !options.platform.is_server() && !legacy.differential_loading,
    }
}

/// Global scripts are never downleveled, so they are minified at ES5 in one step.
pub fn global_script_terser_options(options: &BuildOptions, app: &TerserOptions) -> TerserOptions {
    let mut terser = app.clone();
    terser.compress.ecma = 5;
    terser.output.ecma = 5;
    terser.mangle = options.mangle && !options.platform.is_server();
    terser
}

/// Full minimizer list in execution order.
pub fn minimizers(
    options: &BuildOptions,
    legacy: &LegacySupport,
    es2015: bool,
    global_script_names: &[String],
) -> Vec<Minimizer> {
    let scripts = options.optimization.scripts;
    let script_source_map = options.source_map.scripts;

    Conditional::new()
        .always(|| Minimizer::HashedModuleIds)
        .always(|| Minimizer::BundleBudget {
            budgets: options.budgets.clone(),
        })
        .when(options.optimization.styles, || {
            Minimizer::CleanCss(StyleMinifier {
                source_map: options.source_map.styles,
                test: Pattern::new(STYLE_FILE_PATTERN),
            })
        })
        .when_many(scripts, || {
            let app = terser_options(options, legacy, es2015);
            let global = global_script_terser_options(options, &app);
            vec![
                Minimizer::Terser(ScriptMinifier {
                    source_map: script_source_map,
                    parallel: true,
                    cache: true,
                    chunk_filter: ChunkFilter::ExcludeNames(global_script_names.to_vec()),
                    terser_options: app,
                }),
                Minimizer::Terser(ScriptMinifier {
                    source_map: script_source_map,
                    parallel: true,
                    cache: true,
                    chunk_filter: ChunkFilter::OnlyNames(global_script_names.to_vec()),
                    terser_options: global,
                }),
            ]
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngpack_config::{OptimizationOptions, Platform};

    fn optimized() -> BuildOptions {
        BuildOptions {
            optimization: OptimizationOptions::all(true),
            ..BuildOptions::default()
        }
    }

    #[test]
    fn unoptimized_build_has_two_minimizers() {
        let list = minimizers(&BuildOptions::default(), &LegacySupport::default(), false, &[]);
        assert_eq!(list.len(), 2);
        assert!(matches!(list[0], Minimizer::HashedModuleIds));
        assert!(matches!(list[1], Minimizer::BundleBudget { .. }));
    }

    #[test]
    fn style_minifier_test_pattern() {
        let options = BuildOptions {
            optimization: OptimizationOptions {
                scripts: false,
                styles: true,
            },
            ..BuildOptions::default()
        };
        let list = minimizers(&options, &LegacySupport::default(), false, &[]);
        let Minimizer::CleanCss(style) = &list[2] else {
            panic!("expected style minifier, got {:?}", list[2]);
        };
        assert!(style.test.is_match("styles.scss"));
        assert!(style.test.is_match("main.css"));
        assert!(!style.test.is_match("main.js"));
    }

    #[test]
    fn script_minifiers_split_on_global_names() {
        let names = vec!["scripts".to_string()];
        let list = minimizers(&optimized(), &LegacySupport::default(), true, &names);
        assert_eq!(list.len(), 5);

        let (Minimizer::Terser(app), Minimizer::Terser(global)) = (&list[3], &list[4]) else {
            panic!("expected two script minifiers");
        };
        assert!(app.chunk_filter.accepts("main"));
        assert!(!app.chunk_filter.accepts("scripts"));
        assert!(global.chunk_filter.accepts("scripts"));
        assert!(!global.chunk_filter.accepts("main"));

        assert_eq!(app.terser_options.output.ecma, 6);
        assert_eq!(global.terser_options.output.ecma, 5);
        assert_eq!(global.terser_options.compress.ecma, 5);
    }

    #[test]
    fn differential_loading_disables_app_mangling_only() {
        let legacy = LegacySupport {
            differential_loading: true,
            ..LegacySupport::default()
        };
        let app = terser_options(&optimized(), &legacy, true);
        let global = global_script_terser_options(&optimized(), &app);
        assert!(!app.mangle);
        assert!(global.mangle);
    }

    #[test]
    fn mangle_switch_and_server_disable_mangling() {
        let options = BuildOptions {
            mangle: false,
            ..optimized()
        };
        let app = terser_options(&options, &LegacySupport::default(), false);
        assert!(!app.mangle);
        assert!(!global_script_terser_options(&options, &app).mangle);

        let server = optimized().platform(Platform::Server);
        let app = terser_options(&server, &LegacySupport::default(), false);
        assert!(!app.mangle);
        assert_eq!(app.compress.keep_fnames, Some(true));
        assert_eq!(app.compress.passes, None);
    }

    #[test]
    fn build_optimizer_adds_passes() {
        let options = BuildOptions {
            build_optimizer: true,
            ..optimized()
        };
        let app = terser_options(&options, &LegacySupport::default(), false);
        assert_eq!(app.compress.passes, Some(3));
        assert_eq!(app.compress.pure_getters, Some(true));
    }

    #[test]
    fn aot_adds_jit_mode_definition() {
        assert_eq!(global_definitions(false).len(), 2);
        let defs = global_definitions(true);
        assert_eq!(defs.get("ngJitMode"), Some(&false));
        assert_eq!(defs.get("ngDevMode"), Some(&false));
    }

    #[test]
    fn serializes_with_plugin_tag() {
        let json = serde_json::to_value(Minimizer::HashedModuleIds).unwrap();
        assert_eq!(json, serde_json::json!({ "plugin": "hashed-module-ids" }));
    }
}
