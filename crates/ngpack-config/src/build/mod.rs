//! Build options consumed by the configuration assembler.

mod asset;
mod budget;
mod entry_point;
mod helpers;
mod types;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub use asset::{AssetPattern, AssetPatternObject};
pub use budget::{Budget, BudgetType};
pub use entry_point::{
    ExtraEntryPoint, ExtraEntryPointObject, NormalizedEntryPoint, normalize_extra_entry_points,
};
pub use types::{OptimizationOptions, OutputHashing, Platform, SourceMapOptions};

use crate::compiler::ScriptTarget;
use crate::error::ConfigError;
use helpers::{default_output_path, default_true};

/// Options of one build target.
///
/// Field names follow the camelCase vocabulary of `angular.json` build
/// targets so an existing `options` block can be fed in unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Main application file, seeds the `main` bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<PathBuf>,

    /// User polyfills file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyfills: Option<PathBuf>,

    /// Output directory, relative to the workspace root
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Public URL the bundles are served from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_url: Option<String>,

    #[serde(default)]
    pub optimization: OptimizationOptions,

    #[serde(default)]
    pub source_map: SourceMapOptions,

    #[serde(default)]
    pub output_hashing: OutputHashing,

    /// Files copied verbatim into the output directory
    #[serde(default)]
    pub assets: Vec<AssetPattern>,

    /// Global scripts, bundled outside the module graph
    #[serde(default)]
    pub scripts: Vec<ExtraEntryPoint>,

    /// Ahead-of-time template compilation
    #[serde(default)]
    pub aot: bool,

    #[serde(default)]
    pub build_optimizer: bool,

    /// Force (`true`) or forbid (`false`) legacy polyfills; detected when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es5_browser_support: Option<bool>,

    /// Replaces the compiler target when deciding on legacy polyfills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_target_override: Option<ScriptTarget>,

    /// Add the language level (`-es2015`) to output file names
    #[serde(default)]
    pub es_version_in_file_name: bool,

    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub budgets: Vec<Budget>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub progress: bool,

    #[serde(default)]
    pub show_circular_dependencies: bool,

    #[serde(default)]
    pub stats_json: bool,

    #[serde(default)]
    pub named_chunks: bool,

    #[serde(default)]
    pub preserve_symlinks: bool,

    #[serde(default)]
    pub watch: bool,

    /// Watch polling interval in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<u64>,

    /// Emit a build profile for the browser devtools
    #[serde(default)]
    pub profile: bool,

    /// Identifier mangling during script minification
    #[serde(default = "default_true")]
    pub mangle: bool,
}

impl BuildOptions {
    /// Options for an application with a single main file.
    pub fn new(main: impl Into<PathBuf>) -> Self {
        Self {
            main: Some(main.into()),
            ..Self::default()
        }
    }

    /// Create from serde_json::Value (for programmatic options)
    ///
    /// # Example
    ///
    /// ```
    /// use ngpack_config::BuildOptions;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let options = BuildOptions::from_value(json!({
    ///     "main": "src/main.ts",
    ///     "optimization": true
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(options.main, Some(PathBuf::from("src/main.ts")));
    /// assert!(options.optimization.scripts);
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Production preset: full optimization, bundle hashing, no source maps.
    pub fn production(mut self) -> Self {
        self.optimization = OptimizationOptions::all(true);
        self.source_map = SourceMapOptions::all(false);
        self.output_hashing = OutputHashing::All;
        self.aot = true;
        self.build_optimizer = true;
        self
    }

    /// Add a global script injected into the default `scripts` bundle.
    pub fn script(mut self, input: impl Into<PathBuf>) -> Self {
        self.scripts.push(ExtraEntryPoint::Path(input.into()));
        self
    }

    /// Add a global script with an explicit bundle name and injection flag.
    pub fn named_script(
        mut self,
        bundle_name: impl Into<String>,
        input: impl Into<PathBuf>,
        inject: bool,
    ) -> Self {
        self.scripts
            .push(ExtraEntryPoint::Detailed(ExtraEntryPointObject {
                input: input.into(),
                bundle_name: Some(bundle_name.into()),
                inject: Some(inject),
                lazy: None,
            }));
        self
    }

    /// Add an asset copy pattern.
    pub fn asset(mut self, asset: AssetPattern) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            main: None,
            polyfills: None,
            output_path: default_output_path(),
            deploy_url: None,
            optimization: OptimizationOptions::default(),
            source_map: SourceMapOptions::default(),
            output_hashing: OutputHashing::None,
            assets: Vec::new(),
            scripts: Vec::new(),
            aot: false,
            build_optimizer: false,
            es5_browser_support: None,
            script_target_override: None,
            es_version_in_file_name: false,
            platform: Platform::Browser,
            budgets: Vec::new(),
            verbose: false,
            progress: false,
            show_circular_dependencies: false,
            stats_json: false,
            named_chunks: false,
            preserve_symlinks: false,
            watch: false,
            poll: None,
            profile: false,
            mangle: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_reads_camel_case_fields() {
        let options = BuildOptions::from_value(json!({
            "main": "src/main.ts",
            "outputPath": "dist/app",
            "outputHashing": "all",
            "buildOptimizer": true,
            "showCircularDependencies": true,
            "scriptTargetOverride": "es5"
        }))
        .unwrap();

        assert_eq!(options.output_path, PathBuf::from("dist/app"));
        assert_eq!(options.output_hashing, OutputHashing::All);
        assert!(options.build_optimizer);
        assert!(options.show_circular_dependencies);
        assert_eq!(options.script_target_override, Some(ScriptTarget::ES5));
        assert!(options.mangle);
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        let result = BuildOptions::from_value(json!({ "aot": "yes" }));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn to_value_skips_unset_optionals() {
        let value = BuildOptions::default().to_value().unwrap();
        assert!(value.get("main").is_none());
        assert!(value.get("poll").is_none());
        assert_eq!(value["outputPath"], json!("dist"));
    }

    #[test]
    fn production_preset_enables_optimizations() {
        let options = BuildOptions::new("src/main.ts").production();
        assert!(options.optimization.scripts && options.optimization.styles);
        assert_eq!(options.output_hashing, OutputHashing::All);
        assert!(!options.source_map.scripts);
    }

    #[test]
    fn named_script_records_injection_flag() {
        let options = BuildOptions::default().named_script("vendor", "a.js", false);
        let normalized = options.scripts[0].normalize("scripts");
        assert_eq!(normalized.bundle_name, "vendor");
        assert!(!normalized.inject);
    }
}
