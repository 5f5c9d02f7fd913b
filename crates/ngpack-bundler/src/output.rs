//! The configuration handed to the bundler.
//!
//! Field names serialize in the bundler's camelCase vocabulary.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::assets::CopyPattern;
use crate::entries::EntryMap;
use crate::minimizers::Minimizer;
use crate::plugins::PluginSpec;
use crate::rules::ModuleRule;

/// A regular expression carried as source text.
///
/// The bundler compiles it; [`Pattern::is_match`] is there to check what a
/// pattern selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.0)
    }

    /// Whether `text` matches; an invalid pattern matches nothing.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex().is_ok_and(|re| re.is_match(text))
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolve {
    pub extensions: Vec<String>,
    pub symlinks: bool,
    pub modules: Vec<String>,
    pub alias: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveLoader {
    pub symlinks: bool,
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
    pub filename: String,
    pub future_emit_assets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Performance {
    pub hints: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    pub strict_export_presence: bool,
    pub rules: Vec<ModuleRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub no_emit_on_errors: bool,
    pub minimizer: Vec<Minimizer>,
}

/// The assembled bundler configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    pub mode: Mode,
    /// Source maps are configured by plugins, never by `devtool`
    pub devtool: bool,
    pub profile: bool,
    pub resolve: Resolve,
    pub resolve_loader: ResolveLoader,
    pub context: String,
    pub entry: EntryMap,
    pub output: Output,
    pub watch: bool,
    pub watch_options: WatchOptions,
    pub performance: Performance,
    pub module: ModuleConfig,
    pub optimization: Optimization,
    pub plugins: Vec<PluginSpec>,
}

impl BundlerConfig {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Copy patterns of the copy plugin, if any.
    pub fn copy_patterns(&self) -> Option<&[CopyPattern]> {
        self.plugins.iter().find_map(|plugin| match plugin {
            PluginSpec::Copy { patterns, .. } => Some(patterns.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_serializes_as_string() {
        let json = serde_json::to_value(Pattern::new(r"\.js$")).unwrap();
        assert_eq!(json, serde_json::json!(r"\.js$"));
    }

    #[test]
    fn invalid_pattern_matches_nothing() {
        assert!(!Pattern::new("(").is_match("("));
        assert!(Pattern::new(r"\.js$").is_match("main.js"));
    }

    #[test]
    fn empty_watch_options_serialize_empty() {
        let json = serde_json::to_value(WatchOptions::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
