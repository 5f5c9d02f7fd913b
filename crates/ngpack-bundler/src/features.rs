//! Browser feature detection for legacy and differential builds.
//!
//! [`BrowserslistFeatures`] resolves the project's browserslist queries with
//! the `browserslist-rs` engine and compares each selected release against
//! the first version with native module support.

use browserslist::{Distrib, Opts};
use ngpack_config::{BuildOptions, ScriptTarget};
use std::path::Path;

use crate::host::ProjectHost;

/// Queries used when a project has no browserslist configuration.
pub const DEFAULT_BROWSERS: &[&str] = &[
    "> 0.5%",
    "last 2 versions",
    "Firefox ESR",
    "not dead",
    "not IE 9-11",
];

/// Answers about the browsers a project targets.
pub trait BrowserFeatures {
    /// Some targeted browser cannot load ES modules and needs ES5 bundles.
    fn is_es5_support_needed(&self) -> bool;

    /// Some targeted Safari release runs both module and nomodule scripts.
    fn has_nomodule_bug(&self) -> bool;

    /// Modern and legacy bundle sets must be emitted side by side.
    fn is_differential_loading_needed(&self, target: ScriptTarget) -> bool {
        target.supports_es2015() && self.is_es5_support_needed()
    }

    fn is_no_module_polyfill_needed(&self, target: ScriptTarget) -> bool {
        self.is_differential_loading_needed(target) && self.has_nomodule_bug()
    }
}

/// Fixed answers, for callers that already know their browser matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticFeatures {
    pub es5_support_needed: bool,
    pub nomodule_bug: bool,
}

impl StaticFeatures {
    pub fn modern() -> Self {
        Self::default()
    }

    pub fn legacy() -> Self {
        Self {
            es5_support_needed: true,
            nomodule_bug: false,
        }
    }
}

impl BrowserFeatures for StaticFeatures {
    fn is_es5_support_needed(&self) -> bool {
        self.es5_support_needed
    }

    fn has_nomodule_bug(&self) -> bool {
        self.nomodule_bug
    }
}

/// One browser release selected by the queries.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Release {
    browser: String,
    version: String,
}

impl From<&Distrib> for Release {
    fn from(distrib: &Distrib) -> Self {
        Self {
            browser: distrib.name().to_string(),
            version: distrib.version().to_string(),
        }
    }
}

impl Release {
    /// Lowest version number of the release, `10.0` for `10.0-10.2`.
    /// Technology previews sort after every numbered release.
    fn min_version(&self) -> f64 {
        let low = self.version.split('-').next().unwrap_or_default();
        if low.eq_ignore_ascii_case("tp") {
            return f64::INFINITY;
        }
        low.parse().unwrap_or(0.0)
    }

    fn is_legacy(&self) -> bool {
        match self.browser.as_str() {
            "ie" | "ie_mob" | "op_mini" | "bb" => true,
            browser => first_module_version(browser).is_some_and(|first| self.min_version() < first),
        }
    }

    fn has_nomodule_bug(&self) -> bool {
        matches!(
            (self.browser.as_str(), self.version.as_str()),
            ("safari", "10.1") | ("ios_saf", "10.3")
        )
    }
}

/// First release with native `<script type="module">` support.
fn first_module_version(browser: &str) -> Option<f64> {
    Some(match browser {
        "chrome" | "and_chr" => 61.0,
        "firefox" | "and_ff" => 60.0,
        "edge" => 16.0,
        "safari" => 10.1,
        "ios_saf" => 10.3,
        "opera" | "op_mob" => 48.0,
        "samsung" => 8.2,
        "android" => 67.0,
        "and_uc" => 11.8,
        "and_qq" => 10.4,
        "baidu" => 13.18,
        "kaios" => 3.0,
        _ => return None,
    })
}

fn resolve_releases<S: AsRef<str>>(queries: &[S]) -> Result<Vec<Release>, browserslist::Error> {
    let distribs = browserslist::resolve(queries.iter().map(|query| query.as_ref()), &Opts::default())?;
    Ok(distribs.iter().map(Release::from).collect())
}

/// Browserslist-driven feature detection.
#[derive(Debug, Clone, Default)]
pub struct BrowserslistFeatures {
    releases: Vec<Release>,
}

impl BrowserslistFeatures {
    /// Read the browserslist configuration nearest to `project_root`.
    ///
    /// Looks for a `browserslist` file, a `.browserslistrc` file, then a
    /// `browserslist` field in `package.json`, in each directory from the
    /// project root upwards. Falls back to [`DEFAULT_BROWSERS`].
    pub fn load(host: &dyn ProjectHost, project_root: &Path) -> Self {
        for dir in project_root.ancestors() {
            for name in ["browserslist", ".browserslistrc"] {
                if let Some(content) = host.read_to_string(&dir.join(name)) {
                    tracing::debug!("browserslist queries from {}", dir.join(name).display());
                    return Self::from_queries(&parse_config_file(&content));
                }
            }

            if let Some(queries) = host
                .read_to_string(&dir.join("package.json"))
                .and_then(|content| package_queries(&content))
            {
                tracing::debug!("browserslist queries from {}", dir.join("package.json").display());
                return Self::from_queries(&queries);
            }
        }

        tracing::debug!("no browserslist configuration, using defaults");
        Self::from_queries(DEFAULT_BROWSERS)
    }

    /// Resolve `queries`. An empty list, or one the engine rejects, falls
    /// back to [`DEFAULT_BROWSERS`].
    pub fn from_queries<S: AsRef<str>>(queries: &[S]) -> Self {
        if queries.iter().all(|query| query.as_ref().trim().is_empty()) {
            return Self::defaults();
        }

        match resolve_releases(queries) {
            Ok(releases) => Self { releases },
            Err(error) => {
                tracing::warn!("invalid browserslist query ({error}), using defaults");
                Self::defaults()
            }
        }
    }

    fn defaults() -> Self {
        let releases = resolve_releases(DEFAULT_BROWSERS).unwrap_or_else(|error| {
            tracing::warn!("default browserslist queries failed to resolve: {error}");
            Vec::new()
        });
        Self { releases }
    }
}

impl BrowserFeatures for BrowserslistFeatures {
    fn is_es5_support_needed(&self) -> bool {
        self.releases.iter().any(Release::is_legacy)
    }

    fn has_nomodule_bug(&self) -> bool {
        self.releases.iter().any(Release::has_nomodule_bug)
    }
}

/// Query lines of a browserslist file, keeping the production section.
fn parse_config_file(content: &str) -> Vec<String> {
    let mut queries = Vec::new();
    let mut in_section = false;
    let mut keep_section = true;

    for line in content.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_section = true;
            keep_section = line[1..line.len() - 1]
                .split_whitespace()
                .any(|env| env == "production");
            continue;
        }
        if !in_section || keep_section {
            queries.push(line.to_string());
        }
    }

    queries
}

fn package_queries(content: &str) -> Option<Vec<String>> {
    let package: serde_json::Value = serde_json::from_str(content).ok()?;
    let field = package.get("browserslist")?;

    let field = match field {
        serde_json::Value::Object(envs) => envs.get("production")?,
        other => other,
    };

    match field {
        serde_json::Value::String(query) => Some(vec![query.clone()]),
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }
}

/// Legacy-browser decisions derived once per assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacySupport {
    /// Modern and legacy bundles are emitted side by side
    pub differential_loading: bool,
    /// The `polyfills-es5` bundle is built
    pub es5_polyfills: bool,
    /// The Safari nomodule fix is added as a global script
    pub no_module_polyfill: bool,
}

impl LegacySupport {
    /// Legacy handling only applies to browser builds. The detector sees the
    /// compiler target, ES5 when unknown. The ES5 polyfill bundle needs an
    /// explicit ES5 target, from `scriptTargetOverride` or the compiler.
    pub fn resolve(
        options: &BuildOptions,
        compiler_target: Option<ScriptTarget>,
        features: &dyn BrowserFeatures,
    ) -> Self {
        if options.platform.is_server() {
            return Self::default();
        }

        let target = compiler_target.unwrap_or(ScriptTarget::ES5);
        let differential_loading = features.is_differential_loading_needed(target);
        let es5_polyfills = options.script_target_override.or(compiler_target) == Some(ScriptTarget::ES5)
            && options
                .es5_browser_support
                .unwrap_or_else(|| features.is_es5_support_needed());

        Self {
            differential_loading,
            es5_polyfills,
            no_module_polyfill: features.is_no_module_polyfill_needed(target),
        }
    }
}
