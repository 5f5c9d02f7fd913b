//! Layered loading of build options.
//!
//! Priority: environment overrides > options file > defaults.

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use crate::build::BuildOptions;
use crate::error::{ConfigError, Result};

/// Prefix of environment variables that override single switches
/// (`NGPACK_AOT=true`, `NGPACK_MANGLE=false`, ...).
pub const ENV_PREFIX: &str = "NGPACK_";

/// Options keys that may be overridden from the environment.
const ENV_KEYS: &[&str] = &["aot", "mangle", "profile", "verbose", "progress", "watch", "poll"];

/// Loads [`BuildOptions`] from a JSON or TOML file with environment overrides.
///
/// # Example
///
/// ```no_run
/// use ngpack_config::OptionsLoader;
///
/// let options = OptionsLoader::new().file("build.json").load().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct OptionsLoader {
    file: Option<PathBuf>,
    env: bool,
}

impl OptionsLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env: true,
        }
    }

    /// Options file to read; the format follows the extension.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether `NGPACK_*` variables are merged (default: true).
    pub fn env(mut self, enabled: bool) -> Self {
        self.env = enabled;
        self
    }

    fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(BuildOptions::default()));

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }

            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_lowercase();

            figment = match extension.as_str() {
                "json" => figment.merge(Json::file(path)),
                "toml" => figment.merge(Toml::file(path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(if other.is_empty() {
                        path.display().to_string()
                    } else {
                        other.to_string()
                    }));
                }
            };
        }

        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS));
        }

        Ok(figment)
    }

    pub fn load(&self) -> Result<BuildOptions> {
        let options: BuildOptions = self.figment()?.extract()?;
        tracing::debug!(
            file = ?self.file,
            aot = options.aot,
            platform = ?options.platform,
            "loaded build options"
        );
        Ok(options)
    }
}
