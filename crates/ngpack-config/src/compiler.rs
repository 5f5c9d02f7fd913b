//! Snapshot of the TypeScript compiler options the assembler depends on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// ECMAScript language level emitted by the compiler.
///
/// Ordered from oldest to newest, so `target >= ScriptTarget::ES2015`
/// reads as "supports ES2015".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScriptTarget {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ESNext,
}

impl ScriptTarget {
    /// Lowercase label used in file names and serialized options.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ES3 => "es3",
            Self::ES5 => "es5",
            Self::ES2015 => "es2015",
            Self::ES2016 => "es2016",
            Self::ES2017 => "es2017",
            Self::ES2018 => "es2018",
            Self::ES2019 => "es2019",
            Self::ES2020 => "es2020",
            Self::ESNext => "esnext",
        }
    }

    pub fn supports_es2015(self) -> bool {
        self >= Self::ES2015
    }
}

impl FromStr for ScriptTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "es3" => Ok(Self::ES3),
            "es5" => Ok(Self::ES5),
            "es6" | "es2015" => Ok(Self::ES2015),
            "es2016" => Ok(Self::ES2016),
            "es2017" => Ok(Self::ES2017),
            "es2018" => Ok(Self::ES2018),
            "es2019" => Ok(Self::ES2019),
            "es2020" => Ok(Self::ES2020),
            "esnext" => Ok(Self::ESNext),
            other => Err(ConfigError::InvalidValue {
                field: "target".to_string(),
                hint: Some(format!(
                    "unknown script target '{other}', expected es5, es2015 ... esnext"
                )),
            }),
        }
    }
}

impl TryFrom<String> for ScriptTarget {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ScriptTarget> for String {
    fn from(target: ScriptTarget) -> Self {
        target.as_str().to_string()
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compiler options the assembler reads: language level and base path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ScriptTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

impl CompilerOptions {
    pub fn with_target(target: ScriptTarget) -> Self {
        Self {
            target: Some(target),
            base_url: None,
        }
    }

    /// Read `compilerOptions` from a tsconfig file.
    ///
    /// `baseUrl` is resolved against the directory holding the file.
    /// `extends` chains are not followed and the file must be plain JSON.
    pub fn from_tsconfig(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let parsed: TsConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "tsconfig".to_string(),
                hint: Some(format!("{}: {e}", path.display())),
            })?;

        let mut options = parsed.compiler_options;
        if let Some(base_url) = options.base_url.take() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            options.base_url = Some(if base_url.is_absolute() {
                base_url
            } else {
                dir.join(base_url)
            });
        }

        tracing::debug!(
            target = ?options.target,
            base_url = ?options.base_url,
            "loaded compiler options from {}",
            path.display()
        );

        Ok(options)
    }
}
