use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A global script (or style) entry as written in the options file.
///
/// Either a bare path or an object with an explicit bundle name and
/// injection flag. `lazy` is the older spelling of `inject: false` and wins
/// when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraEntryPoint {
    Path(PathBuf),
    Detailed(ExtraEntryPointObject),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraEntryPointObject {
    pub input: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
}

impl ExtraEntryPoint {
    pub fn input(&self) -> &Path {
        match self {
            ExtraEntryPoint::Path(path) => path,
            ExtraEntryPoint::Detailed(object) => &object.input,
        }
    }

    /// Resolve the injection flag and bundle name of this entry.
    pub fn normalize(&self, default_bundle_name: &str) -> NormalizedEntryPoint {
        match self {
            ExtraEntryPoint::Path(input) => NormalizedEntryPoint {
                input: input.clone(),
                bundle_name: default_bundle_name.to_string(),
                inject: true,
            },
            ExtraEntryPoint::Detailed(object) => {
                let inject = match object.lazy {
                    Some(lazy) => !lazy,
                    None => object.inject.unwrap_or(true),
                };

                let bundle_name = match &object.bundle_name {
                    Some(name) => name.clone(),
                    // Lazy entries are addressed by name, so they default to their own file stem
                    None if !inject => object
                        .input
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_else(|| default_bundle_name.to_string()),
                    None => default_bundle_name.to_string(),
                };

                NormalizedEntryPoint {
                    input: object.input.clone(),
                    bundle_name,
                    inject,
                }
            }
        }
    }
}

impl From<&str> for ExtraEntryPoint {
    fn from(path: &str) -> Self {
        ExtraEntryPoint::Path(PathBuf::from(path))
    }
}

/// An entry point with its bundle name and injection flag settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntryPoint {
    pub input: PathBuf,
    pub bundle_name: String,
    pub inject: bool,
}

impl NormalizedEntryPoint {
    pub fn new(input: impl Into<PathBuf>, bundle_name: impl Into<String>, inject: bool) -> Self {
        Self {
            input: input.into(),
            bundle_name: bundle_name.into(),
            inject,
        }
    }
}

/// Normalize a list of extra entry points against a default bundle name.
pub fn normalize_extra_entry_points(
    entries: &[ExtraEntryPoint],
    default_bundle_name: &str,
) -> Vec<NormalizedEntryPoint> {
    entries
        .iter()
        .map(|entry| entry.normalize(default_bundle_name))
        .collect()
}
