use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::build::helpers::default_asset_output;

/// An asset copy entry as written in the options file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetPattern {
    /// A file or directory under the project source root. The bundler
    /// expands it, keeping its location relative to the source root.
    Path(String),
    Detailed(AssetPatternObject),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatternObject {
    /// Glob matched inside `input`
    pub glob: String,

    /// Source directory, relative to the workspace root
    pub input: PathBuf,

    /// Destination, relative to the output path
    #[serde(default = "default_asset_output")]
    pub output: PathBuf,

    /// Globs excluded from the copy
    #[serde(default)]
    pub ignore: Vec<String>,
}
