use serde::{Deserialize, Serialize};

/// Target platform kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Browser application (default)
    #[default]
    Browser,
    /// Server-side rendering bundle
    Server,
}

impl Platform {
    pub fn is_server(self) -> bool {
        matches!(self, Platform::Server)
    }
}

/// Which output files receive a content-hash suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputHashing {
    /// No hashing
    #[default]
    None,
    /// Only files emitted by the file loader (images, fonts)
    Media,
    /// Only bundles and extracted styles
    Bundles,
    /// Everything
    All,
}

/// Independent optimization switches for scripts and styles.
///
/// Accepts either a single boolean (`"optimization": true`) or an object
/// with per-category flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawOptimization")]
pub struct OptimizationOptions {
    pub scripts: bool,
    pub styles: bool,
}

impl OptimizationOptions {
    pub fn all(enabled: bool) -> Self {
        Self {
            scripts: enabled,
            styles: enabled,
        }
    }

    pub fn any(&self) -> bool {
        self.scripts || self.styles
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptimization {
    Flag(bool),
    Detailed {
        #[serde(default)]
        scripts: bool,
        #[serde(default)]
        styles: bool,
    },
}

impl From<RawOptimization> for OptimizationOptions {
    fn from(raw: RawOptimization) -> Self {
        match raw {
            RawOptimization::Flag(enabled) => Self::all(enabled),
            RawOptimization::Detailed { scripts, styles } => Self { scripts, styles },
        }
    }
}

/// Source map scope per category.
///
/// Like [`OptimizationOptions`], a plain boolean toggles scripts and styles
/// together; vendor and hidden maps must be requested explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSourceMap")]
pub struct SourceMapOptions {
    pub scripts: bool,
    pub styles: bool,
    pub vendor: bool,
    pub hidden: bool,
}

impl SourceMapOptions {
    pub fn all(enabled: bool) -> Self {
        Self {
            scripts: enabled,
            styles: enabled,
            vendor: false,
            hidden: false,
        }
    }
}

impl Default for SourceMapOptions {
    fn default() -> Self {
        Self::all(true)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSourceMap {
    Flag(bool),
    Detailed {
        #[serde(default = "crate::build::helpers::default_true")]
        scripts: bool,
        #[serde(default = "crate::build::helpers::default_true")]
        styles: bool,
        #[serde(default)]
        vendor: bool,
        #[serde(default)]
        hidden: bool,
    },
}

impl From<RawSourceMap> for SourceMapOptions {
    fn from(raw: RawSourceMap) -> Self {
        match raw {
            RawSourceMap::Flag(enabled) => Self::all(enabled),
            RawSourceMap::Detailed {
                scripts,
                styles,
                vendor,
                hidden,
            } => Self {
                scripts,
                styles,
                vendor,
                hidden,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optimization_accepts_boolean() {
        let opts: OptimizationOptions = serde_json::from_value(json!(true)).unwrap();
        assert!(opts.scripts);
        assert!(opts.styles);
    }

    #[test]
    fn optimization_accepts_object() {
        let opts: OptimizationOptions =
            serde_json::from_value(json!({ "scripts": true })).unwrap();
        assert!(opts.scripts);
        assert!(!opts.styles);
        assert!(opts.any());
    }

    #[test]
    fn source_map_object_defaults_to_scripts_and_styles() {
        let maps: SourceMapOptions = serde_json::from_value(json!({ "vendor": true })).unwrap();
        assert!(maps.scripts);
        assert!(maps.styles);
        assert!(maps.vendor);
        assert!(!maps.hidden);
    }

    #[test]
    fn source_map_false_disables_everything() {
        let maps: SourceMapOptions = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(maps, SourceMapOptions::all(false));
    }

    #[test]
    fn output_hashing_is_lowercase() {
        assert_eq!(
            serde_json::to_value(OutputHashing::Bundles).unwrap(),
            json!("bundles")
        );
        let parsed: OutputHashing = serde_json::from_value(json!("media")).unwrap();
        assert_eq!(parsed, OutputHashing::Media);
    }
}
