//! Content-hash filename suffixes.

use ngpack_config::{OutputHashing, ScriptTarget};

/// Hash placeholder length used in every suffix.
pub const HASH_LENGTH: usize = 20;

/// Filename suffixes for each output category.
///
/// An empty string means "no hash" for that category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashFormat {
    /// JavaScript chunks
    pub chunk: String,
    /// Extracted stylesheets
    pub extract: String,
    /// Files emitted by the file loader (media)
    pub file: String,
    /// Global script bundles
    pub script: String,
}

impl HashFormat {
    pub fn for_mode(mode: OutputHashing) -> Self {
        Self::with_length(mode, HASH_LENGTH)
    }

    pub fn with_length(mode: OutputHashing, length: usize) -> Self {
        let chunk = format!(".[chunkhash:{length}]");
        let extract = format!(".[contenthash:{length}]");
        let file = format!(".[hash:{length}]");
        let script = format!(".[hash:{length}]");

        match mode {
            OutputHashing::None => Self::default(),
            OutputHashing::Media => Self {
                file,
                ..Self::default()
            },
            OutputHashing::Bundles => Self {
                chunk,
                extract,
                script,
                ..Self::default()
            },
            OutputHashing::All => Self {
                chunk,
                extract,
                file,
                script,
            },
        }
    }
}

/// `-es2015` style suffix for output names, or an empty string.
pub fn es_version_suffix(target: Option<ScriptTarget>, enabled: bool) -> String {
    match target {
        Some(target) if enabled => format!("-{}", target.as_str()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_has_no_suffixes() {
        assert_eq!(HashFormat::for_mode(OutputHashing::None), HashFormat::default());
    }

    #[test]
    fn media_only_hashes_files() {
        let format = HashFormat::for_mode(OutputHashing::Media);
        assert_eq!(format.file, ".[hash:20]");
        assert!(format.chunk.is_empty());
        assert!(format.extract.is_empty());
        assert!(format.script.is_empty());
    }

    #[test]
    fn bundles_hash_everything_but_media() {
        let format = HashFormat::for_mode(OutputHashing::Bundles);
        assert_eq!(format.chunk, ".[chunkhash:20]");
        assert_eq!(format.extract, ".[contenthash:20]");
        assert_eq!(format.script, ".[hash:20]");
        assert!(format.file.is_empty());
    }

    #[test]
    fn all_hashes_everything() {
        let format = HashFormat::for_mode(OutputHashing::All);
        assert_eq!(format.chunk, ".[chunkhash:20]");
        assert_eq!(format.extract, ".[contenthash:20]");
        assert_eq!(format.file, ".[hash:20]");
        assert_eq!(format.script, ".[hash:20]");
    }

    #[test]
    fn custom_length() {
        let format = HashFormat::with_length(OutputHashing::Bundles, 8);
        assert_eq!(format.chunk, ".[chunkhash:8]");
    }

    #[test]
    fn version_suffix_requires_flag_and_target() {
        assert_eq!(es_version_suffix(Some(ScriptTarget::ES2015), true), "-es2015");
        assert_eq!(es_version_suffix(Some(ScriptTarget::ES5), true), "-es5");
        assert_eq!(es_version_suffix(Some(ScriptTarget::ES2015), false), "");
        assert_eq!(es_version_suffix(None, true), "");
    }
}
