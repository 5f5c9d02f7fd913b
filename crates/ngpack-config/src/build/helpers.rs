use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_asset_output() -> PathBuf {
    PathBuf::from("/")
}
