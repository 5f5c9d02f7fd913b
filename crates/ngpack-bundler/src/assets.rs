//! Asset copy patterns.

use ngpack_config::{AssetPattern, AssetPatternObject};
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::context::ProjectContext;
use crate::host::ProjectHost;
use crate::paths::to_slash;
use crate::{Error, Result};

/// Files never copied, whatever the pattern says.
pub const COPY_IGNORE: &[&str] = &[".gitkeep", "**/.DS_Store", "**/Thumbs.db"];

/// One pattern of the copy plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    /// Absolute source directory, always ending with `/`
    pub context: String,
    /// Destination relative to the output root, ending with `/` unless empty
    pub to: String,
    pub ignore: Vec<String>,
    pub from: CopyFrom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFrom {
    pub glob: String,
    /// Dotfiles are matched too
    pub dot: bool,
}

fn with_trailing_slash(mut path: String) -> String {
    if !path.ends_with('/') {
        path.push('/');
    }
    path
}

/// Expand the string form of an asset.
///
/// The path must live under the source root. A directory (or a path that
/// does not exist yet) copies its whole tree, a file copies itself. Either
/// way the destination mirrors the location relative to the source root.
fn expand_path(
    asset: &str,
    context: &ProjectContext,
    host: &dyn ProjectHost,
) -> Result<AssetPatternObject> {
    let resolved = context.resolve(to_slash(asset));
    let source_root = context.sources();

    let outside = || Error::AssetOutsideSourceRoot {
        asset: asset.to_string(),
        source_root: to_slash(&source_root),
    };
    if !resolved.starts_with(&source_root) {
        return Err(outside());
    }

    let (glob, input) = if !host.exists(&resolved) || host.is_dir(&resolved) {
        ("**/*".to_string(), resolved)
    } else {
        let glob = resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let input = resolved.parent().map(Path::to_path_buf).ok_or_else(outside)?;
        (glob, input)
    };

    let output = input
        .strip_prefix(&source_root)
        .map(Path::to_path_buf)
        .map_err(|_| outside())?;

    Ok(AssetPatternObject {
        glob,
        input,
        output,
        ignore: Vec::new(),
    })
}

/// Destination relative to the output root, cleaned lexically.
///
/// Leading separators are dropped, so `/assets` and `assets` are the same
/// place. Returns `None` when the cleaned path climbs above the root.
fn output_destination(output: &str) -> Option<String> {
    let relative = output.trim_start_matches('/');
    let cleaned = PathBuf::from(relative).clean();

    match cleaned.components().next() {
        Some(Component::ParentDir) => None,
        Some(Component::CurDir) | None => Some(String::new()),
        Some(_) => Some(with_trailing_slash(to_slash(&cleaned))),
    }
}

/// Normalize one asset entry into a copy pattern.
///
/// # Errors
///
/// [`Error::AssetOutsideOutputPath`] when the destination resolves above
/// the output root, [`Error::AssetOutsideSourceRoot`] when a string entry
/// points outside the source root.
pub fn normalize_asset(
    asset: &AssetPattern,
    context: &ProjectContext,
    host: &dyn ProjectHost,
) -> Result<CopyPattern> {
    let asset = match asset {
        AssetPattern::Path(path) => expand_path(path, context, host)?,
        AssetPattern::Detailed(object) => object.clone(),
    };

    let input = with_trailing_slash(to_slash(context.resolve(&asset.input)));
    let output = to_slash(&asset.output);

    let to = output_destination(&output).ok_or_else(|| Error::AssetOutsideOutputPath {
        output: with_trailing_slash(output.clone()),
    })?;

    Ok(CopyPattern {
        context: input,
        to,
        ignore: asset.ignore,
        from: CopyFrom {
            glob: asset.glob,
            dot: true,
        },
    })
}

/// Normalize every asset entry, failing on the first invalid one.
pub fn normalize_assets(
    assets: &[AssetPattern],
    context: &ProjectContext,
    host: &dyn ProjectHost,
) -> Result<Vec<CopyPattern>> {
    assets
        .iter()
        .map(|asset| normalize_asset(asset, context, host))
        .collect()
}
