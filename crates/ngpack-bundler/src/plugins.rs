//! Plugin list.

use ngpack_config::BuildOptions;
use serde::Serialize;

use crate::assets::{COPY_IGNORE, CopyPattern};
use crate::conditional::Conditional;
use crate::context::ProjectContext;
use crate::hashing::HashFormat;
use crate::output::Pattern;
use crate::paths::to_slash;
use crate::scripts::ScriptBundle;

/// Dynamic imports inside the framework core resolve to this virtual directory.
pub const LAZY_ROUTE_RESOURCES: &str = "$$_lazy_route_resources";

pub const ANGULAR_CORE_CONTEXT_PATTERN: &str = r"@angular(\\|/)core(\\|/)";

pub const CIRCULAR_DEPENDENCY_EXCLUDE: &str = r"([\\/]node_modules[\\/])|(ngfactory\.js$)";

/// A plugin and its options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PluginSpec {
    /// Redirects the framework's dynamic `System.import` context
    ContextReplacement {
        resource_reg_exp: Pattern,
        new_content_resource: String,
    },
    /// Build profiling trace
    Profiling { output_path: String },
    /// One global script bundle
    Scripts {
        name: String,
        source_map: bool,
        filename: String,
        scripts: Vec<String>,
        base_path: String,
    },
    /// Asset copying
    Copy {
        patterns: Vec<CopyPattern>,
        ignore: Vec<String>,
    },
    Progress { profile: bool },
    CircularDependency { exclude: Pattern },
    /// Writes the build statistics as JSON
    Stats { filename: String, level: String },
    NamedChunks,
    BuildOptimizer,
}

/// Inputs of the plugin list besides the options.
pub struct PluginInputs<'a> {
    pub scripts: &'a [ScriptBundle],
    pub assets: Vec<CopyPattern>,
    pub hash: &'a HashFormat,
    /// ES-version file name suffix (`-es2015` or empty)
    pub suffix: &'a str,
}

/// Plugins in application order.
pub fn plugins(options: &BuildOptions, context: &ProjectContext, inputs: PluginInputs<'_>) -> Vec<PluginSpec> {
    let PluginInputs {
        scripts,
        assets,
        hash,
        suffix,
    } = inputs;
    let base_path = to_slash(&context.project_root);
    let has_assets = !assets.is_empty();

    Conditional::new()
        .always(|| PluginSpec::ContextReplacement {
            resource_reg_exp: Pattern::new(ANGULAR_CORE_CONTEXT_PATTERN),
            new_content_resource: to_slash(context.project_root.join(LAZY_ROUTE_RESOURCES)),
        })
        .when(options.profile, || PluginSpec::Profiling {
            output_path: to_slash(context.resolve(format!("chrome-profiler-events{suffix}.json"))),
        })
        .when_many(!scripts.is_empty(), || {
            scripts
                .iter()
                .map(|bundle| PluginSpec::Scripts {
                    name: bundle.bundle_name.clone(),
                    source_map: options.source_map.scripts,
                    filename: bundle.filename(hash),
                    scripts: bundle.paths.clone(),
                    base_path: base_path.clone(),
                })
                .collect()
        })
        .when(has_assets, || PluginSpec::Copy {
            patterns: assets,
            ignore: COPY_IGNORE.iter().map(|glob| glob.to_string()).collect(),
        })
        .when(options.progress, || PluginSpec::Progress {
            profile: options.verbose,
        })
        .when(options.show_circular_dependencies, || PluginSpec::CircularDependency {
            exclude: Pattern::new(CIRCULAR_DEPENDENCY_EXCLUDE),
        })
        .when(options.stats_json, || PluginSpec::Stats {
            filename: format!("stats{suffix}.json"),
            level: "verbose".to_string(),
        })
        .when(options.named_chunks, || PluginSpec::NamedChunks)
        .when(options.build_optimizer, || PluginSpec::BuildOptimizer)
        .build()
}
