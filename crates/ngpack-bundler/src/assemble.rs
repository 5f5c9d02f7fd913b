//! Final composition of the bundler configuration.

use ngpack_config::{BuildOptions, ScriptTarget, validate_schema};

use crate::assets::normalize_assets;
use crate::context::ProjectContext;
use crate::entries::build_entry_points;
use crate::features::{BrowserFeatures, BrowserslistFeatures, LegacySupport};
use crate::hashing::{HashFormat, es_version_suffix};
use crate::host::{NativeHost, ProjectHost};
use crate::minimizers::minimizers;
use crate::output::{
    BundlerConfig, Mode, ModuleConfig, Optimization, Output, Performance, Resolve, ResolveLoader,
    WatchOptions,
};
use crate::paths::{resolve_path, to_slash};
use crate::plugins::{PluginInputs, plugins};
use crate::rules::module_rules;
use crate::scripts::{group_scripts, normalize_scripts};
use crate::{Error, Result};

pub const NODE_MODULES: &str = "node_modules";

pub const RESOLVE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mjs", ".js"];

/// Ignored by the watcher when polling.
pub const POLL_IGNORED: &str = "node_modules/**";

const ASYNC_AWAIT_WARNING: &str = "Zone.js does not support native async/await in ES2017 and later. \
     These blocks are not intercepted by zone.js and will not trigger change detection. \
     See https://github.com/angular/zone.js/pull/1140 for more information.";

/// Notice for compiler targets whose native async/await escapes zone.js.
pub fn async_await_warning(target: ScriptTarget) -> Option<&'static str> {
    (target >= ScriptTarget::ES2017).then_some(ASYNC_AWAIT_WARNING)
}

/// Derives one [`BundlerConfig`] from build options and project context.
///
/// Assembly is deterministic: the same inputs and the same host contents
/// always give structurally identical output.
pub struct Assembler<'a> {
    options: &'a BuildOptions,
    context: &'a ProjectContext,
    host: &'a dyn ProjectHost,
    features: &'a dyn BrowserFeatures,
}

impl<'a> Assembler<'a> {
    pub fn new(
        options: &'a BuildOptions,
        context: &'a ProjectContext,
        host: &'a dyn ProjectHost,
        features: &'a dyn BrowserFeatures,
    ) -> Self {
        Self {
            options,
            context,
            host,
            features,
        }
    }

    pub fn assemble(&self) -> Result<BundlerConfig> {
        let options = self.options;
        let context = self.context;

        validate_schema(options)?;

        let node_modules = self
            .host
            .find_up(NODE_MODULES, &context.project_root)
            .ok_or_else(|| Error::DependencyDirectoryNotFound {
                searched_from: to_slash(&context.project_root),
            })?;

        let target = context.script_target();
        let legacy = LegacySupport::resolve(options, context.compiler_options.target, self.features);
        tracing::debug!(
            script_target = %target,
            differential_loading = legacy.differential_loading,
            es5_polyfills = legacy.es5_polyfills,
            no_module_polyfill = legacy.no_module_polyfill,
            "legacy browser support"
        );

        let effective_target = options.script_target_override.unwrap_or(target);
        let suffix = es_version_suffix(
            options.script_target_override.or(context.compiler_options.target),
            options.es_version_in_file_name,
        );

        let entry = build_entry_points(options, context, &legacy);

        let scripts = normalize_scripts(&options.scripts, context, legacy.no_module_polyfill);
        let script_bundles = group_scripts(&scripts, context)?;
        let global_script_names: Vec<String> = script_bundles
            .iter()
            .map(|bundle| bundle.bundle_name.clone())
            .collect();

        let hash = HashFormat::for_mode(options.output_hashing);
        let assets = normalize_assets(&options.assets, context, self.host)?;

        let es2015 = effective_target.supports_es2015();
        let alias = self.host.path_mapping(&node_modules, es2015).unwrap_or_default();
        tracing::debug!(aliases = alias.len(), "module aliases");

        let loader_modules = std::iter::once(NODE_MODULES.to_string())
            .chain(
                self.host
                    .find_all_up(NODE_MODULES, &context.shims_dir, &context.project_root)
                    .into_iter()
                    .map(to_slash),
            )
            .collect();

        if let Some(warning) = async_await_warning(target) {
            tracing::warn!("{warning}");
        }

        let symlinks = !options.preserve_symlinks;
        let base_dir = match &context.compiler_options.base_url {
            Some(base_url) => resolve_path(&context.project_root, base_url),
            None => context.project_root.clone(),
        };

        let rules = module_rules(options, context, &hash);
        let minimizer = minimizers(options, &legacy, es2015, &global_script_names);
        let plugins = plugins(
            options,
            context,
            PluginInputs {
                scripts: &script_bundles,
                assets,
                hash: &hash,
                suffix: &suffix,
            },
        );

        let config = BundlerConfig {
            mode: if options.optimization.any() {
                Mode::Production
            } else {
                Mode::Development
            },
            devtool: false,
            profile: options.stats_json,
            resolve: Resolve {
                extensions: RESOLVE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
                symlinks,
                modules: vec![to_slash(&base_dir), NODE_MODULES.to_string()],
                alias,
            },
            resolve_loader: ResolveLoader {
                symlinks,
                modules: loader_modules,
            },
            context: to_slash(&context.project_root),
            entry,
            output: Output {
                path: to_slash(context.resolve(&options.output_path)),
                public_path: options.deploy_url.clone(),
                filename: format!("[name]{suffix}{}.js", hash.chunk),
                future_emit_assets: true,
            },
            watch: options.watch,
            watch_options: WatchOptions {
                poll: options.poll,
                ignored: options.poll.map(|_| POLL_IGNORED.to_string()),
            },
            performance: Performance { hints: false },
            module: ModuleConfig {
                strict_export_presence: true,
                rules,
            },
            optimization: Optimization {
                no_emit_on_errors: true,
                minimizer,
            },
            plugins,
        };

        tracing::debug!(
            mode = ?config.mode,
            entries = config.entry.len(),
            rules = config.module.rules.len(),
            plugins = config.plugins.len(),
            minimizers = config.optimization.minimizer.len(),
            "assembled bundler configuration"
        );

        Ok(config)
    }
}

/// Assemble with an explicit host and feature detector.
pub fn assemble(
    options: &BuildOptions,
    context: &ProjectContext,
    host: &dyn ProjectHost,
    features: &dyn BrowserFeatures,
) -> Result<BundlerConfig> {
    Assembler::new(options, context, host, features).assemble()
}

/// Assemble against the real filesystem, detecting browser features from
/// the project's browserslist configuration.
pub fn assemble_native(options: &BuildOptions, context: &ProjectContext) -> Result<BundlerConfig> {
    let features = BrowserslistFeatures::load(&NativeHost, &context.project_root);
    assemble(options, context, &NativeHost, &features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::StaticFeatures;
    use crate::host::FixedHost;

    #[test]
    fn warns_for_es2017_and_later() {
        assert!(async_await_warning(ScriptTarget::ES2015).is_none());
        assert!(async_await_warning(ScriptTarget::ES2017).is_some());
        assert!(async_await_warning(ScriptTarget::ESNext).is_some());
    }

    #[test]
    fn missing_dependency_directory_is_fatal() {
        let options = BuildOptions::new("src/main.ts");
        let context = ProjectContext::new("/work");
        let result = assemble(&options, &context, &FixedHost::new(), &StaticFeatures::modern());
        assert!(matches!(result, Err(Error::DependencyDirectoryNotFound { .. })));
    }

    #[test]
    fn schema_errors_surface_as_config_errors() {
        let options = BuildOptions {
            poll: Some(0),
            ..BuildOptions::default()
        };
        let context = ProjectContext::new("/work");
        let host = FixedHost::new().dir("/work/node_modules");
        let result = assemble(&options, &context, &host, &StaticFeatures::modern());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn polling_ignores_dependencies() {
        let options = BuildOptions {
            watch: true,
            poll: Some(1000),
            ..BuildOptions::default()
        };
        let context = ProjectContext::new("/work");
        let host = FixedHost::new().dir("/work/node_modules");
        let config = assemble(&options, &context, &host, &StaticFeatures::modern()).unwrap();
        assert!(config.watch);
        assert_eq!(config.watch_options.poll, Some(1000));
        assert_eq!(config.watch_options.ignored.as_deref(), Some(POLL_IGNORED));
    }
}
