//! Module rules.

use ngpack_config::BuildOptions;
use serde::Serialize;
use serde_json::{Value, json};

use crate::conditional::Conditional;
use crate::context::ProjectContext;
use crate::hashing::HashFormat;
use crate::output::Pattern;

/// Media files emitted through the file loader.
pub const FILE_ASSET_PATTERN: &str = r"\.(eot|svg|cur|jpg|png|webp|gif|otf|ttf|woff|woff2|ani)$";

/// Framework core files using SystemJS-style dynamic imports.
pub const ANGULAR_CORE_PATTERN: &str = r"[/\\]@angular[/\\]core[/\\].+\.js$";

pub const JS_PATTERN: &str = r"\.js$";

/// Generated factories carry no upstream source maps.
pub const GENERATED_FACTORY_PATTERN: &str = r"(ngfactory|ngstyle)\.js$";

pub const FILE_LOADER: &str = "file-loader";
pub const SOURCE_MAP_LOADER: &str = "source-map-loader";
pub const BUILD_OPTIMIZER_LOADER: &str = "@angular-devkit/build-optimizer/webpack-loader";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
}

/// A loader with its options, inside a rule's `use` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderUse {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// One module rule.
///
/// ```
/// use ngpack_bundler::ModuleRule;
///
/// let rule = ModuleRule::new(r"\.txt$").loader("raw-loader");
/// assert!(rule.test.is_match("notes.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
    pub test: Pattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Pattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<Value>,
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<LoaderUse>,
}

impl ModuleRule {
    pub fn new(test: impl Into<String>) -> Self {
        Self {
            test: Pattern::new(test),
            exclude: None,
            enforce: None,
            loader: None,
            options: None,
            parser: None,
            uses: Vec::new(),
        }
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(Pattern::new(pattern));
        self
    }

    pub fn enforce(mut self, enforce: Enforce) -> Self {
        self.enforce = Some(enforce);
        self
    }

    pub fn loader(mut self, loader: impl Into<String>) -> Self {
        self.loader = Some(loader.into());
        self
    }

    pub fn options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn parser(mut self, parser: Value) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn with_use(mut self, loader: impl Into<String>, options: Option<Value>) -> Self {
        self.uses.push(LoaderUse {
            loader: loader.into(),
            options,
        });
        self
    }
}

/// Module rules in evaluation order, caller rules last.
pub fn module_rules(options: &BuildOptions, context: &ProjectContext, hash: &HashFormat) -> Vec<ModuleRule> {
    let source_map = options.source_map;
    let vendor_source_maps = (source_map.scripts || source_map.styles) && source_map.vendor;

    Conditional::new()
        .always(|| {
            ModuleRule::new(FILE_ASSET_PATTERN)
                .loader(FILE_LOADER)
                .options(json!({ "name": format!("[name]{}.[ext]", hash.file) }))
        })
        .always(|| ModuleRule::new(ANGULAR_CORE_PATTERN).parser(json!({ "system": true })))
        .when(options.build_optimizer, || {
            ModuleRule::new(JS_PATTERN).with_use(
                BUILD_OPTIMIZER_LOADER,
                Some(json!({ "sourceMap": source_map.scripts })),
            )
        })
        .when(vendor_source_maps, || {
            ModuleRule::new(JS_PATTERN)
                .exclude(GENERATED_FACTORY_PATTERN)
                .enforce(Enforce::Pre)
                .loader(SOURCE_MAP_LOADER)
        })
        .when_many(!context.extra_rules.is_empty(), || context.extra_rules.clone())
        .build()
}
