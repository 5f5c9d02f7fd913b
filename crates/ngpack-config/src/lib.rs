pub mod build;
pub mod compiler;
pub mod error;
pub mod loading;
pub mod validation;

// Re-export main types
pub use build::*;
pub use compiler::{CompilerOptions, ScriptTarget};
pub use error::*;

pub use loading::{ENV_PREFIX, OptionsLoader};
pub use validation::{OptionsValidator, SchemaValidator, validate_schema};
