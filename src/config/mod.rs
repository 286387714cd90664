//! Configuration sources, schemas and the `Config` facade.

mod builder;
mod env;
mod error;
mod facade;
mod file;
mod json;
mod schema;
mod source;

pub use builder::ConfigBuilder;
pub use env::{coerce_value, locate_env_file, EnvFileSource, DEFAULT_ENV_FILE};
pub use error::ConfigError;
pub use facade::Config;
pub use json::{resolve_document_path, JsonFileSource, JSON_PATH_ENV_VAR};
pub use schema::{Fallback, Schema, Settings};
pub use source::{lookup_path, ConfigSource};
