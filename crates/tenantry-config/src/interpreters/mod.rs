//! Built-in configuration interpreters.
//!
//! Each format publishes its supplier through the link time registry.

pub mod json;
pub mod toml;
pub mod yaml;

pub use json::{JsonBuilderFactorySupplier, JsonSharedSchemaContextBuilderFactory};
pub use toml::{TomlBuilderFactorySupplier, TomlSharedSchemaContextBuilderFactory};
pub use yaml::{YamlBuilderFactorySupplier, YamlSharedSchemaContextBuilderFactory};
