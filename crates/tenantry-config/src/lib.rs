//! # tenantry-config
//!
//! Turns configuration files into [`SharedSchemaContextBuilder`]s.
//!
//! Interpreters for a file format are published as [`BuilderFactorySupplier`]s.
//! Suppliers register themselves at link time with
//! [`submit_builder_factory_supplier!`], or are handed to a
//! [`BuilderFactoryResolver`] explicitly. The resolver picks the supplier for a
//! path by file extension and priority.
//!
//! ## Built-in Interpreters
//!
//! | Supplier | Extensions | Priority |
//! |----------|------------|----------|
//! | [`YamlBuilderFactorySupplier`] | `yaml`, `yml` | 0 |
//! | [`JsonBuilderFactorySupplier`] | `json` | 0 |
//! | [`TomlBuilderFactorySupplier`] | `toml` | 0 |
//!
//! ## Example
//!
//! ```no_run
//! use tenantry_config::BuilderFactoryResolver;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::path::Path::new("tenantry.yaml");
//! let factory = BuilderFactoryResolver::new().resolve(path)?;
//! let context = factory.build(path)?.build()?;
//! println!("{}", context.create_script());
//! # Ok(())
//! # }
//! ```
//!
//! [`SharedSchemaContextBuilder`]: tenantry_ddl::SharedSchemaContextBuilder

pub mod error;
pub mod interpreters;
pub mod registry;
pub mod resolver;
pub mod supplier;

// Re-export inventory for use in submit_builder_factory_supplier! macro
pub use inventory;

pub use error::ResolutionError;
pub use interpreters::{
    JsonBuilderFactorySupplier, JsonSharedSchemaContextBuilderFactory,
    TomlBuilderFactorySupplier, TomlSharedSchemaContextBuilderFactory,
    YamlBuilderFactorySupplier, YamlSharedSchemaContextBuilderFactory,
};
pub use registry::discovered_suppliers;
pub use resolver::{BuilderFactoryResolver, resolve_supplier_for_file};
pub use supplier::{BuilderFactorySupplier, SharedSchemaContextBuilderFactory};
