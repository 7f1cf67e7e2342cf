// Configuration types shared across all Tenantry crates
pub mod config;

pub use config::{
    ConfigError, PermissionCommand, PrimaryKeyColumn, SharedSchemaContextRequest,
    TableRlsDefinition,
};
