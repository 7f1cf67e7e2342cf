//! Configuration types for Tenantry.
//!
//! This module provides the request model shared by all Tenantry crates.
//! A request can be built in code or deserialized from YAML, JSON or TOML.
//!
//! # Example (YAML)
//!
//! ```yaml
//! default_schema: public
//! current_tenant_id_property: app.tenant_id
//! grantee: application_user
//! force_row_level_security_for_table_owner: true
//! tables:
//!   - name: users
//!   - name: posts
//!     tenant_column: tenant
//!     rls_policy_name: posts_tenant_policy
//!     primary_key_columns:
//!       - name: id
//!         type: bigint
//!     record_belongs_to_current_tenant_function_name: is_post_of_current_tenant
//! ```

pub mod command;
pub mod request;

pub use command::PermissionCommand;
pub use request::{PrimaryKeyColumn, SharedSchemaContextRequest, TableRlsDefinition};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
