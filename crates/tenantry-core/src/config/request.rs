//! Shared schema multi-tenancy request.
//!
//! The request describes everything the DDL pipeline needs: where the
//! generated functions live, how the current tenant is stored in the session,
//! which tables are tenant scoped and who the policies apply to.

use serde::{Deserialize, Serialize};

use super::{ConfigError, PermissionCommand};

/// Input of a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSchemaContextRequest {
    /// Schema used to qualify every generated object. Unqualified when absent.
    #[serde(default)]
    pub default_schema: Option<String>,

    /// Name of the session setting that holds the current tenant identifier.
    #[serde(default = "default_current_tenant_id_property")]
    pub current_tenant_id_property: String,

    /// SQL type of the tenant identifier. `VARCHAR(255)` when absent.
    #[serde(default)]
    pub current_tenant_id_property_type: Option<String>,

    #[serde(default = "default_get_current_tenant_id_function_name")]
    pub get_current_tenant_id_function_name: String,

    #[serde(default = "default_set_current_tenant_id_function_name")]
    pub set_current_tenant_id_function_name: String,

    #[serde(default = "default_equals_current_tenant_identifier_function_name")]
    pub equals_current_tenant_identifier_function_name: String,

    #[serde(default = "default_tenant_has_authorities_function_name")]
    pub tenant_has_authorities_function_name: String,

    /// Whether table owners are subject to the policies as well.
    #[serde(default)]
    pub force_row_level_security_for_table_owner: bool,

    /// Role the policies are granted to.
    #[serde(default)]
    pub grantee: Option<String>,

    /// Tenant scoped tables, in emission order.
    #[serde(default)]
    pub tables: Vec<TableRlsDefinition>,
}

impl Default for SharedSchemaContextRequest {
    fn default() -> Self {
        Self {
            default_schema: None,
            current_tenant_id_property: default_current_tenant_id_property(),
            current_tenant_id_property_type: None,
            get_current_tenant_id_function_name: default_get_current_tenant_id_function_name(),
            set_current_tenant_id_function_name: default_set_current_tenant_id_function_name(),
            equals_current_tenant_identifier_function_name:
                default_equals_current_tenant_identifier_function_name(),
            tenant_has_authorities_function_name: default_tenant_has_authorities_function_name(),
            force_row_level_security_for_table_owner: false,
            grantee: None,
            tables: Vec::new(),
        }
    }
}

impl SharedSchemaContextRequest {
    /// Create a request targeting the given schema.
    pub fn new(default_schema: Option<String>) -> Self {
        Self {
            default_schema,
            ..Self::default()
        }
    }

    /// Parse a request from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Parse a request from JSON content.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Parse a request from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Get the table definition with the given name, appending a default
    /// one when the table is not listed yet.
    pub fn table_mut(&mut self, name: &str) -> &mut TableRlsDefinition {
        let index = match self.tables.iter().position(|t| t.name == name) {
            Some(index) => index,
            None => {
                self.tables.push(TableRlsDefinition::new(name));
                self.tables.len() - 1
            }
        };
        &mut self.tables[index]
    }

    /// Get the schema, treating a blank value as absent.
    pub fn schema(&self) -> Option<&str> {
        self.default_schema
            .as_deref()
            .filter(|schema| !schema.trim().is_empty())
    }
}

/// Row level security settings for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRlsDefinition {
    /// Table name, without schema.
    pub name: String,

    /// Column holding the tenant identifier of a row.
    #[serde(default = "default_tenant_column")]
    pub tenant_column: String,

    /// Policy name. Derived from the table name when absent.
    #[serde(default)]
    pub rls_policy_name: Option<String>,

    /// Commands the policy applies to.
    #[serde(default)]
    pub command: PermissionCommand,

    /// Primary key columns, in key order.
    #[serde(default)]
    pub primary_key_columns: Vec<PrimaryKeyColumn>,

    /// Name of the function checking that a row, identified by its primary
    /// key, belongs to the current tenant. Not generated when absent.
    #[serde(default)]
    pub record_belongs_to_current_tenant_function_name: Option<String>,
}

impl TableRlsDefinition {
    /// Create a definition using the default tenant column and policy name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tenant_column: default_tenant_column(),
            rls_policy_name: None,
            command: PermissionCommand::default(),
            primary_key_columns: Vec::new(),
            record_belongs_to_current_tenant_function_name: None,
        }
    }

    /// Get the effective policy name.
    pub fn policy_name(&self) -> String {
        self.rls_policy_name
            .clone()
            .unwrap_or_else(|| format!("{}_table_rls_policy", self.name))
    }
}

/// A primary key column and its SQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeyColumn {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,
}

impl PrimaryKeyColumn {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

// Default value functions
fn default_current_tenant_id_property() -> String {
    "tenantry.tenant_id".to_string()
}

fn default_get_current_tenant_id_function_name() -> String {
    "get_current_tenant_id".to_string()
}

fn default_set_current_tenant_id_function_name() -> String {
    "set_current_tenant_id".to_string()
}

fn default_equals_current_tenant_identifier_function_name() -> String {
    "equals_current_tenant_identifier".to_string()
}

fn default_tenant_has_authorities_function_name() -> String {
    "tenant_has_authorities".to_string()
}

fn default_tenant_column() -> String {
    "tenant_id".to_string()
}
