//! JSON configuration interpreter.

use tenantry_core::{ConfigError, SharedSchemaContextRequest};
use tenantry_ddl::SharedSchemaContextBuilder;

use crate::submit_builder_factory_supplier;
use crate::supplier::{BuilderFactorySupplier, SharedSchemaContextBuilderFactory};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSharedSchemaContextBuilderFactory;

impl SharedSchemaContextBuilderFactory for JsonSharedSchemaContextBuilderFactory {
    fn build_from_str(&self, content: &str) -> Result<SharedSchemaContextBuilder, ConfigError> {
        let request = SharedSchemaContextRequest::from_json(content)?;
        tracing::debug!(
            tables = request.tables.len(),
            schema = request.schema(),
            "Parsed JSON configuration"
        );
        Ok(SharedSchemaContextBuilder::from_request(request))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonBuilderFactorySupplier;

impl JsonBuilderFactorySupplier {
    pub const fn new() -> Self {
        Self
    }
}

impl BuilderFactorySupplier for JsonBuilderFactorySupplier {
    fn supported_file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &'static str {
        "JsonBuilderFactorySupplier"
    }

    fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory> {
        Box::new(JsonSharedSchemaContextBuilderFactory)
    }
}

submit_builder_factory_supplier!(JsonBuilderFactorySupplier);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_json() {
        let builder = JsonSharedSchemaContextBuilderFactory
            .build_from_str(
                r#"{
                    "grantee": "owner",
                    "force_row_level_security_for_table_owner": true,
                    "tables": [{ "name": "users", "rls_policy_name": "users_policy" }]
                }"#,
            )
            .unwrap();

        let request = builder.request();
        assert_eq!(request.schema(), None);
        assert!(request.force_row_level_security_for_table_owner);
        assert_eq!(request.tables[0].policy_name(), "users_policy");
    }

    #[test]
    fn test_unknown_command_rejected() {
        let result = JsonSharedSchemaContextBuilderFactory
            .build_from_str(r#"{ "tables": [{ "name": "users", "command": "TRUNCATE" }] }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
