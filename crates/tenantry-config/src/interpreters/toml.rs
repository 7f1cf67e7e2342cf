//! TOML configuration interpreter.

use tenantry_core::{ConfigError, SharedSchemaContextRequest};
use tenantry_ddl::SharedSchemaContextBuilder;

use crate::submit_builder_factory_supplier;
use crate::supplier::{BuilderFactorySupplier, SharedSchemaContextBuilderFactory};

#[derive(Debug, Default, Clone, Copy)]
pub struct TomlSharedSchemaContextBuilderFactory;

impl SharedSchemaContextBuilderFactory for TomlSharedSchemaContextBuilderFactory {
    fn build_from_str(&self, content: &str) -> Result<SharedSchemaContextBuilder, ConfigError> {
        let request = SharedSchemaContextRequest::from_toml(content)?;
        tracing::debug!(
            tables = request.tables.len(),
            schema = request.schema(),
            "Parsed TOML configuration"
        );
        Ok(SharedSchemaContextBuilder::from_request(request))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TomlBuilderFactorySupplier;

impl TomlBuilderFactorySupplier {
    pub const fn new() -> Self {
        Self
    }
}

impl BuilderFactorySupplier for TomlBuilderFactorySupplier {
    fn supported_file_extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn name(&self) -> &'static str {
        "TomlBuilderFactorySupplier"
    }

    fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory> {
        Box::new(TomlSharedSchemaContextBuilderFactory)
    }
}

submit_builder_factory_supplier!(TomlBuilderFactorySupplier);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_toml() {
        let builder = TomlSharedSchemaContextBuilderFactory
            .build_from_str(
                r#"
default_schema = "app"
current_tenant_id_property_type = "UUID"
grantee = "owner"

[[tables]]
name = "users"
"#,
            )
            .unwrap();

        let request = builder.request();
        assert_eq!(request.current_tenant_id_property_type.as_deref(), Some("UUID"));
        assert_eq!(request.tables[0].name, "users");
    }
}
