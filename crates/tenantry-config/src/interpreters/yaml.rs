//! YAML configuration interpreter.

use tenantry_core::{ConfigError, SharedSchemaContextRequest};
use tenantry_ddl::SharedSchemaContextBuilder;

use crate::submit_builder_factory_supplier;
use crate::supplier::{BuilderFactorySupplier, SharedSchemaContextBuilderFactory};

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlSharedSchemaContextBuilderFactory;

impl SharedSchemaContextBuilderFactory for YamlSharedSchemaContextBuilderFactory {
    fn build_from_str(&self, content: &str) -> Result<SharedSchemaContextBuilder, ConfigError> {
        let request = SharedSchemaContextRequest::from_yaml(content)?;
        tracing::debug!(
            tables = request.tables.len(),
            schema = request.schema(),
            "Parsed YAML configuration"
        );
        Ok(SharedSchemaContextBuilder::from_request(request))
    }
}

/// Handles `.yaml` and `.yml` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlBuilderFactorySupplier;

impl YamlBuilderFactorySupplier {
    pub const fn new() -> Self {
        Self
    }
}

impl BuilderFactorySupplier for YamlBuilderFactorySupplier {
    fn supported_file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn name(&self) -> &'static str {
        "YamlBuilderFactorySupplier"
    }

    fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory> {
        Box::new(YamlSharedSchemaContextBuilderFactory)
    }
}

submit_builder_factory_supplier!(YamlBuilderFactorySupplier);
