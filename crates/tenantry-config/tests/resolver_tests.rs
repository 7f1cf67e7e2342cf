//! Resolution of configuration files to builders.
//!
//! Run with: cargo test --package tenantry-config --test resolver_tests

use std::fs;
use std::sync::Arc;

use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tenantry_config::{
    BuilderFactoryResolver, BuilderFactorySupplier, ResolutionError,
    SharedSchemaContextBuilderFactory, YamlBuilderFactorySupplier,
    YamlSharedSchemaContextBuilderFactory,
};
use tenantry_core::ConfigError;
use tenantry_ddl::SharedSchemaContextBuilder;

const USERS_CONFIG: &str = r#"
grantee: owner
get_current_tenant_id_function_name: rls_get_current_tenant
tables:
  - name: users
"#;

/// Parses YAML like the built-in interpreter, then overrides the grantee.
struct OverridingFactory;

impl SharedSchemaContextBuilderFactory for OverridingFactory {
    fn build_from_str(&self, content: &str) -> Result<SharedSchemaContextBuilder, ConfigError> {
        Ok(YamlSharedSchemaContextBuilderFactory
            .build_from_str(content)?
            .set_grantee("overridden"))
    }
}

struct PrioritySupplier {
    name: &'static str,
    extensions: &'static [&'static str],
    priority: i32,
}

impl BuilderFactorySupplier for PrioritySupplier {
    fn supported_file_extensions(&self) -> &[&str] {
        self.extensions
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory> {
        if self.priority > 0 {
            Box::new(OverridingFactory)
        } else {
            Box::new(YamlSharedSchemaContextBuilderFactory)
        }
    }
}

fn write_config(dir: &TempDir, file_name: &str, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(file_name);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_yaml_file_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, "tenantry.yaml", USERS_CONFIG)?;

    let resolver = BuilderFactoryResolver::new();
    let factory = resolver.resolve(&path)?;
    let context = factory.build(&path)?.build()?;
    let script = context.create_script();

    assert!(script.starts_with(
        "CREATE OR REPLACE FUNCTION rls_get_current_tenant() RETURNS VARCHAR(255) as $$"
    ));
    assert!(script.contains("CREATE POLICY users_table_rls_policy ON users\nFOR ALL\nTO owner\n"));
    Ok(())
}

#[test]
fn test_built_in_extensions() -> Result<()> {
    let dir = TempDir::new()?;
    let resolver = BuilderFactoryResolver::new();

    let yml = write_config(&dir, "tenantry.yml", "grantee: owner\n")?;
    let json = write_config(&dir, "tenantry.json", r#"{ "grantee": "owner" }"#)?;
    let toml = write_config(&dir, "tenantry.toml", "grantee = \"owner\"\n")?;

    for path in [yml, json, toml] {
        let builder = resolver.resolve(&path)?.build(&path)?;
        assert_eq!(builder.request().grantee.as_deref(), Some("owner"));
    }
    Ok(())
}

#[test]
fn test_explicit_supplier_with_higher_priority_wins() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_config(&dir, "tenantry.yaml", USERS_CONFIG)?;

    let resolver = BuilderFactoryResolver::without_discovery()
        .with_supplier(Arc::new(PrioritySupplier {
            name: "low",
            extensions: &["yaml"],
            priority: 1,
        }))
        .with_supplier(Arc::new(PrioritySupplier {
            name: "high",
            extensions: &["yaml"],
            priority: 5,
        }));

    let builder = resolver.resolve(&path)?.build(&path)?;
    assert_eq!(builder.request().grantee.as_deref(), Some("overridden"));
    Ok(())
}

#[test]
fn test_explicit_supplier_overrides_discovered() -> Result<()> {
    let resolver = BuilderFactoryResolver::new().with_supplier(Arc::new(PrioritySupplier {
        name: "custom",
        extensions: &["yml"],
        priority: 10,
    }));

    let builder = resolver.resolve("tenantry.yml")?.build_from_str("grantee: owner\n")?;
    assert_eq!(builder.request().grantee.as_deref(), Some("overridden"));

    // Other extensions still go to the built-in interpreter.
    let builder = resolver.resolve("tenantry.yaml")?.build_from_str("grantee: owner\n")?;
    assert_eq!(builder.request().grantee.as_deref(), Some("owner"));
    Ok(())
}

#[test]
fn test_explicit_supplier_wins_tie_with_discovered() -> Result<()> {
    let resolver = BuilderFactoryResolver::new().with_supplier(Arc::new(PrioritySupplier {
        name: "custom",
        extensions: &["json"],
        priority: 0,
    }));

    // YAML content only parses if the custom supplier was chosen.
    let builder = resolver
        .resolve("tenantry.json")?
        .build_from_str("grantee: owner\n")?;
    assert_eq!(builder.request().grantee.as_deref(), Some("owner"));
    Ok(())
}

#[test]
fn test_unsupported_extension_lists_considered_suppliers() {
    let resolver = BuilderFactoryResolver::without_discovery()
        .with_supplier(Arc::new(PrioritySupplier {
            name: "yaml",
            extensions: &["yaml"],
            priority: 0,
        }))
        .with_supplier(Arc::new(PrioritySupplier {
            name: "json",
            extensions: &["json"],
            priority: 0,
        }));

    match resolver.resolve("config.toml") {
        Err(ResolutionError::NoSupplier {
            path,
            supported_extensions,
        }) => {
            assert_eq!(path.to_str(), Some("config.toml"));
            assert_eq!(
                supported_extensions.into_iter().collect::<Vec<_>>(),
                vec!["json".to_string(), "yaml".to_string()]
            );
        }
        Ok(_) => panic!("config.toml should not resolve"),
    }
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let resolver = BuilderFactoryResolver::new();
    assert!(resolver.resolve("TENANTRY.YAML").is_err());
}

#[test]
fn test_missing_file_is_io_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("missing.yaml");

    let result = BuilderFactoryResolver::new().resolve(&path)?.build(&path);
    assert!(matches!(result, Err(ConfigError::Io(_))));
    Ok(())
}

#[test]
fn test_each_built_in_supplier_is_considered_once() {
    let resolver = BuilderFactoryResolver::new();
    assert_eq!(resolver.suppliers().len(), 3);

    for file in ["a.yaml", "a.yml", "a.json", "a.toml"] {
        assert!(resolver.resolve(file).is_ok(), "{file} did not resolve");
    }
    let yaml_suppliers = resolver
        .suppliers()
        .into_iter()
        .filter(|supplier| supplier.name() == YamlBuilderFactorySupplier::new().name())
        .count();
    assert_eq!(yaml_suppliers, 1);
}
