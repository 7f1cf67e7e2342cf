//! Supplier selection by file extension and priority.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::ResolutionError;
use crate::registry::discovered_suppliers;
use crate::supplier::{BuilderFactorySupplier, SharedSchemaContextBuilderFactory};

/// Picks the builder factory for a configuration file.
///
/// Candidates are the explicitly registered suppliers, in registration order,
/// followed by the discovered ones sorted by name. An explicit supplier
/// registered twice is considered once, and a discovered supplier is skipped
/// when a supplier with the same name is already a candidate.
#[derive(Clone)]
pub struct BuilderFactoryResolver {
    explicit: Vec<Arc<dyn BuilderFactorySupplier>>,
    discovered: Vec<&'static dyn BuilderFactorySupplier>,
}

impl BuilderFactoryResolver {
    /// Create a resolver over the suppliers registered at link time.
    pub fn new() -> Self {
        Self {
            explicit: Vec::new(),
            discovered: discovered_suppliers(),
        }
    }

    /// Create a resolver that only knows explicitly registered suppliers.
    pub fn without_discovery() -> Self {
        Self {
            explicit: Vec::new(),
            discovered: Vec::new(),
        }
    }

    /// Register a supplier in addition to the discovered ones.
    pub fn with_supplier(mut self, supplier: Arc<dyn BuilderFactorySupplier>) -> Self {
        self.explicit.push(supplier);
        self
    }

    /// Every supplier considered, in merge order.
    pub fn suppliers(&self) -> Vec<&dyn BuilderFactorySupplier> {
        let mut explicit: Vec<&Arc<dyn BuilderFactorySupplier>> = Vec::new();
        for supplier in &self.explicit {
            if !explicit.iter().any(|known| Arc::ptr_eq(known, supplier)) {
                explicit.push(supplier);
            }
        }

        // Discovered suppliers are usually zero sized, so their addresses
        // may coincide; names identify them.
        let mut suppliers: Vec<&dyn BuilderFactorySupplier> =
            explicit.into_iter().map(|supplier| supplier.as_ref()).collect();
        for supplier in &self.discovered {
            if !suppliers.iter().any(|known| known.name() == supplier.name()) {
                suppliers.push(*supplier);
            }
        }
        suppliers
    }

    /// Resolve the factory for `path`.
    pub fn resolve(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Box<dyn SharedSchemaContextBuilderFactory>, ResolutionError> {
        let path = path.as_ref();
        let suppliers = self.suppliers();

        match resolve_supplier_for_file(path, &suppliers) {
            Some(supplier) => {
                tracing::debug!(
                    supplier = supplier.name(),
                    priority = supplier.priority(),
                    path = %path.display(),
                    "Resolved builder factory supplier"
                );
                Ok(supplier.factory())
            }
            None => Err(ResolutionError::NoSupplier {
                path: path.to_path_buf(),
                supported_extensions: suppliers
                    .iter()
                    .flat_map(|supplier| supplier.supported_file_extensions())
                    .map(|extension| extension.to_string())
                    .collect::<BTreeSet<_>>(),
            }),
        }
    }
}

impl Default for BuilderFactoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuilderFactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderFactoryResolver")
            .field(
                "suppliers",
                &self
                    .suppliers()
                    .iter()
                    .map(|supplier| supplier.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Pick the supplier with the highest priority among those supporting
/// `path`. On a tie the first one in `suppliers` wins.
pub fn resolve_supplier_for_file<'a>(
    path: &Path,
    suppliers: &[&'a dyn BuilderFactorySupplier],
) -> Option<&'a dyn BuilderFactorySupplier> {
    let mut selected: Option<&'a dyn BuilderFactorySupplier> = None;
    for supplier in suppliers.iter().copied().filter(|s| s.supports(path)) {
        match selected {
            Some(current) if current.priority() >= supplier.priority() => {}
            _ => selected = Some(supplier),
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenantry_core::ConfigError;
    use tenantry_ddl::SharedSchemaContextBuilder;

    struct NoopFactory;

    impl SharedSchemaContextBuilderFactory for NoopFactory {
        fn build_from_str(
            &self,
            _content: &str,
        ) -> Result<SharedSchemaContextBuilder, ConfigError> {
            Ok(SharedSchemaContextBuilder::default())
        }
    }

    struct TestSupplier {
        name: &'static str,
        extensions: Vec<&'static str>,
        priority: i32,
    }

    impl BuilderFactorySupplier for TestSupplier {
        fn supported_file_extensions(&self) -> &[&str] {
            &self.extensions
        }

        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory> {
            Box::new(NoopFactory)
        }
    }

    fn supplier(name: &'static str, extensions: &[&'static str], priority: i32) -> TestSupplier {
        TestSupplier {
            name,
            extensions: extensions.to_vec(),
            priority,
        }
    }

    #[test]
    fn test_highest_priority_wins() {
        let low = supplier("low", &["xml"], 1);
        let high = supplier("high", &["xml"], 5);
        let suppliers: Vec<&dyn BuilderFactorySupplier> = vec![&low, &high];

        let selected = resolve_supplier_for_file(Path::new("config.xml"), &suppliers);
        assert_eq!(selected.map(|s| s.name()), Some("high"));
    }

    #[test]
    fn test_tie_goes_to_first() {
        let first = supplier("first", &["xml"], 3);
        let second = supplier("second", &["xml"], 3);
        let suppliers: Vec<&dyn BuilderFactorySupplier> = vec![&first, &second];

        let selected = resolve_supplier_for_file(Path::new("config.xml"), &suppliers);
        assert_eq!(selected.map(|s| s.name()), Some("first"));
    }

    #[test]
    fn test_non_matching_supplier_ignored() {
        let yaml = supplier("yaml", &["yaml"], 100);
        let xml = supplier("xml", &["xml"], -1);
        let suppliers: Vec<&dyn BuilderFactorySupplier> = vec![&yaml, &xml];

        let selected = resolve_supplier_for_file(Path::new("config.xml"), &suppliers);
        assert_eq!(selected.map(|s| s.name()), Some("xml"));
        assert!(resolve_supplier_for_file(Path::new("config.ini"), &suppliers).is_none());
    }

    #[test]
    fn test_shared_supplier_considered_once() {
        let shared: Arc<dyn BuilderFactorySupplier> = Arc::new(supplier("shared", &["xml"], 0));
        let resolver = BuilderFactoryResolver::without_discovery()
            .with_supplier(shared.clone())
            .with_supplier(Arc::new(supplier("other", &["ini"], 0)))
            .with_supplier(shared);

        let names = resolver
            .suppliers()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["shared", "other"]);
    }

    #[test]
    fn test_every_built_in_supplier_is_considered() {
        let names = BuilderFactoryResolver::new()
            .suppliers()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "JsonBuilderFactorySupplier",
                "TomlBuilderFactorySupplier",
                "YamlBuilderFactorySupplier",
            ]
        );
    }

    #[test]
    fn test_discovered_supplier_shadowed_by_same_name() {
        let resolver = BuilderFactoryResolver::new()
            .with_supplier(Arc::new(supplier("YamlBuilderFactorySupplier", &["yaml"], 0)));

        let names = resolver
            .suppliers()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "YamlBuilderFactorySupplier",
                "JsonBuilderFactorySupplier",
                "TomlBuilderFactorySupplier",
            ]
        );
    }

    #[test]
    fn test_failure_lists_every_extension() {
        let resolver = BuilderFactoryResolver::without_discovery()
            .with_supplier(Arc::new(supplier("yaml", &["yaml", "yml"], 0)))
            .with_supplier(Arc::new(supplier("json", &["json"], 0)));

        let error = resolver.resolve("config.toml").err();
        assert_eq!(
            error,
            Some(ResolutionError::NoSupplier {
                path: "config.toml".into(),
                supported_extensions: ["json", "yaml", "yml"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })
        );
    }
}
