//! Interpreter interfaces.

use std::fs;
use std::path::Path;

use tenantry_core::ConfigError;
use tenantry_ddl::SharedSchemaContextBuilder;

/// Reads one configuration format into a builder.
pub trait SharedSchemaContextBuilderFactory: Send + Sync {
    /// Interpret configuration content.
    fn build_from_str(&self, content: &str) -> Result<SharedSchemaContextBuilder, ConfigError>;

    /// Read and interpret the configuration file at `path`.
    fn build(&self, path: &Path) -> Result<SharedSchemaContextBuilder, ConfigError> {
        let content = fs::read_to_string(path)?;
        self.build_from_str(&content)
    }
}

/// Publishes a [`SharedSchemaContextBuilderFactory`] for a set of file
/// extensions.
///
/// # Priority
///
/// When several suppliers accept the same file the one with the highest
/// priority wins. Built-in interpreters use 0, so a supplier that wants to
/// replace one of them only needs a positive priority.
pub trait BuilderFactorySupplier: Send + Sync + 'static {
    /// Extensions without the leading dot, matched case-sensitively.
    fn supported_file_extensions(&self) -> &[&str];

    /// Supplier name for logging.
    fn name(&self) -> &'static str;

    /// Default: 0
    fn priority(&self) -> i32 {
        0
    }

    /// Create the factory this supplier publishes.
    fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory>;

    /// Whether the file at `path` has one of the supported extensions.
    fn supports(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.supported_file_extensions().iter().any(|extension| {
            path.strip_suffix(extension)
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Archive;

    impl BuilderFactorySupplier for Archive {
        fn supported_file_extensions(&self) -> &[&str] {
            &["tar.gz", "yaml"]
        }

        fn name(&self) -> &'static str {
            "Archive"
        }

        fn factory(&self) -> Box<dyn SharedSchemaContextBuilderFactory> {
            unimplemented!("not needed for extension matching")
        }
    }

    #[test]
    fn test_supports_suffix() {
        assert!(Archive.supports(Path::new("config.yaml")));
        assert!(Archive.supports(Path::new("/etc/tenantry/config.tar.gz")));
        assert!(Archive.supports(Path::new(".yaml")));
    }

    #[test]
    fn test_supports_is_case_sensitive() {
        assert!(!Archive.supports(Path::new("config.YAML")));
        assert!(!Archive.supports(Path::new("configyaml")));
        assert!(!Archive.supports(Path::new("config.yaml.bak")));
    }
}
