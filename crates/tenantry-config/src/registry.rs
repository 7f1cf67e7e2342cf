//! Link time supplier registry.
//!
//! Crates publish suppliers with [`submit_builder_factory_supplier!`]; the
//! registry is read by [`discovered_suppliers`].
//!
//! [`submit_builder_factory_supplier!`]: crate::submit_builder_factory_supplier

use crate::supplier::BuilderFactorySupplier;

inventory::collect!(&'static dyn BuilderFactorySupplier);

/// Collect all registered suppliers.
///
/// Sorted by name so that discovery does not depend on link order.
pub fn discovered_suppliers() -> Vec<&'static dyn BuilderFactorySupplier> {
    let mut suppliers = inventory::iter::<&'static dyn BuilderFactorySupplier>
        .into_iter()
        .copied()
        .collect::<Vec<_>>();
    suppliers.sort_by_key(|supplier| supplier.name());
    suppliers
}

/// Register a supplier for discovery.
///
/// ```ignore
/// use tenantry_config::submit_builder_factory_supplier;
///
/// pub struct IniBuilderFactorySupplier;
/// impl BuilderFactorySupplier for IniBuilderFactorySupplier { /* ... */ }
///
/// submit_builder_factory_supplier!(IniBuilderFactorySupplier);
/// ```
#[macro_export]
macro_rules! submit_builder_factory_supplier {
    ($supplier:ty) => {
        $crate::inventory::submit! {
            &<$supplier>::new() as &'static dyn $crate::BuilderFactorySupplier
        }
    };
    // Variant for suppliers without a const new()
    ($supplier:ty, $instance:expr) => {
        $crate::inventory::submit! {
            &$instance as &'static dyn $crate::BuilderFactorySupplier
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_suppliers_are_discovered() {
        let names = discovered_suppliers()
            .iter()
            .map(|supplier| supplier.name())
            .collect::<Vec<_>>();

        for name in [
            "JsonBuilderFactorySupplier",
            "TomlBuilderFactorySupplier",
            "YamlBuilderFactorySupplier",
        ] {
            assert!(names.contains(&name), "{name} not discovered");
        }
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
