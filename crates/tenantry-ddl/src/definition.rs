//! Generated artifacts and the capabilities they expose to later producers.
//!
//! A producer returns a concrete definition type. Besides its DDL, a definition
//! may implement one or more capability traits, which is how a dependent
//! producer references it: the dependency is passed in as a capability object
//! and rendered into the dependent statement at creation time.

use std::fmt::Debug;

use tenantry_core::PermissionCommand;

use crate::function::FunctionArgumentValue;

/// One generated, self-contained SQL statement.
pub trait SqlDefinition: Debug + Send + Sync {
    /// Identifier used for ordering and debugging.
    fn name(&self) -> &str;

    /// Statement that creates the object.
    fn create_script(&self) -> &str;

    /// Statement that reverses [`SqlDefinition::create_script`].
    fn drop_script(&self) -> &str;
}

/// Renders an expression returning the current tenant identifier.
pub trait GetCurrentTenantIdFunctionInvocationFactory: Debug + Send + Sync {
    fn get_current_tenant_id_function_invocation(&self) -> String;
}

/// Renders expressions and statements that change the current tenant.
pub trait SetCurrentTenantIdFunctionInvocationFactory: Debug + Send + Sync {
    fn set_current_tenant_id_function_invocation(&self, value: &FunctionArgumentValue)
    -> String;

    /// Statement to run before a DML statement so it executes as `tenant_id`.
    fn generate_statement_that_sets_tenant(&self, tenant_id: &str) -> String {
        format!(
            "SELECT {};",
            self.set_current_tenant_id_function_invocation(&FunctionArgumentValue::literal(
                tenant_id
            ))
        )
    }

    /// Same statement with a `?` placeholder for a JDBC-style prepared
    /// statement parameter.
    fn generate_prepared_statement_that_sets_tenant(&self) -> String {
        format!(
            "SELECT {};",
            self.set_current_tenant_id_function_invocation(&FunctionArgumentValue::reference("?"))
        )
    }
}

/// Renders a boolean expression comparing a value with the current tenant.
pub trait EqualsCurrentTenantIdentifierFunctionInvocationFactory: Debug + Send + Sync {
    fn equals_current_tenant_identifier_function_invocation(
        &self,
        value: &FunctionArgumentValue,
    ) -> String;
}

/// Renders a boolean expression deciding whether a row's tenant may be
/// accessed for the given command on the given table.
pub trait TenantHasAuthoritiesFunctionInvocationFactory: Debug + Send + Sync {
    fn tenant_has_authorities_function_invocation(
        &self,
        tenant_id: &FunctionArgumentValue,
        command: PermissionCommand,
        table: &FunctionArgumentValue,
        schema: &FunctionArgumentValue,
    ) -> String;
}

/// Renders a boolean expression checking whether the row identified by the
/// given primary key values belongs to the current tenant.
pub trait IsRecordBelongsToCurrentTenantFunctionInvocationFactory: Debug + Send + Sync {
    /// `key_values` follow the order of the primary key columns.
    fn is_record_belongs_to_current_tenant_function_invocation(
        &self,
        key_values: &[FunctionArgumentValue],
    ) -> String;
}
