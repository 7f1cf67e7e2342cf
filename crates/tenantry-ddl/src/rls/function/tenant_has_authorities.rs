//! Function deciding whether the current tenant may access a row.
//!
//! The generated function takes the row's tenant identifier plus the policy
//! command, table and schema, and currently delegates to the equals current
//! tenant identifier function. Policies call it with the full argument list,
//! so richer authority checks can replace the body without touching them.

use std::sync::Arc;

use tenantry_core::PermissionCommand;

use crate::definition::{
    EqualsCurrentTenantIdentifierFunctionInvocationFactory, SqlDefinition,
    TenantHasAuthoritiesFunctionInvocationFactory,
};
use crate::error::{ValidationError, require_not_blank, require_not_blank_when_present};
use crate::function::{
    DEFAULT_ARGUMENT_TYPE, FunctionArgument, FunctionArgumentValue, FunctionDefinition,
    FunctionLanguage,
};
use crate::producer::Producer;

#[derive(Debug, Clone)]
pub struct TenantHasAuthoritiesFunctionProducerParameters {
    pub function_name: String,
    pub schema: Option<String>,
    /// Tenant identifier argument type, `VARCHAR(255)` when absent.
    pub tenant_id_argument_type: Option<String>,
    pub equals_current_tenant_identifier_function:
        Option<Arc<dyn EqualsCurrentTenantIdentifierFunctionInvocationFactory>>,
}

impl TenantHasAuthoritiesFunctionProducerParameters {
    pub fn new(
        function_name: impl Into<String>,
        schema: Option<String>,
        tenant_id_argument_type: Option<String>,
        equals_current_tenant_identifier_function: Option<
            Arc<dyn EqualsCurrentTenantIdentifierFunctionInvocationFactory>,
        >,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            schema,
            tenant_id_argument_type,
            equals_current_tenant_identifier_function,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantHasAuthoritiesFunctionDefinition {
    function: FunctionDefinition,
}

impl TenantHasAuthoritiesFunctionDefinition {
    pub fn function(&self) -> &FunctionDefinition {
        &self.function
    }
}

impl SqlDefinition for TenantHasAuthoritiesFunctionDefinition {
    fn name(&self) -> &str {
        self.function.function_name()
    }

    fn create_script(&self) -> &str {
        self.function.create_script()
    }

    fn drop_script(&self) -> &str {
        self.function.drop_script()
    }
}

impl TenantHasAuthoritiesFunctionInvocationFactory for TenantHasAuthoritiesFunctionDefinition {
    fn tenant_has_authorities_function_invocation(
        &self,
        tenant_id: &FunctionArgumentValue,
        command: PermissionCommand,
        table: &FunctionArgumentValue,
        schema: &FunctionArgumentValue,
    ) -> String {
        self.function.invoke(&[
            tenant_id.clone(),
            FunctionArgumentValue::literal(command.as_sql()),
            table.clone(),
            schema.clone(),
        ])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TenantHasAuthoritiesFunctionProducer;

impl TenantHasAuthoritiesFunctionProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for TenantHasAuthoritiesFunctionProducer {
    type Parameters = TenantHasAuthoritiesFunctionProducerParameters;
    type Definition = TenantHasAuthoritiesFunctionDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        require_not_blank(&parameters.function_name, "function name")?;
        require_not_blank_when_present(
            parameters.tenant_id_argument_type.as_deref(),
            "tenant id argument type",
        )?;
        let equals_function = parameters
            .equals_current_tenant_identifier_function
            .as_ref()
            .ok_or_else(|| {
                ValidationError::missing_capability("equals current tenant identifier function")
            })?;

        let tenant_id_type = parameters
            .tenant_id_argument_type
            .as_deref()
            .unwrap_or(DEFAULT_ARGUMENT_TYPE);
        let arguments = vec![
            FunctionArgument::for_type(tenant_id_type),
            FunctionArgument::for_type(DEFAULT_ARGUMENT_TYPE),
            FunctionArgument::for_type(DEFAULT_ARGUMENT_TYPE),
            FunctionArgument::for_type(DEFAULT_ARGUMENT_TYPE),
        ];
        let body = format!(
            "SELECT {}",
            equals_function.equals_current_tenant_identifier_function_invocation(
                &FunctionArgumentValue::reference("$1")
            )
        );

        Ok(TenantHasAuthoritiesFunctionDefinition {
            function: FunctionDefinition::new(
                parameters.schema.as_deref(),
                &parameters.function_name,
                arguments,
                "BOOLEAN",
                &body,
                FunctionLanguage::StableSql,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct EqualsStub;

    impl EqualsCurrentTenantIdentifierFunctionInvocationFactory for EqualsStub {
        fn equals_current_tenant_identifier_function_invocation(
            &self,
            value: &FunctionArgumentValue,
        ) -> String {
            format!("is_tenant({})", value)
        }
    }

    fn produce(schema: Option<&str>) -> TenantHasAuthoritiesFunctionDefinition {
        TenantHasAuthoritiesFunctionProducer::new()
            .produce(&TenantHasAuthoritiesFunctionProducerParameters::new(
                "tenant_has_authorities",
                schema.map(str::to_string),
                None,
                Some(Arc::new(EqualsStub)),
            ))
            .unwrap()
    }

    #[test]
    fn test_create_script_delegates_to_equals_function() {
        assert_eq!(
            produce(None).create_script(),
            "CREATE OR REPLACE FUNCTION tenant_has_authorities(VARCHAR(255), VARCHAR(255), VARCHAR(255), VARCHAR(255)) RETURNS BOOLEAN as $$\n\
             SELECT is_tenant($1)\n\
             $$ LANGUAGE sql\n\
             STABLE PARALLEL SAFE;"
        );
    }

    #[test]
    fn test_invocation() {
        let definition = produce(Some("app"));
        assert_eq!(
            definition.tenant_has_authorities_function_invocation(
                &FunctionArgumentValue::reference("tenant_id"),
                PermissionCommand::Select,
                &FunctionArgumentValue::literal("users"),
                &FunctionArgumentValue::literal("app"),
            ),
            "app.tenant_has_authorities(tenant_id, 'SELECT', 'users', 'app')"
        );
    }

    #[test]
    fn test_blank_parameters_rejected() {
        let equals: Arc<dyn EqualsCurrentTenantIdentifierFunctionInvocationFactory> =
            Arc::new(EqualsStub);
        let cases = [
            (
                "function name",
                TenantHasAuthoritiesFunctionProducerParameters::new(
                    "",
                    None,
                    None,
                    Some(equals.clone()),
                ),
            ),
            (
                "tenant id argument type",
                TenantHasAuthoritiesFunctionProducerParameters::new(
                    "tenant_has_authorities",
                    Some("app".to_string()),
                    Some("\t".to_string()),
                    Some(equals),
                ),
            ),
        ];

        for (parameter, parameters) in cases {
            assert_eq!(
                TenantHasAuthoritiesFunctionProducer::new()
                    .produce(&parameters)
                    .unwrap_err(),
                ValidationError::BlankParameter { parameter },
                "{parameter}"
            );
        }
    }

    #[test]
    fn test_missing_equals_function_rejected() {
        let parameters = TenantHasAuthoritiesFunctionProducerParameters::new(
            "tenant_has_authorities",
            None,
            None,
            None,
        );
        assert!(matches!(
            TenantHasAuthoritiesFunctionProducer::new().produce(&parameters),
            Err(ValidationError::MissingCapability { .. })
        ));
    }
}
