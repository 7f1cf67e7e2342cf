//! Function checking whether a value equals the current tenant identifier.

use std::sync::Arc;

use crate::definition::{
    EqualsCurrentTenantIdentifierFunctionInvocationFactory,
    GetCurrentTenantIdFunctionInvocationFactory, SqlDefinition,
};
use crate::error::{ValidationError, require_not_blank, require_not_blank_when_present};
use crate::function::{
    DEFAULT_ARGUMENT_TYPE, FunctionArgument, FunctionArgumentValue, FunctionDefinition,
    FunctionLanguage,
};
use crate::producer::Producer;

#[derive(Debug, Clone)]
pub struct EqualsCurrentTenantIdentifierFunctionProducerParameters {
    pub function_name: String,
    pub schema: Option<String>,
    /// Argument type, `VARCHAR(255)` when absent.
    pub argument_type: Option<String>,
    pub current_tenant_id_function: Option<Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>>,
}

impl EqualsCurrentTenantIdentifierFunctionProducerParameters {
    pub fn new(
        function_name: impl Into<String>,
        schema: Option<String>,
        argument_type: Option<String>,
        current_tenant_id_function: Option<Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            schema,
            argument_type,
            current_tenant_id_function,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualsCurrentTenantIdentifierFunctionDefinition {
    function: FunctionDefinition,
}

impl EqualsCurrentTenantIdentifierFunctionDefinition {
    pub fn function(&self) -> &FunctionDefinition {
        &self.function
    }
}

impl SqlDefinition for EqualsCurrentTenantIdentifierFunctionDefinition {
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

impl EqualsCurrentTenantIdentifierFunctionInvocationFactory
    for EqualsCurrentTenantIdentifierFunctionDefinition
{
    fn equals_current_tenant_identifier_function_invocation(
        &self,
        value: &FunctionArgumentValue,
    ) -> String {
        self.function.invoke(std::slice::from_ref(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsCurrentTenantIdentifierFunctionProducer;

impl EqualsCurrentTenantIdentifierFunctionProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for EqualsCurrentTenantIdentifierFunctionProducer {
    type Parameters = EqualsCurrentTenantIdentifierFunctionProducerParameters;
    type Definition = EqualsCurrentTenantIdentifierFunctionDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        require_not_blank(&parameters.function_name, "function name")?;
        require_not_blank_when_present(parameters.argument_type.as_deref(), "argument type")?;
        let current_tenant_id_function = parameters
            .current_tenant_id_function
            .as_ref()
            .ok_or_else(|| ValidationError::missing_capability("get current tenant id function"))?;

        let argument_type = parameters
            .argument_type
            .as_deref()
            .unwrap_or(DEFAULT_ARGUMENT_TYPE);
        let body = format!(
            "SELECT $1 = {}",
            current_tenant_id_function.get_current_tenant_id_function_invocation()
        );

        Ok(EqualsCurrentTenantIdentifierFunctionDefinition {
            function: FunctionDefinition::new(
                parameters.schema.as_deref(),
                &parameters.function_name,
                vec![FunctionArgument::for_type(argument_type)],
                "BOOLEAN",
                &body,
                FunctionLanguage::StableSql,
            ),
        })
    }
}
