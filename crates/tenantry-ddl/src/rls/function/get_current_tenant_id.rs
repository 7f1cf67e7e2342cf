//! Function returning the tenant identifier stored in the session.

use crate::definition::{GetCurrentTenantIdFunctionInvocationFactory, SqlDefinition};
use crate::error::{ValidationError, require_not_blank, require_not_blank_when_present};
use crate::function::{
    DEFAULT_ARGUMENT_TYPE, FunctionArgumentValue, FunctionDefinition, FunctionLanguage,
};
use crate::producer::Producer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCurrentTenantIdFunctionProducerParameters {
    pub function_name: String,
    pub current_tenant_id_property: String,
    pub schema: Option<String>,
    /// Return type, `VARCHAR(255)` when absent.
    pub function_return_type: Option<String>,
}

impl GetCurrentTenantIdFunctionProducerParameters {
    pub fn new(
        function_name: impl Into<String>,
        current_tenant_id_property: impl Into<String>,
        schema: Option<String>,
        function_return_type: Option<String>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            current_tenant_id_property: current_tenant_id_property.into(),
            schema,
            function_return_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCurrentTenantIdFunctionDefinition {
    function: FunctionDefinition,
}

impl GetCurrentTenantIdFunctionDefinition {
    pub fn function(&self) -> &FunctionDefinition {
        &self.function
    }
}

impl SqlDefinition for GetCurrentTenantIdFunctionDefinition {
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

impl GetCurrentTenantIdFunctionInvocationFactory for GetCurrentTenantIdFunctionDefinition {
    fn get_current_tenant_id_function_invocation(&self) -> String {
        self.function.invoke(&[])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetCurrentTenantIdFunctionProducer;

impl GetCurrentTenantIdFunctionProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for GetCurrentTenantIdFunctionProducer {
    type Parameters = GetCurrentTenantIdFunctionProducerParameters;
    type Definition = GetCurrentTenantIdFunctionDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        require_not_blank(&parameters.function_name, "function name")?;
        require_not_blank(
            &parameters.current_tenant_id_property,
            "current tenant id property",
        )?;
        require_not_blank_when_present(
            parameters.function_return_type.as_deref(),
            "function return type",
        )?;

        let returns = parameters
            .function_return_type
            .as_deref()
            .unwrap_or(DEFAULT_ARGUMENT_TYPE);
        let body = format!(
            "SELECT current_setting({})",
            FunctionArgumentValue::literal(parameters.current_tenant_id_property.as_str())
        );

        Ok(GetCurrentTenantIdFunctionDefinition {
            function: FunctionDefinition::new(
                parameters.schema.as_deref(),
                &parameters.function_name,
                Vec::new(),
                returns,
                &body,
                FunctionLanguage::StableSql,
            ),
        })
    }
}
