//! Function storing a tenant identifier in the session.

use crate::definition::{SetCurrentTenantIdFunctionInvocationFactory, SqlDefinition};
use crate::error::{ValidationError, require_not_blank, require_not_blank_when_present};
use crate::function::{
    DEFAULT_ARGUMENT_TYPE, FunctionArgument, FunctionArgumentValue, FunctionDefinition,
    FunctionLanguage,
};
use crate::producer::Producer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCurrentTenantIdFunctionProducerParameters {
    pub function_name: String,
    pub current_tenant_id_property: String,
    pub schema: Option<String>,
    /// Argument type, `VARCHAR(255)` when absent.
    pub argument_type: Option<String>,
}

impl SetCurrentTenantIdFunctionProducerParameters {
    pub fn new(
        function_name: impl Into<String>,
        current_tenant_id_property: impl Into<String>,
        schema: Option<String>,
        argument_type: Option<String>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            current_tenant_id_property: current_tenant_id_property.into(),
            schema,
            argument_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCurrentTenantIdFunctionDefinition {
    function: FunctionDefinition,
}

impl SetCurrentTenantIdFunctionDefinition {
    pub fn function(&self) -> &FunctionDefinition {
        &self.function
    }
}

impl SqlDefinition for SetCurrentTenantIdFunctionDefinition {
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

impl SetCurrentTenantIdFunctionInvocationFactory for SetCurrentTenantIdFunctionDefinition {
    fn set_current_tenant_id_function_invocation(
        &self,
        value: &FunctionArgumentValue,
    ) -> String {
        self.function.invoke(std::slice::from_ref(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SetCurrentTenantIdFunctionProducer;

impl SetCurrentTenantIdFunctionProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for SetCurrentTenantIdFunctionProducer {
    type Parameters = SetCurrentTenantIdFunctionProducerParameters;
    type Definition = SetCurrentTenantIdFunctionDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        require_not_blank(&parameters.function_name, "function name")?;
        require_not_blank(
            &parameters.current_tenant_id_property,
            "current tenant id property",
        )?;
        require_not_blank_when_present(parameters.argument_type.as_deref(), "argument type")?;

        let argument_type = parameters
            .argument_type
            .as_deref()
            .unwrap_or(DEFAULT_ARGUMENT_TYPE);
        // set_config(..., false) keeps the value for the whole session.
        let body = format!(
            "BEGIN\nPERFORM set_config({}, $1, false);\nEND",
            FunctionArgumentValue::literal(parameters.current_tenant_id_property.as_str())
        );

        Ok(SetCurrentTenantIdFunctionDefinition {
            function: FunctionDefinition::new(
                parameters.schema.as_deref(),
                &parameters.function_name,
                vec![FunctionArgument::for_type(argument_type)],
                "VOID",
                &body,
                FunctionLanguage::VolatilePlpgsql,
            ),
        })
    }
}
