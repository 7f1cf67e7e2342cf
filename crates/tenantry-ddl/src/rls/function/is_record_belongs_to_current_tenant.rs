//! Function checking whether a row, identified by its primary key, belongs to
//! the current tenant.

use std::sync::Arc;

use crate::definition::{
    GetCurrentTenantIdFunctionInvocationFactory,
    IsRecordBelongsToCurrentTenantFunctionInvocationFactory, SqlDefinition,
};
use crate::error::{ValidationError, require_not_blank};
use crate::function::{
    FunctionArgument, FunctionArgumentValue, FunctionDefinition, FunctionLanguage,
    qualified_name,
};
use crate::producer::Producer;

#[derive(Debug, Clone)]
pub struct IsRecordBelongsToCurrentTenantFunctionProducerParameters {
    pub function_name: String,
    pub schema: Option<String>,
    /// Primary key columns with their argument types, in key order.
    pub key_columns: Vec<(String, FunctionArgument)>,
    pub tenant_column: String,
    pub record_table: String,
    pub record_schema: Option<String>,
    pub current_tenant_id_function: Option<Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>>,
}

impl IsRecordBelongsToCurrentTenantFunctionProducerParameters {
    pub fn new(
        function_name: impl Into<String>,
        schema: Option<String>,
        record_table: impl Into<String>,
        record_schema: Option<String>,
        tenant_column: impl Into<String>,
        current_tenant_id_function: Option<Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            schema,
            key_columns: Vec::new(),
            tenant_column: tenant_column.into(),
            record_table: record_table.into(),
            record_schema,
            current_tenant_id_function,
        }
    }

    /// Append a primary key column.
    pub fn with_key_column(
        mut self,
        column: impl Into<String>,
        column_type: impl Into<String>,
    ) -> Self {
        self.key_columns
            .push((column.into(), FunctionArgument::for_type(column_type)));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsRecordBelongsToCurrentTenantFunctionDefinition {
    function: FunctionDefinition,
}

impl IsRecordBelongsToCurrentTenantFunctionDefinition {
    pub fn function(&self) -> &FunctionDefinition {
        &self.function
    }
}

impl SqlDefinition for IsRecordBelongsToCurrentTenantFunctionDefinition {
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

impl IsRecordBelongsToCurrentTenantFunctionInvocationFactory
    for IsRecordBelongsToCurrentTenantFunctionDefinition
{
    fn is_record_belongs_to_current_tenant_function_invocation(
        &self,
        key_values: &[FunctionArgumentValue],
    ) -> String {
        self.function.invoke(key_values)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IsRecordBelongsToCurrentTenantFunctionProducer;

impl IsRecordBelongsToCurrentTenantFunctionProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for IsRecordBelongsToCurrentTenantFunctionProducer {
    type Parameters = IsRecordBelongsToCurrentTenantFunctionProducerParameters;
    type Definition = IsRecordBelongsToCurrentTenantFunctionDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        require_not_blank(&parameters.function_name, "function name")?;
        require_not_blank(&parameters.tenant_column, "tenant column")?;
        require_not_blank(&parameters.record_table, "record table")?;
        if parameters.key_columns.is_empty() {
            return Err(ValidationError::blank("key columns"));
        }
        for (column, argument) in &parameters.key_columns {
            require_not_blank(column, "key column")?;
            require_not_blank(argument.type_name(), "key column type")?;
        }
        let current_tenant_id_function = parameters
            .current_tenant_id_function
            .as_ref()
            .ok_or_else(|| ValidationError::missing_capability("get current tenant id function"))?;

        let mut conditions = parameters
            .key_columns
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!("rt.{} = ${}", column, index + 1))
            .collect::<Vec<_>>();
        conditions.push(format!(
            "rt.{} = {}",
            parameters.tenant_column,
            current_tenant_id_function.get_current_tenant_id_function_invocation()
        ));
        let body = format!(
            "SELECT EXISTS (\n\tSELECT 1 FROM {} rt WHERE {}\n)",
            qualified_name(parameters.record_schema.as_deref(), &parameters.record_table),
            conditions.join(" AND ")
        );

        Ok(IsRecordBelongsToCurrentTenantFunctionDefinition {
            function: FunctionDefinition::new(
                parameters.schema.as_deref(),
                &parameters.function_name,
                parameters
                    .key_columns
                    .iter()
                    .map(|(_, argument)| argument.clone())
                    .collect(),
                "BOOLEAN",
                &body,
                FunctionLanguage::StableSql,
            ),
        })
    }
}
