use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::{ContextRole, SharedSchemaContext};
use crate::definition::{IsRecordBelongsToCurrentTenantFunctionInvocationFactory, SqlDefinition};
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::function::{
    IsRecordBelongsToCurrentTenantFunctionProducer,
    IsRecordBelongsToCurrentTenantFunctionProducerParameters,
};

/// Emits a record ownership function for every table that names one.
#[derive(Debug, Default)]
pub struct IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher<
    P = IsRecordBelongsToCurrentTenantFunctionProducer,
> {
    producer: P,
}

impl IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher {
    pub fn new() -> Self {
        Self {
            producer: IsRecordBelongsToCurrentTenantFunctionProducer::new(),
        }
    }
}

impl<P> IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher<P>
where
    P: Producer<Parameters = IsRecordBelongsToCurrentTenantFunctionProducerParameters>,
    P::Definition: IsRecordBelongsToCurrentTenantFunctionInvocationFactory + 'static,
{
    fn name(&self) -> &'static str {
        "IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher"
    }

    fn requires(&self) -> &'static [ContextRole] {
        &[ContextRole::CurrentTenantGetter]
    }

    fn provides(&self) -> &'static [ContextRole] {
        &[ContextRole::IsRecordBelongsToCurrentTenant]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        for table in &request.tables {
            let Some(function_name) = &table.record_belongs_to_current_tenant_function_name else {
                continue;
            };

            let parameters = table.primary_key_columns.iter().fold(
                IsRecordBelongsToCurrentTenantFunctionProducerParameters::new(
                    function_name.as_str(),
                    request.default_schema.clone(),
                    table.name.as_str(),
                    request.default_schema.clone(),
                    table.tenant_column.as_str(),
                    context.current_tenant_getter(),
                ),
                |parameters, column| {
                    parameters.with_key_column(column.name.as_str(), column.column_type.as_str())
                },
            );
            let definition = Arc::new(self.producer.produce(&parameters)?);

            tracing::debug!(
                function = definition.name(),
                table = table.name.as_str(),
                "Generated record ownership function"
            );
            context.add(definition.clone());
            context.set_is_record_belongs_to_current_tenant(&table.name, definition);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::enrichers::GetCurrentTenantIdFunctionDefinitionEnricher;
    use crate::function::FunctionArgumentValue;
    use pretty_assertions::assert_eq;
    use tenantry_core::{PrimaryKeyColumn, TableRlsDefinition};

    fn request() -> SharedSchemaContextRequest {
        let mut request = SharedSchemaContextRequest::new(Some("app".to_string()));
        request.tables.push(TableRlsDefinition::new("users"));

        let mut posts = TableRlsDefinition::new("posts");
        posts.record_belongs_to_current_tenant_function_name =
            Some("is_post_of_current_tenant".to_string());
        posts.primary_key_columns = vec![PrimaryKeyColumn::new("id", "bigint")];
        request.tables.push(posts);
        request
    }

    #[test]
    fn test_only_tables_with_function_name() {
        let request = request();
        let mut context = SharedSchemaContext::new();
        GetCurrentTenantIdFunctionDefinitionEnricher::new()
            .enrich(&mut context, &request)
            .unwrap();

        IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher::new()
            .enrich(&mut context, &request)
            .unwrap();

        assert_eq!(context.definitions().len(), 2);
        assert!(context.has_role(ContextRole::IsRecordBelongsToCurrentTenant));
        assert!(context.is_record_belongs_to_current_tenant("users").is_none());

        let posts = context.is_record_belongs_to_current_tenant("posts").unwrap();
        assert_eq!(
            posts.is_record_belongs_to_current_tenant_function_invocation(&[
                FunctionArgumentValue::reference("NEW.post_id")
            ]),
            "app.is_post_of_current_tenant(NEW.post_id)"
        );
        assert!(context.definitions()[1].create_script().contains(
            "SELECT 1 FROM app.posts rt WHERE rt.id = $1 AND rt.tenant_id = app.get_current_tenant_id()"
        ));
    }

    #[test]
    fn test_missing_primary_key_rejected() {
        let mut request = request();
        request.tables[1].primary_key_columns.clear();
        let mut context = SharedSchemaContext::new();
        GetCurrentTenantIdFunctionDefinitionEnricher::new()
            .enrich(&mut context, &request)
            .unwrap();

        assert_eq!(
            IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher::new()
                .enrich(&mut context, &request)
                .unwrap_err(),
            ValidationError::BlankParameter {
                parameter: "key columns"
            }
        );
    }
}
