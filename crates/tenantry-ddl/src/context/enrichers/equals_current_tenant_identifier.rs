use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::{ContextRole, SharedSchemaContext};
use crate::definition::{EqualsCurrentTenantIdentifierFunctionInvocationFactory, SqlDefinition};
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::function::{
    EqualsCurrentTenantIdentifierFunctionProducer,
    EqualsCurrentTenantIdentifierFunctionProducerParameters,
};

/// Emits the function comparing a value with the current tenant identifier.
#[derive(Debug, Default)]
pub struct EqualsCurrentTenantIdentifierFunctionDefinitionEnricher<
    P = EqualsCurrentTenantIdentifierFunctionProducer,
> {
    producer: P,
}

impl EqualsCurrentTenantIdentifierFunctionDefinitionEnricher {
    pub fn new() -> Self {
        Self {
            producer: EqualsCurrentTenantIdentifierFunctionProducer::new(),
        }
    }
}

impl<P> EqualsCurrentTenantIdentifierFunctionDefinitionEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for EqualsCurrentTenantIdentifierFunctionDefinitionEnricher<P>
where
    P: Producer<Parameters = EqualsCurrentTenantIdentifierFunctionProducerParameters>,
    P::Definition: EqualsCurrentTenantIdentifierFunctionInvocationFactory + 'static,
{
    fn name(&self) -> &'static str {
        "EqualsCurrentTenantIdentifierFunctionDefinitionEnricher"
    }

    fn requires(&self) -> &'static [ContextRole] {
        &[ContextRole::CurrentTenantGetter]
    }

    fn provides(&self) -> &'static [ContextRole] {
        &[ContextRole::EqualsCurrentTenantIdentifier]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        let definition = Arc::new(self.producer.produce(
            &EqualsCurrentTenantIdentifierFunctionProducerParameters::new(
                request.equals_current_tenant_identifier_function_name.as_str(),
                request.default_schema.clone(),
                request.current_tenant_id_property_type.clone(),
                context.current_tenant_getter(),
            ),
        )?);

        tracing::debug!(
            function = definition.name(),
            "Generated equals current tenant identifier function"
        );
        context.add(definition.clone());
        context.set_equals_current_tenant_identifier(definition);
        Ok(())
    }
}
