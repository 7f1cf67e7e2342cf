use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::{ContextRole, SharedSchemaContext};
use crate::definition::{GetCurrentTenantIdFunctionInvocationFactory, SqlDefinition};
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::function::{
    GetCurrentTenantIdFunctionProducer, GetCurrentTenantIdFunctionProducerParameters,
};

/// Emits the function returning the current tenant identifier.
#[derive(Debug, Default)]
pub struct GetCurrentTenantIdFunctionDefinitionEnricher<P = GetCurrentTenantIdFunctionProducer> {
    producer: P,
}

impl GetCurrentTenantIdFunctionDefinitionEnricher {
    pub fn new() -> Self {
        Self {
            producer: GetCurrentTenantIdFunctionProducer::new(),
        }
    }
}

impl<P> GetCurrentTenantIdFunctionDefinitionEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for GetCurrentTenantIdFunctionDefinitionEnricher<P>
where
    P: Producer<Parameters = GetCurrentTenantIdFunctionProducerParameters>,
    P::Definition: GetCurrentTenantIdFunctionInvocationFactory + 'static,
{
    fn name(&self) -> &'static str {
        "GetCurrentTenantIdFunctionDefinitionEnricher"
    }

    fn provides(&self) -> &'static [ContextRole] {
        &[ContextRole::CurrentTenantGetter]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        let definition = Arc::new(self.producer.produce(
            &GetCurrentTenantIdFunctionProducerParameters::new(
                request.get_current_tenant_id_function_name.as_str(),
                request.current_tenant_id_property.as_str(),
                request.default_schema.clone(),
                request.current_tenant_id_property_type.clone(),
            ),
        )?);

        tracing::debug!(
            function = definition.name(),
            "Generated get current tenant id function"
        );
        context.add(definition.clone());
        context.set_current_tenant_getter(definition);
        Ok(())
    }
}
