use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::{ContextRole, SharedSchemaContext};
use crate::definition::{SetCurrentTenantIdFunctionInvocationFactory, SqlDefinition};
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::function::{
    SetCurrentTenantIdFunctionProducer, SetCurrentTenantIdFunctionProducerParameters,
};

/// Emits the function that stores the current tenant identifier.
#[derive(Debug, Default)]
pub struct SetCurrentTenantIdFunctionDefinitionEnricher<P = SetCurrentTenantIdFunctionProducer> {
    producer: P,
}

impl SetCurrentTenantIdFunctionDefinitionEnricher {
    pub fn new() -> Self {
        Self {
            producer: SetCurrentTenantIdFunctionProducer::new(),
        }
    }
}

impl<P> SetCurrentTenantIdFunctionDefinitionEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for SetCurrentTenantIdFunctionDefinitionEnricher<P>
where
    P: Producer<Parameters = SetCurrentTenantIdFunctionProducerParameters>,
    P::Definition: SetCurrentTenantIdFunctionInvocationFactory + 'static,
{
    fn name(&self) -> &'static str {
        "SetCurrentTenantIdFunctionDefinitionEnricher"
    }

    fn provides(&self) -> &'static [ContextRole] {
        &[ContextRole::CurrentTenantSetter]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        let definition = Arc::new(self.producer.produce(
            &SetCurrentTenantIdFunctionProducerParameters::new(
                request.set_current_tenant_id_function_name.as_str(),
                request.current_tenant_id_property.as_str(),
                request.default_schema.clone(),
                request.current_tenant_id_property_type.clone(),
            ),
        )?);

        tracing::debug!(
            function = definition.name(),
            "Generated set current tenant id function"
        );
        context.add(definition.clone());
        context.set_current_tenant_setter(definition);
        Ok(())
    }
}
