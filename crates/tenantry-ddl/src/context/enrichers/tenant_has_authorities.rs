use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::{ContextRole, SharedSchemaContext};
use crate::definition::{SqlDefinition, TenantHasAuthoritiesFunctionInvocationFactory};
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::function::{
    TenantHasAuthoritiesFunctionProducer, TenantHasAuthoritiesFunctionProducerParameters,
};

/// Emits the function policies call to authorize a row.
#[derive(Debug, Default)]
pub struct TenantHasAuthoritiesFunctionDefinitionEnricher<P = TenantHasAuthoritiesFunctionProducer>
{
    producer: P,
}

impl TenantHasAuthoritiesFunctionDefinitionEnricher {
    pub fn new() -> Self {
        Self {
            producer: TenantHasAuthoritiesFunctionProducer::new(),
        }
    }
}

impl<P> TenantHasAuthoritiesFunctionDefinitionEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for TenantHasAuthoritiesFunctionDefinitionEnricher<P>
where
    P: Producer<Parameters = TenantHasAuthoritiesFunctionProducerParameters>,
    P::Definition: TenantHasAuthoritiesFunctionInvocationFactory + 'static,
{
    fn name(&self) -> &'static str {
        "TenantHasAuthoritiesFunctionDefinitionEnricher"
    }

    fn requires(&self) -> &'static [ContextRole] {
        &[ContextRole::EqualsCurrentTenantIdentifier]
    }

    fn provides(&self) -> &'static [ContextRole] {
        &[ContextRole::TenantHasAuthorities]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        let definition = Arc::new(self.producer.produce(
            &TenantHasAuthoritiesFunctionProducerParameters::new(
                request.tenant_has_authorities_function_name.as_str(),
                request.default_schema.clone(),
                request.current_tenant_id_property_type.clone(),
                context.equals_current_tenant_identifier(),
            ),
        )?);

        tracing::debug!(
            function = definition.name(),
            "Generated tenant has authorities function"
        );
        context.add(definition.clone());
        context.set_tenant_has_authorities(definition);
        Ok(())
    }
}
