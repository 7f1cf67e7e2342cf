use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::{ContextRole, SharedSchemaContext};
use crate::definition::SqlDefinition;
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::{RlsPolicyProducer, RlsPolicyProducerParameters};

/// Creates one tenant isolation policy per configured table.
#[derive(Debug, Default)]
pub struct RlsPolicyEnricher<P = RlsPolicyProducer> {
    producer: P,
}

impl RlsPolicyEnricher {
    pub fn new() -> Self {
        Self {
            producer: RlsPolicyProducer::new(),
        }
    }
}

impl<P> RlsPolicyEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for RlsPolicyEnricher<P>
where
    P: Producer<Parameters = RlsPolicyProducerParameters>,
    P::Definition: 'static,
{
    fn name(&self) -> &'static str {
        "RlsPolicyEnricher"
    }

    fn requires(&self) -> &'static [ContextRole] {
        &[ContextRole::TenantHasAuthorities]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        let tenant_has_authorities = context.tenant_has_authorities();
        let grantee = request.grantee.clone().unwrap_or_default();

        for table in &request.tables {
            let mut parameters = RlsPolicyProducerParameters::builder()
                .with_policy_name(table.policy_name())
                .with_policy_table(table.name.as_str())
                .with_policy_schema(request.default_schema.clone())
                .with_grantee(grantee.as_str())
                .with_permission_command(table.command)
                .with_tenant_column(table.tenant_column.as_str());
            if let Some(factory) = &tenant_has_authorities {
                parameters = parameters
                    .with_using_expression(factory.clone())
                    .with_with_check_expression(factory.clone());
            }

            let definition = self.producer.produce(&parameters.build())?;
            tracing::debug!(
                policy = definition.name(),
                table = table.name.as_str(),
                "Generated row level security policy"
            );
            context.add(Arc::new(definition));
        }
        Ok(())
    }
}
