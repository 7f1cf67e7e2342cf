use std::sync::Arc;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContextEnricher;
use crate::context::SharedSchemaContext;
use crate::definition::SqlDefinition;
use crate::error::ValidationError;
use crate::producer::Producer;
use crate::rls::{
    EnableRowLevelSecurityProducer, ForceRowLevelSecurityProducer,
    RowLevelSecurityProducerParameters,
};

/// Enables row level security on every configured table.
#[derive(Debug, Default)]
pub struct EnableRowLevelSecurityEnricher<P = EnableRowLevelSecurityProducer> {
    producer: P,
}

impl EnableRowLevelSecurityEnricher {
    pub fn new() -> Self {
        Self {
            producer: EnableRowLevelSecurityProducer::new(),
        }
    }
}

impl<P> EnableRowLevelSecurityEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for EnableRowLevelSecurityEnricher<P>
where
    P: Producer<Parameters = RowLevelSecurityProducerParameters>,
    P::Definition: 'static,
{
    fn name(&self) -> &'static str {
        "EnableRowLevelSecurityEnricher"
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        for table in &request.tables {
            let definition = self.producer.produce(&RowLevelSecurityProducerParameters::new(
                table.name.as_str(),
                request.default_schema.clone(),
            ))?;
            tracing::debug!(table = definition.name(), "Enabled row level security");
            context.add(Arc::new(definition));
        }
        Ok(())
    }
}

/// Forces row level security for table owners when the request asks for it.
#[derive(Debug, Default)]
pub struct ForceRowLevelSecurityEnricher<P = ForceRowLevelSecurityProducer> {
    producer: P,
}

impl ForceRowLevelSecurityEnricher {
    pub fn new() -> Self {
        Self {
            producer: ForceRowLevelSecurityProducer::new(),
        }
    }
}

impl<P> ForceRowLevelSecurityEnricher<P> {
    pub fn with_producer(producer: P) -> Self {
        Self { producer }
    }
}

impl<P> SharedSchemaContextEnricher for ForceRowLevelSecurityEnricher<P>
where
    P: Producer<Parameters = RowLevelSecurityProducerParameters>,
    P::Definition: 'static,
{
    fn name(&self) -> &'static str {
        "ForceRowLevelSecurityEnricher"
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError> {
        if !request.force_row_level_security_for_table_owner {
            return Ok(());
        }
        for table in &request.tables {
            let definition = self.producer.produce(&RowLevelSecurityProducerParameters::new(
                table.name.as_str(),
                request.default_schema.clone(),
            ))?;
            tracing::debug!(
                table = definition.name(),
                "Forced row level security for table owner"
            );
            context.add(Arc::new(definition));
        }
        Ok(())
    }
}
