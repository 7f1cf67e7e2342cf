//! Pipeline steps that turn a request into definitions.
//!
//! Each enricher reads the roles it needs from the context, invokes its
//! producer and appends the result, then registers the roles it provides so
//! the enrichers after it can reference the new definition.

mod equals_current_tenant_identifier;
mod get_current_tenant_id;
mod is_record_belongs_to_current_tenant;
mod rls_policy;
mod row_level_security;
mod set_current_tenant_id;
mod tenant_has_authorities;

use tenantry_core::SharedSchemaContextRequest;

use crate::context::{ContextRole, SharedSchemaContext};
use crate::error::ValidationError;

pub use equals_current_tenant_identifier::EqualsCurrentTenantIdentifierFunctionDefinitionEnricher;
pub use get_current_tenant_id::GetCurrentTenantIdFunctionDefinitionEnricher;
pub use is_record_belongs_to_current_tenant::IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher;
pub use rls_policy::RlsPolicyEnricher;
pub use row_level_security::{EnableRowLevelSecurityEnricher, ForceRowLevelSecurityEnricher};
pub use set_current_tenant_id::SetCurrentTenantIdFunctionDefinitionEnricher;
pub use tenant_has_authorities::TenantHasAuthoritiesFunctionDefinitionEnricher;

/// One step of the enrichment pipeline.
pub trait SharedSchemaContextEnricher: Send + Sync {
    /// Enricher name for logging and errors.
    fn name(&self) -> &'static str;

    /// Roles that must be registered before this enricher runs.
    fn requires(&self) -> &'static [ContextRole] {
        &[]
    }

    /// Roles this enricher registers.
    fn provides(&self) -> &'static [ContextRole] {
        &[]
    }

    fn enrich(
        &self,
        context: &mut SharedSchemaContext,
        request: &SharedSchemaContextRequest,
    ) -> Result<(), ValidationError>;
}

/// The built-in enrichers, in the order their definitions must be emitted.
pub fn default_enrichers() -> Vec<Box<dyn SharedSchemaContextEnricher>> {
    vec![
        Box::new(GetCurrentTenantIdFunctionDefinitionEnricher::new()),
        Box::new(SetCurrentTenantIdFunctionDefinitionEnricher::new()),
        Box::new(EnableRowLevelSecurityEnricher::new()),
        Box::new(ForceRowLevelSecurityEnricher::new()),
        Box::new(EqualsCurrentTenantIdentifierFunctionDefinitionEnricher::new()),
        Box::new(TenantHasAuthoritiesFunctionDefinitionEnricher::new()),
        Box::new(RlsPolicyEnricher::new()),
        Box::new(IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher::new()),
    ]
}
