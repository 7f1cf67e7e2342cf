//! Shared schema context and the enrichment pipeline that builds it.
//!
//! A [`SharedSchemaContext`] collects the generated definitions in emission
//! order, together with the capability objects that later enrichers (and
//! callers, once generation finished) look up by [`ContextRole`].

pub mod builder;
pub mod enrichers;
pub mod pipeline;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::definition::{
    EqualsCurrentTenantIdentifierFunctionInvocationFactory,
    GetCurrentTenantIdFunctionInvocationFactory,
    IsRecordBelongsToCurrentTenantFunctionInvocationFactory,
    SetCurrentTenantIdFunctionInvocationFactory, SqlDefinition,
    TenantHasAuthoritiesFunctionInvocationFactory,
};

pub use builder::SharedSchemaContextBuilder;
pub use enrichers::SharedSchemaContextEnricher;
pub use pipeline::EnrichmentPipeline;

/// Well-known roles an artifact can fulfil for other enrichers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextRole {
    CurrentTenantGetter,
    CurrentTenantSetter,
    EqualsCurrentTenantIdentifier,
    TenantHasAuthorities,
    /// Fulfilled once any table has a record ownership function.
    IsRecordBelongsToCurrentTenant,
}

impl ContextRole {
    /// Stable key of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextRole::CurrentTenantGetter => "currentTenantGetter",
            ContextRole::CurrentTenantSetter => "currentTenantSetter",
            ContextRole::EqualsCurrentTenantIdentifier => "equalsCurrentTenantIdentifier",
            ContextRole::TenantHasAuthorities => "tenantHasAuthority",
            ContextRole::IsRecordBelongsToCurrentTenant => "isRecordBelongsToCurrentTenant",
        }
    }
}

impl fmt::Display for ContextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, append-only collection of generated definitions.
///
/// Only the pipeline mutates a context; callers receive it read-only.
#[derive(Debug, Default, Clone)]
pub struct SharedSchemaContext {
    definitions: Vec<Arc<dyn SqlDefinition>>,
    current_tenant_getter: Option<Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>>,
    current_tenant_setter: Option<Arc<dyn SetCurrentTenantIdFunctionInvocationFactory>>,
    equals_current_tenant_identifier:
        Option<Arc<dyn EqualsCurrentTenantIdentifierFunctionInvocationFactory>>,
    tenant_has_authorities: Option<Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>>,
    is_record_belongs_to_current_tenant:
        BTreeMap<String, Arc<dyn IsRecordBelongsToCurrentTenantFunctionInvocationFactory>>,
}

impl SharedSchemaContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, definition: Arc<dyn SqlDefinition>) {
        self.definitions.push(definition);
    }

    pub(crate) fn set_current_tenant_getter(
        &mut self,
        factory: Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>,
    ) {
        self.current_tenant_getter = Some(factory);
    }

    pub(crate) fn set_current_tenant_setter(
        &mut self,
        factory: Arc<dyn SetCurrentTenantIdFunctionInvocationFactory>,
    ) {
        self.current_tenant_setter = Some(factory);
    }

    pub(crate) fn set_equals_current_tenant_identifier(
        &mut self,
        factory: Arc<dyn EqualsCurrentTenantIdentifierFunctionInvocationFactory>,
    ) {
        self.equals_current_tenant_identifier = Some(factory);
    }

    pub(crate) fn set_tenant_has_authorities(
        &mut self,
        factory: Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>,
    ) {
        self.tenant_has_authorities = Some(factory);
    }

    pub(crate) fn set_is_record_belongs_to_current_tenant(
        &mut self,
        table: &str,
        factory: Arc<dyn IsRecordBelongsToCurrentTenantFunctionInvocationFactory>,
    ) {
        self.is_record_belongs_to_current_tenant
            .insert(table.to_string(), factory);
    }

    /// Definitions in emission order.
    pub fn definitions(&self) -> &[Arc<dyn SqlDefinition>] {
        &self.definitions
    }

    pub fn current_tenant_getter(
        &self,
    ) -> Option<Arc<dyn GetCurrentTenantIdFunctionInvocationFactory>> {
        self.current_tenant_getter.clone()
    }

    pub fn current_tenant_setter(
        &self,
    ) -> Option<Arc<dyn SetCurrentTenantIdFunctionInvocationFactory>> {
        self.current_tenant_setter.clone()
    }

    pub fn equals_current_tenant_identifier(
        &self,
    ) -> Option<Arc<dyn EqualsCurrentTenantIdentifierFunctionInvocationFactory>> {
        self.equals_current_tenant_identifier.clone()
    }

    pub fn tenant_has_authorities(
        &self,
    ) -> Option<Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>> {
        self.tenant_has_authorities.clone()
    }

    /// Record ownership function generated for `table`.
    pub fn is_record_belongs_to_current_tenant(
        &self,
        table: &str,
    ) -> Option<Arc<dyn IsRecordBelongsToCurrentTenantFunctionInvocationFactory>> {
        self.is_record_belongs_to_current_tenant.get(table).cloned()
    }

    /// Whether some definition fulfils `role`.
    pub fn has_role(&self, role: ContextRole) -> bool {
        match role {
            ContextRole::CurrentTenantGetter => self.current_tenant_getter.is_some(),
            ContextRole::CurrentTenantSetter => self.current_tenant_setter.is_some(),
            ContextRole::EqualsCurrentTenantIdentifier => {
                self.equals_current_tenant_identifier.is_some()
            }
            ContextRole::TenantHasAuthorities => self.tenant_has_authorities.is_some(),
            ContextRole::IsRecordBelongsToCurrentTenant => {
                !self.is_record_belongs_to_current_tenant.is_empty()
            }
        }
    }

    /// Create statements, one per line, in emission order.
    pub fn create_script(&self) -> String {
        self.definitions
            .iter()
            .map(|definition| definition.create_script())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drop statements, one per line, in reverse emission order.
    pub fn drop_script(&self) -> String {
        self.definitions
            .iter()
            .rev()
            .map(|definition| definition.drop_script())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
