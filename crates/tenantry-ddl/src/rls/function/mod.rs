//! Producers of the tenant scoping functions.

pub mod equals_current_tenant_identifier;
pub mod get_current_tenant_id;
pub mod is_record_belongs_to_current_tenant;
pub mod set_current_tenant_id;
pub mod tenant_has_authorities;

pub use equals_current_tenant_identifier::{
    EqualsCurrentTenantIdentifierFunctionDefinition,
    EqualsCurrentTenantIdentifierFunctionProducer,
    EqualsCurrentTenantIdentifierFunctionProducerParameters,
};
pub use get_current_tenant_id::{
    GetCurrentTenantIdFunctionDefinition, GetCurrentTenantIdFunctionProducer,
    GetCurrentTenantIdFunctionProducerParameters,
};
pub use is_record_belongs_to_current_tenant::{
    IsRecordBelongsToCurrentTenantFunctionDefinition,
    IsRecordBelongsToCurrentTenantFunctionProducer,
    IsRecordBelongsToCurrentTenantFunctionProducerParameters,
};
pub use set_current_tenant_id::{
    SetCurrentTenantIdFunctionDefinition, SetCurrentTenantIdFunctionProducer,
    SetCurrentTenantIdFunctionProducerParameters,
};
pub use tenant_has_authorities::{
    TenantHasAuthoritiesFunctionDefinition, TenantHasAuthoritiesFunctionProducer,
    TenantHasAuthoritiesFunctionProducerParameters,
};
