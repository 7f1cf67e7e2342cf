//! # tenantry-ddl
//!
//! SQL definition generation for shared schema multi-tenancy in PostgreSQL.
//!
//! This crate provides:
//! - Producers that render one DDL statement each from validated parameters
//! - Capability traits through which a definition is referenced by others
//! - An enrichment pipeline that emits every definition in dependency order
//!
//! ## Generated Definitions
//!
//! | Definition | Statement |
//! |------------|-----------|
//! | Get current tenant id | `CREATE OR REPLACE FUNCTION ... RETURNS VARCHAR(255)` |
//! | Set current tenant id | `CREATE OR REPLACE FUNCTION ... RETURNS VOID` |
//! | Enable RLS | `ALTER TABLE ... ENABLE ROW LEVEL SECURITY` |
//! | Force RLS | `ALTER TABLE ... FORCE ROW LEVEL SECURITY` |
//! | Equals current tenant identifier | `CREATE OR REPLACE FUNCTION ... RETURNS BOOLEAN` |
//! | Tenant has authorities | `CREATE OR REPLACE FUNCTION ... RETURNS BOOLEAN` |
//! | RLS policy | `CREATE POLICY ... USING (...) WITH CHECK (...)` |
//! | Is record belongs to current tenant | `CREATE OR REPLACE FUNCTION ... RETURNS BOOLEAN` |
//!
//! The crate never talks to a database; it only produces text.

pub mod context;
pub mod definition;
pub mod error;
pub mod function;
pub mod producer;
pub mod rls;

pub use context::enrichers::default_enrichers;
pub use context::{
    ContextRole, EnrichmentPipeline, SharedSchemaContext, SharedSchemaContextBuilder,
    SharedSchemaContextEnricher,
};
pub use definition::{
    EqualsCurrentTenantIdentifierFunctionInvocationFactory,
    GetCurrentTenantIdFunctionInvocationFactory,
    IsRecordBelongsToCurrentTenantFunctionInvocationFactory,
    SetCurrentTenantIdFunctionInvocationFactory, SqlDefinition,
    TenantHasAuthoritiesFunctionInvocationFactory,
};
pub use error::{PipelineError, ValidationError};
pub use function::{
    DEFAULT_ARGUMENT_TYPE, FunctionArgument, FunctionArgumentValue, FunctionDefinition,
};
pub use producer::Producer;
