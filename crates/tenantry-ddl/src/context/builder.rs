//! Fluent facade over a request and the pipeline that runs it.

use tenantry_core::{PermissionCommand, PrimaryKeyColumn, SharedSchemaContextRequest};

use super::{EnrichmentPipeline, SharedSchemaContext};
use crate::error::PipelineError;

/// Collects request settings and generates a [`SharedSchemaContext`].
///
/// ```
/// use tenantry_ddl::SharedSchemaContextBuilder;
///
/// let context = SharedSchemaContextBuilder::new(Some("public".to_string()))
///     .set_grantee("application_user")
///     .create_rls_policy_for_table("users", "tenant_id", "users_table_rls_policy")
///     .build()
///     .unwrap();
///
/// assert!(context.create_script().contains("CREATE POLICY users_table_rls_policy ON public.users"));
/// ```
#[derive(Debug, Default)]
pub struct SharedSchemaContextBuilder {
    request: SharedSchemaContextRequest,
    pipeline: Option<EnrichmentPipeline>,
}

impl SharedSchemaContextBuilder {
    pub fn new(default_schema: Option<String>) -> Self {
        Self::from_request(SharedSchemaContextRequest::new(default_schema))
    }

    pub fn from_request(request: SharedSchemaContextRequest) -> Self {
        Self {
            request,
            pipeline: None,
        }
    }

    pub fn request(&self) -> &SharedSchemaContextRequest {
        &self.request
    }

    pub fn set_current_tenant_id_property(mut self, property: impl Into<String>) -> Self {
        self.request.current_tenant_id_property = property.into();
        self
    }

    pub fn set_current_tenant_id_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.request.current_tenant_id_property_type = Some(property_type.into());
        self
    }

    pub fn set_get_current_tenant_id_function_name(mut self, name: impl Into<String>) -> Self {
        self.request.get_current_tenant_id_function_name = name.into();
        self
    }

    pub fn set_set_current_tenant_id_function_name(mut self, name: impl Into<String>) -> Self {
        self.request.set_current_tenant_id_function_name = name.into();
        self
    }

    pub fn set_equals_current_tenant_identifier_function_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.request.equals_current_tenant_identifier_function_name = name.into();
        self
    }

    pub fn set_tenant_has_authorities_function_name(mut self, name: impl Into<String>) -> Self {
        self.request.tenant_has_authorities_function_name = name.into();
        self
    }

    pub fn set_force_row_level_security_for_table_owner(mut self, force: bool) -> Self {
        self.request.force_row_level_security_for_table_owner = force;
        self
    }

    pub fn set_grantee(mut self, grantee: impl Into<String>) -> Self {
        self.request.grantee = Some(grantee.into());
        self
    }

    /// Add a tenant scoped table whose policy covers all commands.
    pub fn create_rls_policy_for_table(
        self,
        table: impl Into<String>,
        tenant_column: impl Into<String>,
        policy_name: impl Into<String>,
    ) -> Self {
        self.create_rls_policy_for_table_and_command(
            table,
            tenant_column,
            policy_name,
            PermissionCommand::All,
        )
    }

    pub fn create_rls_policy_for_table_and_command(
        mut self,
        table: impl Into<String>,
        tenant_column: impl Into<String>,
        policy_name: impl Into<String>,
        command: PermissionCommand,
    ) -> Self {
        let name: String = table.into();
        let table = self.request.table_mut(&name);
        table.tenant_column = tenant_column.into();
        table.rls_policy_name = Some(policy_name.into());
        table.command = command;
        self
    }

    /// Generate a function that checks whether the row of `table` with the
    /// given primary key belongs to the current tenant.
    ///
    /// `primary_key_columns` are `(column, SQL type)` pairs in key order.
    pub fn create_record_belongs_to_current_tenant_function(
        mut self,
        table: impl Into<String>,
        function_name: impl Into<String>,
        primary_key_columns: &[(&str, &str)],
    ) -> Self {
        let name: String = table.into();
        let table = self.request.table_mut(&name);
        table.record_belongs_to_current_tenant_function_name = Some(function_name.into());
        table.primary_key_columns = primary_key_columns
            .iter()
            .map(|(column, column_type)| PrimaryKeyColumn::new(*column, *column_type))
            .collect();
        self
    }

    /// Replace the built-in pipeline.
    pub fn with_pipeline(mut self, pipeline: EnrichmentPipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Run the pipeline over the collected request.
    pub fn build(&self) -> Result<SharedSchemaContext, PipelineError> {
        match &self.pipeline {
            Some(pipeline) => pipeline.run(&self.request),
            None => EnrichmentPipeline::default().run(&self.request),
        }
    }
}
