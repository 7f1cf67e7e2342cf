//! `CREATE POLICY` producer.
//!
//! For more details see the PostgreSQL documentation of
//! [CREATE POLICY](https://www.postgresql.org/docs/current/sql-createpolicy.html).

use std::sync::Arc;

use tenantry_core::PermissionCommand;

use crate::definition::{SqlDefinition, TenantHasAuthoritiesFunctionInvocationFactory};
use crate::error::{ValidationError, require_not_blank};
use crate::function::{FunctionArgumentValue, qualified_name};
use crate::producer::Producer;

#[derive(Debug, Clone)]
pub struct RlsPolicyProducerParameters {
    pub policy_name: String,
    pub table: String,
    pub schema: Option<String>,
    pub grantee: String,
    pub command: PermissionCommand,
    /// Column holding the tenant identifier of each row.
    pub tenant_column: String,
    pub using_expression: Option<Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>>,
    pub with_check_expression: Option<Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>>,
}

impl RlsPolicyProducerParameters {
    pub fn builder() -> RlsPolicyProducerParametersBuilder {
        RlsPolicyProducerParametersBuilder::default()
    }
}

/// Fluent builder for [`RlsPolicyProducerParameters`].
#[derive(Debug, Clone, Default)]
pub struct RlsPolicyProducerParametersBuilder {
    policy_name: String,
    table: String,
    schema: Option<String>,
    grantee: String,
    command: PermissionCommand,
    tenant_column: Option<String>,
    using_expression: Option<Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>>,
    with_check_expression: Option<Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>>,
}

impl RlsPolicyProducerParametersBuilder {
    pub fn with_policy_name(mut self, policy_name: impl Into<String>) -> Self {
        self.policy_name = policy_name.into();
        self
    }

    pub fn with_policy_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_policy_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_grantee(mut self, grantee: impl Into<String>) -> Self {
        self.grantee = grantee.into();
        self
    }

    pub fn with_permission_command(mut self, command: PermissionCommand) -> Self {
        self.command = command;
        self
    }

    pub fn with_tenant_column(mut self, tenant_column: impl Into<String>) -> Self {
        self.tenant_column = Some(tenant_column.into());
        self
    }

    pub fn with_using_expression(
        mut self,
        factory: Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>,
    ) -> Self {
        self.using_expression = Some(factory);
        self
    }

    pub fn with_with_check_expression(
        mut self,
        factory: Arc<dyn TenantHasAuthoritiesFunctionInvocationFactory>,
    ) -> Self {
        self.with_check_expression = Some(factory);
        self
    }

    pub fn build(self) -> RlsPolicyProducerParameters {
        RlsPolicyProducerParameters {
            policy_name: self.policy_name,
            table: self.table,
            schema: self.schema,
            grantee: self.grantee,
            command: self.command,
            tenant_column: self.tenant_column.unwrap_or_else(|| "tenant_id".to_string()),
            using_expression: self.using_expression,
            with_check_expression: self.with_check_expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlsPolicyDefinition {
    policy_name: String,
    table_reference: String,
    create_script: String,
    drop_script: String,
}

impl RlsPolicyDefinition {
    /// Schema qualified name of the table the policy is attached to.
    pub fn table_reference(&self) -> &str {
        &self.table_reference
    }
}

impl SqlDefinition for RlsPolicyDefinition {
    fn name(&self) -> &str {
        &self.policy_name
    }

    fn create_script(&self) -> &str {
        &self.create_script
    }

    fn drop_script(&self) -> &str {
        &self.drop_script
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RlsPolicyProducer;

impl RlsPolicyProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for RlsPolicyProducer {
    type Parameters = RlsPolicyProducerParameters;
    type Definition = RlsPolicyDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        require_not_blank(&parameters.policy_name, "policy name")?;
        require_not_blank(&parameters.table, "table")?;
        require_not_blank(&parameters.grantee, "grantee")?;
        require_not_blank(&parameters.tenant_column, "tenant column")?;

        let command = parameters.command;
        let using_expression = if command.allows_using_expression() {
            let factory = parameters
                .using_expression
                .as_ref()
                .ok_or_else(|| ValidationError::missing_capability("USING expression"))?;
            Some(expression(factory.as_ref(), parameters))
        } else {
            None
        };
        let with_check_expression = if command.allows_with_check_expression() {
            let factory = parameters
                .with_check_expression
                .as_ref()
                .ok_or_else(|| ValidationError::missing_capability("WITH CHECK expression"))?;
            Some(expression(factory.as_ref(), parameters))
        } else {
            None
        };

        let table_reference = qualified_name(parameters.schema.as_deref(), &parameters.table);
        let mut create_script = format!(
            "CREATE POLICY {} ON {}\nFOR {}\nTO {}",
            parameters.policy_name, table_reference, command, parameters.grantee
        );
        if let Some(using_expression) = using_expression {
            create_script.push_str(&format!("\nUSING ({})", using_expression));
        }
        if let Some(with_check_expression) = with_check_expression {
            create_script.push_str(&format!("\nWITH CHECK ({})", with_check_expression));
        }
        create_script.push(';');

        Ok(RlsPolicyDefinition {
            drop_script: format!(
                "DROP POLICY IF EXISTS {} ON {};",
                parameters.policy_name, table_reference
            ),
            policy_name: parameters.policy_name.clone(),
            table_reference,
            create_script,
        })
    }
}

fn expression(
    factory: &dyn TenantHasAuthoritiesFunctionInvocationFactory,
    parameters: &RlsPolicyProducerParameters,
) -> String {
    let schema = parameters
        .schema
        .as_deref()
        .filter(|schema| !schema.trim().is_empty());
    factory.tenant_has_authorities_function_invocation(
        &FunctionArgumentValue::reference(parameters.tenant_column.as_str()),
        parameters.command,
        &FunctionArgumentValue::literal(parameters.table.as_str()),
        &FunctionArgumentValue::literal_or_null(schema),
    )
}
