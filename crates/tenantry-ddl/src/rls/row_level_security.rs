//! `ALTER TABLE ... ENABLE | FORCE ROW LEVEL SECURITY` producers.

use crate::definition::SqlDefinition;
use crate::error::{ValidationError, require_not_blank};
use crate::function::qualified_name;
use crate::producer::Producer;

/// Target table of a row level security switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLevelSecurityProducerParameters {
    pub table: String,
    pub schema: Option<String>,
}

impl RowLevelSecurityProducerParameters {
    pub fn new(table: impl Into<String>, schema: Option<String>) -> Self {
        Self {
            table: table.into(),
            schema,
        }
    }
}

/// An `ALTER TABLE` statement toggling row level security.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLevelSecurityDefinition {
    table_reference: String,
    create_script: String,
    drop_script: String,
}

impl RowLevelSecurityDefinition {
    fn new(table_reference: String, enable_action: &str, disable_action: &str) -> Self {
        Self {
            create_script: format!(
                "ALTER TABLE {} {} ROW LEVEL SECURITY;",
                table_reference, enable_action
            ),
            drop_script: format!(
                "ALTER TABLE {} {} ROW LEVEL SECURITY;",
                table_reference, disable_action
            ),
            table_reference,
        }
    }

    /// Schema qualified table name.
    pub fn table_reference(&self) -> &str {
        &self.table_reference
    }
}

impl SqlDefinition for RowLevelSecurityDefinition {
    fn name(&self) -> &str {
        &self.table_reference
    }

    fn create_script(&self) -> &str {
        &self.create_script
    }

    fn drop_script(&self) -> &str {
        &self.drop_script
    }
}

fn table_reference(parameters: &RowLevelSecurityProducerParameters) -> Result<String, ValidationError> {
    require_not_blank(&parameters.table, "table")?;
    Ok(qualified_name(parameters.schema.as_deref(), &parameters.table))
}

/// Produces `ALTER TABLE [schema.]table ENABLE ROW LEVEL SECURITY;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnableRowLevelSecurityProducer;

impl EnableRowLevelSecurityProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for EnableRowLevelSecurityProducer {
    type Parameters = RowLevelSecurityProducerParameters;
    type Definition = RowLevelSecurityDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        Ok(RowLevelSecurityDefinition::new(
            table_reference(parameters)?,
            "ENABLE",
            "DISABLE",
        ))
    }
}

/// Produces `ALTER TABLE [schema.]table FORCE ROW LEVEL SECURITY;`.
///
/// Without it the table owner bypasses every policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceRowLevelSecurityProducer;

impl ForceRowLevelSecurityProducer {
    pub fn new() -> Self {
        Self
    }
}

impl Producer for ForceRowLevelSecurityProducer {
    type Parameters = RowLevelSecurityProducerParameters;
    type Definition = RowLevelSecurityDefinition;

    fn produce(
        &self,
        parameters: &Self::Parameters,
    ) -> Result<Self::Definition, ValidationError> {
        Ok(RowLevelSecurityDefinition::new(
            table_reference(parameters)?,
            "FORCE",
            "NO FORCE",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enable_row_level_security() {
        let definition = EnableRowLevelSecurityProducer::new()
            .produce(&RowLevelSecurityProducerParameters::new("users", None))
            .unwrap();
        assert_eq!(
            definition.create_script(),
            "ALTER TABLE users ENABLE ROW LEVEL SECURITY;"
        );
        assert_eq!(
            definition.drop_script(),
            "ALTER TABLE users DISABLE ROW LEVEL SECURITY;"
        );
    }

    #[test]
    fn test_force_row_level_security_with_schema() {
        let definition = ForceRowLevelSecurityProducer::new()
            .produce(&RowLevelSecurityProducerParameters::new(
                "users",
                Some("secondary".to_string()),
            ))
            .unwrap();
        assert_eq!(
            definition.create_script(),
            "ALTER TABLE secondary.users FORCE ROW LEVEL SECURITY;"
        );
        assert_eq!(
            definition.drop_script(),
            "ALTER TABLE secondary.users NO FORCE ROW LEVEL SECURITY;"
        );
    }

    #[test]
    fn test_blank_schema_is_not_qualified() {
        let definition = EnableRowLevelSecurityProducer::new()
            .produce(&RowLevelSecurityProducerParameters::new(
                "users",
                Some(" ".to_string()),
            ))
            .unwrap();
        assert!(!definition.create_script().contains('.'));
    }

    #[test]
    fn test_blank_table_rejected() {
        let parameters = RowLevelSecurityProducerParameters::new("", None);
        assert_eq!(
            EnableRowLevelSecurityProducer::new()
                .produce(&parameters)
                .unwrap_err(),
            ValidationError::BlankParameter { parameter: "table" }
        );
        assert!(ForceRowLevelSecurityProducer::new().produce(&parameters).is_err());
    }
}
