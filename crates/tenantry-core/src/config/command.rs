//! Commands a row level security policy applies to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `FOR` clause of a `CREATE POLICY` statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionCommand {
    #[default]
    All,
    Select,
    Insert,
    Update,
    Delete,
}

impl PermissionCommand {
    /// SQL keyword for the command.
    pub fn as_sql(&self) -> &'static str {
        match self {
            PermissionCommand::All => "ALL",
            PermissionCommand::Select => "SELECT",
            PermissionCommand::Insert => "INSERT",
            PermissionCommand::Update => "UPDATE",
            PermissionCommand::Delete => "DELETE",
        }
    }

    /// Whether PostgreSQL accepts a `USING` expression for this command.
    ///
    /// `INSERT` policies only take `WITH CHECK`.
    pub fn allows_using_expression(&self) -> bool {
        !matches!(self, PermissionCommand::Insert)
    }

    /// Whether PostgreSQL accepts a `WITH CHECK` expression for this command.
    ///
    /// `SELECT` and `DELETE` policies only take `USING`.
    pub fn allows_with_check_expression(&self) -> bool {
        !matches!(self, PermissionCommand::Select | PermissionCommand::Delete)
    }
}

impl fmt::Display for PermissionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_rules() {
        assert!(PermissionCommand::All.allows_using_expression());
        assert!(PermissionCommand::All.allows_with_check_expression());
        assert!(!PermissionCommand::Insert.allows_using_expression());
        assert!(!PermissionCommand::Select.allows_with_check_expression());
        assert!(!PermissionCommand::Delete.allows_with_check_expression());
        assert!(PermissionCommand::Update.allows_with_check_expression());
    }
}
