//! Function and statement model.
//!
//! Every producer renders its DDL through the helpers in this module so that
//! schema qualification, argument lists and value quoting stay identical
//! across artifact kinds.

use std::fmt;

/// Type used for a tenant identifier when none is configured.
pub const DEFAULT_ARGUMENT_TYPE: &str = "VARCHAR(255)";

/// Positional argument of a generated function, described by its SQL type only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionArgument {
    type_name: String,
}

impl FunctionArgument {
    pub fn for_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Value passed to a function invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionArgumentValue {
    /// Column name or positional parameter, rendered verbatim.
    Reference(String),
    /// String constant, rendered single quoted.
    Literal(String),
    Null,
}

impl FunctionArgumentValue {
    pub fn reference(value: impl Into<String>) -> Self {
        Self::Reference(value.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// A literal for a present value, `NULL` otherwise.
    pub fn literal_or_null(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::literal)
    }
}

impl fmt::Display for FunctionArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(value) => f.write_str(value),
            Self::Literal(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// Qualify `name` with `schema` unless the schema is absent or blank.
pub fn qualified_name(schema: Option<&str>, name: &str) -> String {
    match schema.filter(|s| !s.trim().is_empty()) {
        Some(schema) => format!("{}.{}", schema, name),
        None => name.to_string(),
    }
}

/// Render `reference(value, value, ...)`.
pub fn invocation(reference: &str, values: &[FunctionArgumentValue]) -> String {
    let values = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", reference, values)
}

/// Language and planner attributes of a generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionLanguage {
    /// `LANGUAGE sql`, `STABLE PARALLEL SAFE`.
    StableSql,
    /// `LANGUAGE plpgsql`, `VOLATILE`.
    VolatilePlpgsql,
}

impl FunctionLanguage {
    fn language(&self) -> &'static str {
        match self {
            Self::StableSql => "sql",
            Self::VolatilePlpgsql => "plpgsql",
        }
    }

    fn attributes(&self) -> &'static str {
        match self {
            Self::StableSql => "STABLE PARALLEL SAFE",
            Self::VolatilePlpgsql => "VOLATILE",
        }
    }
}

/// A rendered `CREATE OR REPLACE FUNCTION` statement and the signature needed
/// to invoke or drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    schema: Option<String>,
    function_name: String,
    arguments: Vec<FunctionArgument>,
    create_script: String,
    drop_script: String,
}

impl FunctionDefinition {
    pub fn new(
        schema: Option<&str>,
        function_name: &str,
        arguments: Vec<FunctionArgument>,
        returns: &str,
        body: &str,
        language: FunctionLanguage,
    ) -> Self {
        let schema = schema
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);
        let reference = qualified_name(schema.as_deref(), function_name);
        let argument_types = arguments
            .iter()
            .map(FunctionArgument::type_name)
            .collect::<Vec<_>>()
            .join(", ");

        let create_script = format!(
            "CREATE OR REPLACE FUNCTION {reference}({argument_types}) RETURNS {returns} as $$\n\
             {body}\n\
             $$ LANGUAGE {language}\n\
             {attributes};",
            language = language.language(),
            attributes = language.attributes(),
        );
        let drop_script = format!("DROP FUNCTION IF EXISTS {reference}({argument_types});");

        Self {
            schema,
            function_name: function_name.to_string(),
            arguments,
            create_script,
            drop_script,
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn arguments(&self) -> &[FunctionArgument] {
        &self.arguments
    }

    /// Name used in invocations, schema qualified when a schema is set.
    pub fn function_reference(&self) -> String {
        qualified_name(self.schema(), &self.function_name)
    }

    pub fn create_script(&self) -> &str {
        &self.create_script
    }

    pub fn drop_script(&self) -> &str {
        &self.drop_script
    }

    /// Render an invocation of this function.
    pub fn invoke(&self, values: &[FunctionArgumentValue]) -> String {
        invocation(&self.function_reference(), values)
    }
}
