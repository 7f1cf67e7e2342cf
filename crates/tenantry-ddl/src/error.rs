//! Error types for SQL definition generation.

use thiserror::Error;

/// Raised by a producer before any text is generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required string parameter is empty or whitespace only.
    #[error("{parameter} cannot be blank")]
    BlankParameter { parameter: &'static str },

    /// A producer needs the capability of an artifact that was not supplied.
    #[error("{capability} capability is required")]
    MissingCapability { capability: &'static str },
}

impl ValidationError {
    pub(crate) fn blank(parameter: &'static str) -> Self {
        Self::BlankParameter { parameter }
    }

    pub(crate) fn missing_capability(capability: &'static str) -> Self {
        Self::MissingCapability { capability }
    }
}

/// Errors that abort a pipeline run or its construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// An enricher's producer rejected its parameters.
    #[error("enricher {enricher} failed: {source}")]
    Enricher {
        enricher: &'static str,
        #[source]
        source: ValidationError,
    },

    /// An enricher requires a role no other enricher provides.
    #[error("enricher {enricher} requires role {role}, which no enricher provides")]
    UnsatisfiedRole {
        enricher: &'static str,
        role: &'static str,
    },

    /// Enricher role dependencies form a cycle.
    #[error("dependency cycle between enrichers: {}", enrichers.join(", "))]
    DependencyCycle { enrichers: Vec<&'static str> },
}

/// Check that a required string parameter has content.
pub(crate) fn require_not_blank(
    value: &str,
    parameter: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::blank(parameter));
    }
    Ok(())
}

/// Check that an optional string parameter is either absent or has content.
pub(crate) fn require_not_blank_when_present(
    value: Option<&str>,
    parameter: &'static str,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => require_not_blank(value, parameter),
        None => Ok(()),
    }
}
