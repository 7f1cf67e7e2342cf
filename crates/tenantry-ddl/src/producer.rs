//! The producer contract shared by every artifact kind.

use crate::definition::SqlDefinition;
use crate::error::ValidationError;

/// Maps validated parameters to one artifact.
///
/// Implementations validate before rendering and never return a partially
/// built definition. They hold no state, so producing twice from the same
/// parameters yields byte-identical scripts.
pub trait Producer: Send + Sync {
    type Parameters;
    type Definition: SqlDefinition;

    fn produce(&self, parameters: &Self::Parameters) -> Result<Self::Definition, ValidationError>;
}
