//! Row level security producers.

pub mod function;
pub mod policy;
pub mod row_level_security;

pub use policy::{
    RlsPolicyDefinition, RlsPolicyProducer, RlsPolicyProducerParameters,
    RlsPolicyProducerParametersBuilder,
};
pub use row_level_security::{
    EnableRowLevelSecurityProducer, ForceRowLevelSecurityProducer, RowLevelSecurityDefinition,
    RowLevelSecurityProducerParameters,
};
