//! Ordered execution of enrichers.
//!
//! PostgreSQL rejects a statement that references a function or table that
//! does not exist yet, so every definition must be emitted after the
//! definitions whose capabilities it consumes. Enrichers declare the roles
//! they require and provide; the pipeline orders them once, at construction.

use std::collections::BTreeSet;
use std::fmt;

use tenantry_core::SharedSchemaContextRequest;

use super::SharedSchemaContext;
use super::enrichers::{SharedSchemaContextEnricher, default_enrichers};
use crate::error::PipelineError;

/// Runs enrichers in dependency order against a fresh context.
pub struct EnrichmentPipeline {
    enrichers: Vec<Box<dyn SharedSchemaContextEnricher>>,
}

impl EnrichmentPipeline {
    /// Create a pipeline, ordering `enrichers` so that each one runs after
    /// every enricher providing a role it requires.
    ///
    /// Among enrichers with no ordering constraint between them the given
    /// order is kept.
    pub fn new(
        enrichers: Vec<Box<dyn SharedSchemaContextEnricher>>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            enrichers: sort_enrichers(enrichers)?,
        })
    }

    /// Enricher names in execution order.
    pub fn enricher_names(&self) -> Vec<&'static str> {
        self.enrichers.iter().map(|enricher| enricher.name()).collect()
    }

    /// Run every enricher against a new context.
    ///
    /// Stops at the first failing enricher; the partially built context is
    /// dropped.
    pub fn run(
        &self,
        request: &SharedSchemaContextRequest,
    ) -> Result<SharedSchemaContext, PipelineError> {
        tracing::debug!(
            enrichers = self.enrichers.len(),
            tables = request.tables.len(),
            "Running enrichment pipeline"
        );

        let mut context = SharedSchemaContext::new();
        for enricher in &self.enrichers {
            enricher.enrich(&mut context, request).map_err(|source| {
                tracing::warn!(
                    enricher = enricher.name(),
                    error = %source,
                    "Enricher failed, aborting pipeline"
                );
                PipelineError::Enricher {
                    enricher: enricher.name(),
                    source,
                }
            })?;
        }

        tracing::debug!(
            definitions = context.definitions().len(),
            "Enrichment pipeline finished"
        );
        Ok(context)
    }
}

impl Default for EnrichmentPipeline {
    /// The built-in enrichers, which are already in dependency order.
    fn default() -> Self {
        Self {
            enrichers: default_enrichers(),
        }
    }
}

impl fmt::Debug for EnrichmentPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentPipeline")
            .field("enrichers", &self.enricher_names())
            .finish()
    }
}

/// Topological sort, picking the lowest ready index first.
fn sort_enrichers(
    enrichers: Vec<Box<dyn SharedSchemaContextEnricher>>,
) -> Result<Vec<Box<dyn SharedSchemaContextEnricher>>, PipelineError> {
    let count = enrichers.len();
    let mut dependencies = vec![BTreeSet::new(); count];

    for (index, enricher) in enrichers.iter().enumerate() {
        for role in enricher.requires() {
            let providers = enrichers
                .iter()
                .enumerate()
                .filter(|(other, candidate)| *other != index && candidate.provides().contains(role))
                .map(|(other, _)| other)
                .collect::<Vec<_>>();
            if providers.is_empty() {
                return Err(PipelineError::UnsatisfiedRole {
                    enricher: enricher.name(),
                    role: role.as_str(),
                });
            }
            dependencies[index].extend(providers);
        }
    }

    let mut placed = vec![false; count];
    let mut order = Vec::with_capacity(count);
    while order.len() < count {
        let ready = (0..count)
            .find(|&index| !placed[index] && dependencies[index].iter().all(|&dep| placed[dep]));
        match ready {
            Some(index) => {
                placed[index] = true;
                order.push(index);
            }
            None => {
                return Err(PipelineError::DependencyCycle {
                    enrichers: (0..count)
                        .filter(|&index| !placed[index])
                        .map(|index| enrichers[index].name())
                        .collect(),
                });
            }
        }
    }

    let mut slots = enrichers.into_iter().map(Some).collect::<Vec<_>>();
    Ok(order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextRole;
    use crate::error::ValidationError;
    use pretty_assertions::assert_eq;

    struct Step {
        name: &'static str,
        requires: &'static [ContextRole],
        provides: &'static [ContextRole],
    }

    impl SharedSchemaContextEnricher for Step {
        fn name(&self) -> &'static str {
            self.name
        }

        fn requires(&self) -> &'static [ContextRole] {
            self.requires
        }

        fn provides(&self) -> &'static [ContextRole] {
            self.provides
        }

        fn enrich(
            &self,
            _context: &mut SharedSchemaContext,
            _request: &SharedSchemaContextRequest,
        ) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    fn step(
        name: &'static str,
        requires: &'static [ContextRole],
        provides: &'static [ContextRole],
    ) -> Box<dyn SharedSchemaContextEnricher> {
        Box::new(Step {
            name,
            requires,
            provides,
        })
    }

    #[test]
    fn test_default_enrichers_keep_canonical_order() {
        let sorted = EnrichmentPipeline::new(default_enrichers()).unwrap();
        assert_eq!(
            sorted.enricher_names(),
            EnrichmentPipeline::default().enricher_names()
        );
        assert_eq!(
            sorted.enricher_names(),
            vec![
                "GetCurrentTenantIdFunctionDefinitionEnricher",
                "SetCurrentTenantIdFunctionDefinitionEnricher",
                "EnableRowLevelSecurityEnricher",
                "ForceRowLevelSecurityEnricher",
                "EqualsCurrentTenantIdentifierFunctionDefinitionEnricher",
                "TenantHasAuthoritiesFunctionDefinitionEnricher",
                "RlsPolicyEnricher",
                "IsRecordBelongsToCurrentTenantFunctionDefinitionEnricher",
            ]
        );
    }

    #[test]
    fn test_dependent_enricher_moves_after_provider() {
        let pipeline = EnrichmentPipeline::new(vec![
            step("policy", &[ContextRole::TenantHasAuthorities], &[]),
            step("alter", &[], &[]),
            step(
                "authorities",
                &[ContextRole::CurrentTenantGetter],
                &[ContextRole::TenantHasAuthorities],
            ),
            step("getter", &[], &[ContextRole::CurrentTenantGetter]),
        ])
        .unwrap();

        assert_eq!(
            pipeline.enricher_names(),
            vec!["alter", "getter", "authorities", "policy"]
        );
    }

    #[test]
    fn test_unsatisfied_role() {
        let result = EnrichmentPipeline::new(vec![step(
            "policy",
            &[ContextRole::TenantHasAuthorities],
            &[],
        )]);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::UnsatisfiedRole {
                enricher: "policy",
                role: "tenantHasAuthority",
            }
        );
    }

    #[test]
    fn test_cycle_detected() {
        let result = EnrichmentPipeline::new(vec![
            step("unrelated", &[], &[]),
            step(
                "a",
                &[ContextRole::CurrentTenantSetter],
                &[ContextRole::CurrentTenantGetter],
            ),
            step(
                "b",
                &[ContextRole::CurrentTenantGetter],
                &[ContextRole::CurrentTenantSetter],
            ),
        ]);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::DependencyCycle {
                enrichers: vec!["a", "b"],
            }
        );
    }
}
