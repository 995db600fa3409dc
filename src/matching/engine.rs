use tracing::debug;

use crate::catalog::genes::GeneResolver;
use crate::core::patient::Patient;
use crate::core::query::{ExternalMatchQuery, MatchmakerResult};
use crate::matching::feature::GenomicFeatureMatch;

/// How feature predicates combine into a match decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchPolicy {
    /// Same gene is enough
    Gene,
    /// Same gene, and either the same variant or the same Sequence Ontology type
    #[default]
    GeneAndVariantOrType,
    /// Same gene and the same variant
    ExactVariant,
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    pub policy: MatchPolicy,
    /// Additionally require the query's zygosity to be supplied and equal
    pub require_zygosity: bool,
}

/// Pairs a query patient's genomic features against a candidate cohort
pub struct MatchingEngine<'a> {
    resolver: &'a GeneResolver,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(resolver: &'a GeneResolver) -> Self {
        Self {
            resolver,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(resolver: &'a GeneResolver, config: MatchingConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Whether one feature pair satisfies the configured policy
    pub fn is_match(&self, pair: &GenomicFeatureMatch<'_>) -> bool {
        let same_gene = self
            .resolver
            .same_gene(pair.gene_identifier(), pair.node_feature().gene_id());
        if !same_gene {
            return false;
        }

        if self.config.require_zygosity && !pair.has_zygosity_match() {
            return false;
        }

        match self.config.policy {
            MatchPolicy::Gene => true,
            MatchPolicy::GeneAndVariantOrType => pair.has_variant_match() || pair.has_type_match(),
            MatchPolicy::ExactVariant => pair.has_variant_match(),
        }
    }

    /// All feature pairs between `query` and `candidate` that satisfy the policy
    pub fn matching_pairs<'p>(
        &self,
        query: &'p Patient,
        candidate: &'p Patient,
    ) -> Vec<GenomicFeatureMatch<'p>> {
        query
            .genomic_features
            .iter()
            .flat_map(|q| {
                candidate
                    .genomic_features
                    .iter()
                    .map(move |n| GenomicFeatureMatch::new(q, n))
            })
            .filter(|pair| self.is_match(pair))
            .collect()
    }

    /// Candidates sharing at least one qualifying feature pair with `query`.
    ///
    /// The query patient itself is never returned. Results keep candidate order.
    pub fn find_matches(&self, query: &Patient, candidates: &[Patient]) -> Vec<MatchmakerResult> {
        let mut results = Vec::new();

        for candidate in candidates {
            if candidate.id == query.id {
                continue;
            }

            let pairs = self.matching_pairs(query, candidate);
            if pairs.is_empty() {
                continue;
            }

            let mut matched_genes: Vec<String> = Vec::new();
            for pair in &pairs {
                let gene = pair.gene_identifier();
                if !matched_genes.iter().any(|g| g == gene) {
                    matched_genes.push(gene.to_string());
                }
            }

            debug!(
                query = %query.id,
                candidate = %candidate.id,
                pairs = pairs.len(),
                "Candidate matched"
            );

            results.push(MatchmakerResult::new(candidate.clone()).with_matched_genes(matched_genes));
        }

        results
    }

    /// Run one incoming request and build the log record for it
    pub fn process_query(&self, query: Patient, candidates: &[Patient]) -> ExternalMatchQuery {
        let results = self.find_matches(&query, candidates);
        debug!(
            query = %query.id,
            candidates = candidates.len(),
            matches = results.len(),
            "Processed match request"
        );
        ExternalMatchQuery::new(query, results)
    }
}
