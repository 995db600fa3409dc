use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::patient::Patient;
use crate::metrics::engine::MetricsEngine;
use crate::store::{MatchStore, StoreError};

/// A mean or ratio, `None` when its denominator is zero
fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Snapshot of every operational metric
///
/// Count maps are `BTreeMap` so rendered output is stable. Means and ratios
/// with a zero denominator are `None` and omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub generated_at: DateTime<Utc>,
    pub number_of_cases: usize,
    pub number_of_submitters: usize,
    pub number_of_cases_with_diagnosis: usize,
    pub number_of_incoming_match_requests: usize,
    pub number_of_matches: usize,
    pub number_of_unique_phenotypes: usize,
    pub number_of_unique_genes: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_number_of_genes_per_case: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_number_of_phenotypes_per_case: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_number_of_variants_per_case: Option<f64>,

    /// `None` when the cohort references no genes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_of_genes_that_match: Option<f64>,

    /// Gene id -> feature count (privileged)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_counts: Option<BTreeMap<String, usize>>,

    /// HPO id -> observation count (privileged)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phenotype_counts: Option<BTreeMap<String, usize>>,
}

impl MetricsReport {
    /// Compute every metric for `patients` and the engine's store.
    ///
    /// Means are `None` for an empty cohort, and the matched-gene fraction is
    /// `None` when no patient has a genomic feature.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be read.
    pub fn collect<S: MatchStore + ?Sized>(
        engine: &MetricsEngine<'_, S>,
        patients: &[Patient],
    ) -> Result<Self, StoreError> {
        let gene_counts = engine.count_genes_in_system(patients);
        let phenotype_counts = engine.count_phenotypes_in_system(patients);

        Ok(Self {
            generated_at: Utc::now(),
            number_of_cases: engine.num_of_patients_in_system(patients),
            number_of_submitters: engine.number_of_submitters(patients),
            number_of_cases_with_diagnosis: engine.number_of_cases_with_diagnosis()?,
            number_of_incoming_match_requests: engine.num_of_incoming_match_requests()?,
            number_of_matches: engine.num_of_matches()?,
            number_of_unique_phenotypes: phenotype_counts.len(),
            number_of_unique_genes: gene_counts.len(),
            mean_number_of_genes_per_case: defined(engine.mean_number_of_genes_per_case(patients)),
            mean_number_of_phenotypes_per_case: defined(
                engine.mean_number_of_phenotypes_per_case(patients),
            ),
            mean_number_of_variants_per_case: defined(
                engine.mean_number_of_variants_per_case(patients),
            ),
            percentage_of_genes_that_match: defined(
                engine.percentage_of_genes_that_match(patients)?,
            ),
            gene_counts: Some(gene_counts.into_iter().collect()),
            phenotype_counts: Some(phenotype_counts.into_iter().collect()),
        })
    }

    /// Copy suitable for public display: per-gene and per-phenotype counts removed
    #[must_use]
    pub fn to_public(&self) -> Self {
        Self {
            gene_counts: None,
            phenotype_counts: None,
            ..self.clone()
        }
    }

    pub fn is_public(&self) -> bool {
        self.gene_counts.is_none() && self.phenotype_counts.is_none()
    }
}
