use std::collections::{HashMap, HashSet};

use crate::catalog::genes::GeneResolver;
use crate::core::patient::Patient;
use crate::store::{MatchQueryFilter, MatchStore, PatientFilter, StoreError};

/// Convert a count to f64 for mean and ratio calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Read-side aggregator over the cohort and the match-request log.
///
/// Methods taking `patients` are pure functions of that slice; the others read
/// the store. Means and ratios over an empty cohort are NaN: callers that want
/// to report "no data" must check for an empty cohort themselves.
pub struct MetricsEngine<'a, S: MatchStore + ?Sized> {
    store: &'a S,
    resolver: &'a GeneResolver,
}

impl<'a, S: MatchStore + ?Sized> MetricsEngine<'a, S> {
    pub fn new(store: &'a S, resolver: &'a GeneResolver) -> Self {
        Self { store, resolver }
    }

    /// Gene id -> number of genomic features referencing it
    pub fn count_genes_in_system(&self, patients: &[Patient]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for gf in patients.iter().flat_map(|p| &p.genomic_features) {
            *counts.entry(gf.gene.id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// HPO id -> number of phenotype observations
    pub fn count_phenotypes_in_system(&self, patients: &[Patient]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for pf in patients.iter().flat_map(|p| &p.features) {
            *counts.entry(pf.id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct phenotype terms
    pub fn total_num_of_phenotypes_in_system(&self, patients: &[Patient]) -> usize {
        self.count_phenotypes_in_system(patients).len()
    }

    /// Fraction of the cohort's distinct genes that appear in at least one
    /// persisted match result.
    ///
    /// Both sides are normalized through the resolver, so a gene referenced by
    /// symbol in one record and by Ensembl id in another counts once.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the match log cannot be read.
    pub fn percentage_of_genes_that_match(&self, patients: &[Patient]) -> Result<f64, StoreError> {
        let all_genes: HashSet<String> = self
            .count_genes_in_system(patients)
            .keys()
            .map(|gene| self.resolver.resolve(gene))
            .collect();

        let mut matched_genes: HashSet<String> = HashSet::new();
        for query in self.store.find_match_queries(MatchQueryFilter::All)? {
            for result in &query.results {
                for gf in &result.patient.genomic_features {
                    matched_genes.insert(self.resolver.resolve(&gf.gene.id));
                }
            }
        }

        let matched = matched_genes.intersection(&all_genes).count();
        Ok(count_to_f64(matched) / count_to_f64(all_genes.len()))
    }

    /// Mean number of genomic features per patient
    pub fn mean_number_of_genes_per_case(&self, patients: &[Patient]) -> f64 {
        let total: usize = patients.iter().map(|p| p.genomic_features.len()).sum();
        count_to_f64(total) / count_to_f64(patients.len())
    }

    /// Mean number of phenotype features per patient
    pub fn mean_number_of_phenotypes_per_case(&self, patients: &[Patient]) -> f64 {
        let total: usize = patients.iter().map(|p| p.features.len()).sum();
        count_to_f64(total) / count_to_f64(patients.len())
    }

    /// Mean number of populated variants per patient
    pub fn mean_number_of_variants_per_case(&self, patients: &[Patient]) -> f64 {
        let total: usize = patients.iter().map(Patient::populated_variant_count).sum();
        count_to_f64(total) / count_to_f64(patients.len())
    }

    /// Number of stored patients with at least one disorder
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the patient collection cannot be read.
    pub fn number_of_cases_with_diagnosis(&self) -> Result<usize, StoreError> {
        Ok(self.store.find_patients(PatientFilter::WithDiagnosis)?.len())
    }

    /// Number of distinct contact names
    pub fn number_of_submitters(&self, patients: &[Patient]) -> usize {
        patients
            .iter()
            .map(|p| p.contact.name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of match requests ever received
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the match log cannot be read.
    pub fn num_of_incoming_match_requests(&self) -> Result<usize, StoreError> {
        Ok(self.store.find_match_queries(MatchQueryFilter::All)?.len())
    }

    /// Number of distinct query patients that matched someone other than themselves.
    ///
    /// Two results for the same query count once, and a result naming the
    /// query patient itself does not count.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the match log cannot be read.
    pub fn num_of_matches(&self) -> Result<usize, StoreError> {
        let mut matched_pairs: HashMap<String, HashSet<String>> = HashMap::new();

        for query in self.store.find_match_queries(MatchQueryFilter::MatchFound)? {
            let query_id = &query.incoming_query.id;
            for result in &query.results {
                if result.patient.id != *query_id {
                    matched_pairs
                        .entry(query_id.to_string())
                        .or_default()
                        .insert(result.patient.id.to_string());
                }
            }
        }

        Ok(matched_pairs.len())
    }

    /// Cohort size
    pub fn num_of_patients_in_system(&self, patients: &[Patient]) -> usize {
        patients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::{GenomicFeature, PhenotypeFeature};
    use crate::core::patient::{Contact, Disorder};
    use crate::core::query::{ExternalMatchQuery, MatchmakerResult};
    use crate::core::types::Assembly;
    use crate::core::variant::Variant;
    use crate::store::InMemoryStore;

    fn patient(id: &str, submitter: &str) -> Patient {
        Patient::new(id, Contact::new(submitter))
    }

    fn with_genes(p: Patient, genes: &[&str]) -> Patient {
        p.with_genomic_features(genes.iter().map(|g| GenomicFeature::new(*g)).collect())
    }

    fn with_phenotypes(p: Patient, terms: &[&str]) -> Patient {
        p.with_features(terms.iter().map(|t| PhenotypeFeature::new(*t)).collect())
    }

    #[test]
    fn test_count_genes_in_system() {
        let store = InMemoryStore::new();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        let patients = vec![
            with_genes(patient("P1", "a"), &["G1"]),
            with_genes(patient("P2", "b"), &["G1"]),
        ];
        let counts = engine.count_genes_in_system(&patients);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["G1"], 2);
    }

    #[test]
    fn test_gene_counts_not_deduplicated_per_patient() {
        let store = InMemoryStore::new();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        let patients = vec![with_genes(patient("P1", "a"), &["G1", "G1", "G2"])];
        let counts = engine.count_genes_in_system(&patients);
        assert_eq!(counts["G1"], 2);
        assert_eq!(counts["G2"], 1);
    }

    #[test]
    fn test_phenotype_counts() {
        let store = InMemoryStore::new();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        let patients = vec![
            with_phenotypes(patient("P1", "a"), &["HP:0000252", "HP:0001250"]),
            with_phenotypes(patient("P2", "b"), &["HP:0000252"]),
        ];
        let counts = engine.count_phenotypes_in_system(&patients);
        assert_eq!(counts["HP:0000252"], 2);
        assert_eq!(counts["HP:0001250"], 1);
        assert_eq!(engine.total_num_of_phenotypes_in_system(&patients), 2);
        assert!((engine.mean_number_of_phenotypes_per_case(&patients) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_variants_per_case() {
        let store = InMemoryStore::new();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        let populated = Variant::new(Assembly::Grch37, "1", 100, 100).with_bases("A", "G");
        let patients = vec![
            patient("P1", "a")
                .with_genomic_features(vec![GenomicFeature::new("G1").with_variant(populated)]),
            patient("P2", "b").with_genomic_features(vec![GenomicFeature::new("G1")]),
        ];
        assert!((engine.mean_number_of_variants_per_case(&patients) - 0.5).abs() < 1e-9);
        assert!((engine.mean_number_of_genes_per_case(&patients) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_means_over_empty_cohort_are_nan() {
        let store = InMemoryStore::new();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        assert!(engine.mean_number_of_genes_per_case(&[]).is_nan());
        assert!(engine.mean_number_of_phenotypes_per_case(&[]).is_nan());
        assert!(engine.mean_number_of_variants_per_case(&[]).is_nan());
        assert!(engine.percentage_of_genes_that_match(&[]).unwrap().is_nan());
    }

    #[test]
    fn test_number_of_submitters() {
        let store = InMemoryStore::new();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        let patients = vec![
            patient("P1", "Alice"),
            patient("P2", "Alice"),
            patient("P3", "Bob"),
        ];
        assert_eq!(engine.number_of_submitters(&patients), 2);
        assert_eq!(engine.num_of_patients_in_system(&patients), 3);
    }

    #[test]
    fn test_cases_with_diagnosis() {
        let mut store = InMemoryStore::new();
        store.insert_patient(patient("P1", "a")).unwrap();
        store
            .insert_patient(patient("P2", "a").with_disorders(vec![Disorder::new("MIM:154700")]))
            .unwrap();
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        assert_eq!(engine.number_of_cases_with_diagnosis().unwrap(), 1);
    }

    #[test]
    fn test_num_of_matches_counts_distinct_queries() {
        let mut store = InMemoryStore::new();
        store.record_match_query(ExternalMatchQuery::new(
            patient("Q1", "a"),
            vec![
                MatchmakerResult::new(patient("C1", "b")),
                MatchmakerResult::new(patient("C2", "c")),
            ],
        ));
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        assert_eq!(engine.num_of_matches().unwrap(), 1);
        assert_eq!(engine.num_of_incoming_match_requests().unwrap(), 1);
    }

    #[test]
    fn test_num_of_matches_excludes_self_and_repeats() {
        let mut store = InMemoryStore::new();
        // Only a self-match: not counted
        store.record_match_query(ExternalMatchQuery::new(
            patient("Q1", "a"),
            vec![MatchmakerResult::new(patient("Q1", "a"))],
        ));
        // Same query submitted twice: counted once
        for _ in 0..2 {
            store.record_match_query(ExternalMatchQuery::new(
                patient("Q2", "a"),
                vec![MatchmakerResult::new(patient("C1", "b"))],
            ));
        }
        // No match found: not counted
        store.record_match_query(ExternalMatchQuery::new(patient("Q3", "a"), Vec::new()));

        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);

        assert_eq!(engine.num_of_matches().unwrap(), 1);
        assert_eq!(engine.num_of_incoming_match_requests().unwrap(), 4);
    }

    #[test]
    fn test_percentage_of_genes_that_match_normalizes_ids() {
        let resolver = GeneResolver::from_table_text(
            "HGNC:5\tA1BG\tENSG00000121410\nHGNC:7\tA2M\tENSG00000175899\n",
        );

        let cohort = vec![
            with_genes(patient("P1", "a"), &["A1BG"]),
            with_genes(patient("P2", "b"), &["ENSG00000121410"]),
            with_genes(patient("P3", "c"), &["A2M"]),
            with_genes(patient("P4", "d"), &["UNKNOWNSYM"]),
        ];

        let mut store = InMemoryStore::new();
        store.record_match_query(ExternalMatchQuery::new(
            cohort[0].clone(),
            vec![MatchmakerResult::new(cohort[1].clone())],
        ));
        let engine = MetricsEngine::new(&store, &resolver);

        // Distinct genes: ENSG00000121410, ENSG00000175899, UNKNOWNSYM
        let pct = engine.percentage_of_genes_that_match(&cohort).unwrap();
        assert!((pct - 1.0 / 3.0).abs() < 1e-9);
    }

    /// A store whose backend is unreachable
    struct UnavailableStore;

    impl MatchStore for UnavailableStore {
        fn find_patients(&self, _filter: PatientFilter) -> Result<Vec<Patient>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        fn find_match_queries(
            &self,
            _filter: MatchQueryFilter,
        ) -> Result<Vec<ExternalMatchQuery>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    #[test]
    fn test_backend_errors_propagate() {
        let store = UnavailableStore;
        let resolver = GeneResolver::new();
        let engine = MetricsEngine::new(&store, &resolver);
        let cohort = vec![with_genes(patient("P1", "a"), &["G1"])];

        assert!(matches!(
            engine.number_of_cases_with_diagnosis(),
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(engine.num_of_matches(), Err(StoreError::Backend(_))));
        let err = engine.percentage_of_genes_that_match(&cohort).unwrap_err();
        assert_eq!(err.to_string(), "Store backend error: connection refused");

        // Cohort-only metrics never touch the store
        assert_eq!(engine.num_of_patients_in_system(&cohort), 1);
    }

    #[test]
    fn test_percentage_ignores_genes_outside_cohort() {
        let resolver = GeneResolver::new();
        let cohort = vec![
            with_genes(patient("P1", "a"), &["G1"]),
            with_genes(patient("P2", "b"), &["G2"]),
        ];

        let mut store = InMemoryStore::new();
        store.record_match_query(ExternalMatchQuery::new(
            patient("Q1", "x"),
            vec![
                MatchmakerResult::new(with_genes(patient("C1", "y"), &["G1"])),
                MatchmakerResult::new(with_genes(patient("C2", "y"), &["G9"])),
            ],
        ));
        let engine = MetricsEngine::new(&store, &resolver);

        let pct = engine.percentage_of_genes_that_match(&cohort).unwrap();
        assert!((pct - 0.5).abs() < 1e-9);
    }
}
