//! # matchbox-core
//!
//! A library for matching rare-disease patients across Matchmaker Exchange
//! submissions and reporting on the resulting cohort.
//!
//! Institutions submit patients described by phenotype terms (HPO) and genomic
//! findings (gene, variant, zygosity, Sequence Ontology effect). A new
//! submission is compared feature-by-feature against every stored patient; two
//! patients match when they implicate the same gene and, depending on the
//! policy, the same variant or the same predicted effect. Every request is
//! appended to a log, and the metrics engine summarizes the cohort and the log
//! for operational reporting.
//!
//! Matching is literal field equality. There is no statistical ranking and no
//! phenotype-similarity scoring.
//!
//! ## Features
//!
//! - **Feature predicates**: Zygosity, Sequence Ontology type, exact variant and same-position checks
//! - **Gene normalization**: Gene symbols and Ensembl ids compared as the same gene
//! - **Cohort metrics**: Counts, per-case means, submitter diversity and match rates
//! - **Selective wire JSON**: Unpopulated fields never emitted, variant sharing gated per request
//!
//! ## Example
//!
//! ```rust
//! use matchbox_core::{GeneResolver, InMemoryStore, MatchingEngine, MetricsEngine, MatchStore};
//! use matchbox_core::core::{Contact, GenomicFeature, Patient};
//!
//! let resolver = GeneResolver::from_table_text("HGNC:3423\tEFTUD2\tENSG00000108883\n");
//!
//! let mut store = InMemoryStore::new();
//! store
//!     .insert_patient(
//!         Patient::new("C1", Contact::new("Node A"))
//!             .with_genomic_features(vec![GenomicFeature::new("ENSG00000108883")
//!                 .with_type("SO:0001587", "STOPGAIN")]),
//!     )
//!     .unwrap();
//!
//! let query = Patient::new("Q1", Contact::new("Node B"))
//!     .with_genomic_features(vec![GenomicFeature::new("EFTUD2").with_type("SO:0001587", "STOPGAIN")]);
//!
//! let engine = MatchingEngine::new(&resolver);
//! let cohort = store.find_all_patients().unwrap();
//! let record = engine.process_query(query, &cohort);
//! assert!(record.match_found);
//! store.record_match_query(record);
//!
//! let metrics = MetricsEngine::new(&store, &resolver);
//! assert_eq!(metrics.num_of_matches().unwrap(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Patient, feature, variant and match-log types
//! - [`matching`]: Feature predicates and the matching engine
//! - [`catalog`]: Gene identifier resolution
//! - [`metrics`]: Cohort and match-log statistics
//! - [`projection`]: Matchmaker Exchange wire rendering
//! - [`store`]: Repository interface and in-memory implementation
//! - [`parsing`]: Gene table parsing
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod metrics;
pub mod parsing;
pub mod projection;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::genes::GeneResolver;
pub use crate::core::patient::Patient;
pub use crate::core::query::{ExternalMatchQuery, MatchmakerResult};
pub use matching::engine::{MatchPolicy, MatchingConfig, MatchingEngine};
pub use matching::feature::GenomicFeatureMatch;
pub use metrics::{MetricsEngine, MetricsReport};
pub use projection::WireProjection;
pub use store::{InMemoryStore, MatchStore, StoreError};
