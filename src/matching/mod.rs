//! Genomic feature matching.
//!
//! This module provides the matching functionality:
//!
//! - [`GenomicFeatureMatch`]: Independent predicates over one query/candidate feature pair
//! - [`MatchingEngine`]: Combines the predicates under a [`MatchPolicy`] across a cohort
//!
//! ## Predicates
//!
//! | Predicate | True when |
//! |-----------|-----------|
//! | `has_zygosity_match` | query zygosity supplied and equal |
//! | `has_type_match` | both SO ids non-empty and equal |
//! | `has_variant_match` | build, contig, start, end, ref and alt all equal |
//! | `has_same_variant_position` | both variants populated, same start, any contig |
//!
//! All predicates are total: missing data yields `false`, never an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use matchbox_core::{GeneResolver, MatchingEngine, Patient};
//!
//! let resolver = GeneResolver::new();
//! let engine = MatchingEngine::new(&resolver);
//!
//! let query: Patient = serde_json::from_str(r#"{"id": "Q1", "contact": {"name": "a"}}"#).unwrap();
//! let cohort: Vec<Patient> = Vec::new();
//! let record = engine.process_query(query, &cohort);
//! println!("match found: {}", record.match_found);
//! ```

pub mod engine;
pub mod feature;

pub use engine::{MatchPolicy, MatchingConfig, MatchingEngine};
pub use feature::GenomicFeatureMatch;
