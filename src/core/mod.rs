//! Core data types for Matchmaker Exchange patient records.
//!
//! This module provides the value types used throughout the library:
//!
//! - [`Patient`]: A submitted patient with contact, phenotypes and genomic features
//! - [`GenomicFeature`], [`Variant`]: Gene-level and variant-level findings
//! - [`PhenotypeFeature`]: An HPO-coded phenotype observation
//! - [`ExternalMatchQuery`], [`MatchmakerResult`]: The append-only match log
//! - [`Assembly`], [`Sex`], [`PatientId`]: Supporting metadata types
//!
//! ## Absent values
//!
//! Submissions are sparse. Absent strings are empty, absent lists are empty,
//! an absent variant is [`Variant::default`], and an absent zygosity is the
//! sentinel [`ZYGOSITY_NOT_PROVIDED`] (`-1`):
//!
//! | Field | Absent when |
//! |-------|-------------|
//! | string | empty |
//! | `variant` | every field empty/zero |
//! | `zygosity` | `-1` or `0` |
//! | `type` | both `id` and `label` empty |

pub mod feature;
pub mod patient;
pub mod query;
pub mod types;
pub mod variant;

pub use feature::{GeneRef, GenomicFeature, OntologyTerm, PhenotypeFeature};
pub use patient::{Contact, Disorder, Patient};
pub use query::{ExternalMatchQuery, MatchmakerResult};
pub use types::{Assembly, PatientId, Sex, VariantSharing, ZYGOSITY_NOT_PROVIDED};
pub use variant::Variant;
