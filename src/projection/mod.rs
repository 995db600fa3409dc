//! Matchmaker Exchange wire rendering.
//!
//! Records are rendered with every unpopulated field omitted, never as `""`,
//! `{}`, `[]` or `null`. The rule for each field is declared once, next to the
//! field, as a serde `skip_serializing_if` presence predicate:
//!
//! | Field kind | Present when |
//! |------------|--------------|
//! | string | non-empty |
//! | term (`type`, `contact`) | at least one non-empty value |
//! | list | at least one element |
//! | `variant` | any field populated |
//! | `zygosity` | not `0` and not `-1` |
//!
//! Key order is the struct field order, which follows the Matchmaker Exchange
//! schema (`id`, `label`, `contact`, `species`, `sex`, ...).
//!
//! Variant-level detail is additionally gated by a [`VariantSharing`] policy
//! supplied per request: under [`VariantSharing::Withhold`] every variant is
//! stripped before encoding.
//!
//! ## Example
//!
//! ```rust
//! use matchbox_core::core::{Contact, Patient, VariantSharing};
//! use matchbox_core::projection::WireProjection;
//!
//! let patient = Patient::new("P0001", Contact::new("Jane Doe"));
//! let json = patient.to_wire_json(VariantSharing::Share).unwrap();
//! assert_eq!(json, r#"{"id":"P0001","label":"","contact":{"name":"Jane Doe"}}"#);
//! ```

use crate::core::feature::GenomicFeature;
use crate::core::patient::Patient;
use crate::core::query::{ExternalMatchQuery, MatchmakerResult};
use crate::core::types::VariantSharing;

/// A record that can be rendered to the Matchmaker Exchange wire format
pub trait WireProjection: serde::Serialize + Clone {
    /// Copy with variant detail removed when `sharing` withholds it
    #[must_use]
    fn redacted(&self, sharing: VariantSharing) -> Self;

    /// Compact wire JSON
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if encoding fails.
    fn to_wire_json(&self, sharing: VariantSharing) -> Result<String, serde_json::Error> {
        if sharing.allows_sharing() {
            serde_json::to_string(self)
        } else {
            serde_json::to_string(&self.redacted(sharing))
        }
    }

    /// Indented wire JSON, same keys and order as [`WireProjection::to_wire_json`]
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if encoding fails.
    fn to_wire_json_pretty(&self, sharing: VariantSharing) -> Result<String, serde_json::Error> {
        if sharing.allows_sharing() {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string_pretty(&self.redacted(sharing))
        }
    }
}

impl WireProjection for GenomicFeature {
    fn redacted(&self, sharing: VariantSharing) -> Self {
        if sharing.allows_sharing() {
            self.clone()
        } else {
            self.without_variant()
        }
    }
}

impl WireProjection for Patient {
    fn redacted(&self, sharing: VariantSharing) -> Self {
        Self {
            genomic_features: self
                .genomic_features
                .iter()
                .map(|gf| gf.redacted(sharing))
                .collect(),
            ..self.clone()
        }
    }
}

impl WireProjection for MatchmakerResult {
    fn redacted(&self, sharing: VariantSharing) -> Self {
        Self {
            patient: self.patient.redacted(sharing),
            matched_genes: self.matched_genes.clone(),
        }
    }
}

impl WireProjection for ExternalMatchQuery {
    fn redacted(&self, sharing: VariantSharing) -> Self {
        Self {
            incoming_query: self.incoming_query.redacted(sharing),
            results: self.results.iter().map(|r| r.redacted(sharing)).collect(),
            ..self.clone()
        }
    }
}
