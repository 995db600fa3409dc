use serde::{Deserialize, Serialize};

use crate::core::types::{default_zygosity, zygosity_is_absent, ZYGOSITY_NOT_PROVIDED};
use crate::core::variant::Variant;

/// Gene reference: a gene symbol, Ensembl gene id, or Entrez id
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneRef {
    #[serde(default)]
    pub id: String,
}

impl GeneRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// A coded term (`{"id": ..., "label": ...}`)
///
/// Used for the Sequence Ontology `type` of a genomic feature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OntologyTerm {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl OntologyTerm {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// At least one of `id` or `label` is non-empty
    pub fn is_present(&self) -> bool {
        !self.id.is_empty() || !self.label.is_empty()
    }

    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }
}

/// A gene (and optionally variant) level finding for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicFeature {
    #[serde(default, skip_serializing_if = "GeneRef::is_empty")]
    pub gene: GeneRef,

    #[serde(default, skip_serializing_if = "Variant::is_unpopulated")]
    pub variant: Variant,

    /// 1 = heterozygous/hemizygous, 2 = homozygous, -1 = not provided
    #[serde(default = "default_zygosity", skip_serializing_if = "zygosity_is_absent")]
    pub zygosity: i64,

    /// Sequence Ontology effect term
    #[serde(default, rename = "type", skip_serializing_if = "OntologyTerm::is_absent")]
    pub feature_type: OntologyTerm,
}

impl GenomicFeature {
    pub fn new(gene_id: impl Into<String>) -> Self {
        Self {
            gene: GeneRef::new(gene_id),
            variant: Variant::default(),
            zygosity: ZYGOSITY_NOT_PROVIDED,
            feature_type: OntologyTerm::default(),
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_zygosity(mut self, zygosity: i64) -> Self {
        self.zygosity = zygosity;
        self
    }

    pub fn with_type(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.feature_type = OntologyTerm::new(id, label);
        self
    }

    pub fn gene_id(&self) -> &str {
        &self.gene.id
    }

    /// Sequence Ontology id, empty when not supplied
    pub fn sequence_ontology_id(&self) -> &str {
        &self.feature_type.id
    }

    /// Copy of this feature with variant-level detail removed
    pub fn without_variant(&self) -> Self {
        Self {
            variant: Variant::default(),
            ..self.clone()
        }
    }
}

impl Default for GenomicFeature {
    fn default() -> Self {
        Self::new("")
    }
}

/// An HPO-coded phenotype observation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenotypeFeature {
    /// HPO term id, e.g. `HP:0000252`
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    /// "yes" or "no"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub observed: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub age_of_onset: String,
}

impl PhenotypeFeature {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_observed(mut self, observed: impl Into<String>) -> Self {
        self.observed = observed.into();
        self
    }
}
