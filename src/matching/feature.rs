use crate::core::feature::GenomicFeature;
use crate::core::types::ZYGOSITY_NOT_PROVIDED;

/// A query feature paired with a candidate ("node") feature for one matching pass
///
/// Holds borrowed references only; it is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomicFeatureMatch<'a> {
    query: &'a GenomicFeature,
    node: &'a GenomicFeature,
}

impl<'a> GenomicFeatureMatch<'a> {
    pub fn new(query: &'a GenomicFeature, node: &'a GenomicFeature) -> Self {
        Self { query, node }
    }

    pub fn query_feature(&self) -> &'a GenomicFeature {
        self.query
    }

    pub fn node_feature(&self) -> &'a GenomicFeature {
        self.node
    }

    /// Gene id of the query side, empty when not supplied
    pub fn gene_identifier(&self) -> &'a str {
        &self.query.gene.id
    }

    /// Sequence Ontology id of the query side, empty when not supplied
    pub fn query_sequence_ontology_id(&self) -> &'a str {
        &self.query.feature_type.id
    }

    /// Same zygosity on both sides, and the query actually supplied one
    pub fn has_zygosity_match(&self) -> bool {
        self.query.zygosity != ZYGOSITY_NOT_PROVIDED && self.query.zygosity == self.node.zygosity
    }

    /// Same Sequence Ontology id on both sides.
    ///
    /// Two features without a type never match each other.
    pub fn has_type_match(&self) -> bool {
        let query_so = self.query.sequence_ontology_id();
        !query_so.is_empty() && query_so == self.node.sequence_ontology_id()
    }

    /// Build, contig, coordinates and both allele strings all equal.
    ///
    /// Unpopulated variants are never matchable.
    pub fn has_variant_match(&self) -> bool {
        let q = &self.query.variant;
        let n = &self.node.variant;

        if q.is_unpopulated() || n.is_unpopulated() {
            return false;
        }

        q.alternate_bases == n.alternate_bases
            && q.reference_bases == n.reference_bases
            && q.assembly == n.assembly
            && q.reference_name == n.reference_name
            && q.start == n.start
            && q.end == n.end
    }

    /// Same start coordinate, ignoring contig and build.
    ///
    /// Unpopulated variants have no position and never match.
    pub fn has_same_variant_position(&self) -> bool {
        let q = &self.query.variant;
        let n = &self.node.variant;

        q.is_populated() && n.is_populated() && q.start == n.start
    }
}
