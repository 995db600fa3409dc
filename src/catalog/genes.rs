use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::parsing::gene_table::{parse_gene_table_file, parse_gene_table_text};

/// Prefix shared by all Ensembl stable ids (`ENSG...`, `ENST...`, ...)
pub const ENSEMBL_PREFIX: &str = "ENS";

/// Whether a gene reference is already an Ensembl stable id
#[must_use]
pub fn is_ensembl_gene_id(id: &str) -> bool {
    id.starts_with(ENSEMBL_PREFIX)
}

/// Normalizes gene references (symbols or stable ids) to stable gene ids
///
/// Built once at startup and passed by reference to whatever needs it. An
/// empty resolver passes every reference through unchanged.
#[derive(Debug, Clone, Default)]
pub struct GeneResolver {
    symbol_to_id: HashMap<String, String>,
}

impl GeneResolver {
    /// Create a pass-through resolver with no lookup table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(symbol_to_id: HashMap<String, String>) -> Self {
        Self { symbol_to_id }
    }

    pub fn from_table_text(text: &str) -> Self {
        Self::from_map(parse_gene_table_text(text))
    }

    /// Load the lookup table from a file.
    ///
    /// A read failure is logged and yields a pass-through resolver; it never
    /// aborts the caller.
    pub fn load_from_file(path: &Path) -> Self {
        match parse_gene_table_file(path) {
            Ok(symbol_to_id) => {
                info!(
                    path = %path.display(),
                    entries = symbol_to_id.len(),
                    "Loaded gene symbol table"
                );
                Self::from_map(symbol_to_id)
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Error reading gene symbol table, resolving gene ids as given"
                );
                Self::new()
            }
        }
    }

    /// Resolve to a stable id, or `None` if the symbol is not in the table
    pub fn resolve_known(&self, gene_ref: &str) -> Option<String> {
        if is_ensembl_gene_id(gene_ref) {
            return Some(gene_ref.to_string());
        }
        self.symbol_to_id.get(gene_ref).cloned()
    }

    /// Resolve to a stable id, falling back to the input unchanged
    pub fn resolve(&self, gene_ref: &str) -> String {
        self.resolve_known(gene_ref)
            .unwrap_or_else(|| gene_ref.to_string())
    }

    /// Both references resolve to the same gene (empty references never match)
    pub fn same_gene(&self, a: &str, b: &str) -> bool {
        !a.is_empty() && !b.is_empty() && (a == b || self.resolve(a) == self.resolve(b))
    }

    /// Number of symbols in the lookup table
    pub fn len(&self) -> usize {
        self.symbol_to_id.len()
    }

    /// True when running in pass-through mode
    pub fn is_empty(&self) -> bool {
        self.symbol_to_id.is_empty()
    }
}
