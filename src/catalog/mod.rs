//! Gene identifier lookup.
//!
//! Submitters reference genes by symbol (`A1BG`), Ensembl id
//! (`ENSG00000121410`) or other namespaces. Before genes from different
//! submissions are compared they are normalized to a stable id through a
//! [`GeneResolver`] built once from a three-column table:
//!
//! ```text
//! HGNC:5  A1BG    ENSG00000121410
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use matchbox_core::GeneResolver;
//! use std::path::Path;
//!
//! let resolver = GeneResolver::load_from_file(Path::new("config/gene_symbol_to_ensembl_id_map.txt"));
//! assert_eq!(resolver.resolve("ENSG00000121410"), "ENSG00000121410");
//! ```

pub mod genes;

pub use genes::{is_ensembl_gene_id, GeneResolver};
