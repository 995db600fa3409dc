//! Parsers for auxiliary input files.
//!
//! - **Gene symbol tables**: three-column `<source-id> <symbol> <stable-id>`
//!   rows mapping gene symbols to Ensembl gene ids
//!
//! ## Example
//!
//! ```rust
//! use matchbox_core::parsing::gene_table::parse_gene_table_text;
//!
//! let map = parse_gene_table_text("HGNC:5\tA1BG\tENSG00000121410\n");
//! assert_eq!(map["A1BG"], "ENSG00000121410");
//! ```

pub mod gene_table;
