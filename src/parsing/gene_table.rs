use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GeneTableError {
    #[error("Failed to read gene table: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a gene table file into a symbol -> stable id map
///
/// Invalid UTF-8 is replaced rather than rejected, so a bad byte only spoils
/// the row it appears in.
///
/// # Errors
///
/// Returns `GeneTableError::Io` if the file cannot be read.
pub fn parse_gene_table_file(path: &Path) -> Result<HashMap<String, String>, GeneTableError> {
    let bytes = std::fs::read(path)?;
    Ok(parse_gene_table_text(&String::from_utf8_lossy(&bytes)))
}

/// Parse gene table text into a symbol -> stable id map.
///
/// Each row is whitespace-delimited with exactly three tokens:
///
/// ```text
/// HGNC:5  A1BG    ENSG00000121410
/// ```
///
/// Rows with any other token count are skipped. A later row for the same
/// symbol replaces an earlier one.
pub fn parse_gene_table_text(text: &str) -> HashMap<String, String> {
    let mut symbol_to_id = HashMap::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let [_source_id, symbol, stable_id] = tokens.as_slice() {
            symbol_to_id.insert((*symbol).to_string(), (*stable_id).to_string());
        } else {
            skipped += 1;
        }
    }

    debug!(
        entries = symbol_to_id.len(),
        skipped, "Parsed gene symbol table"
    );

    symbol_to_id
}
