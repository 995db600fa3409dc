//! Command-line interface for matchbox.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Match a query patient against the stored cohort
//! - **metrics**: Report cohort and match-log statistics
//! - **resolve**: Normalize gene symbols to stable gene ids
//!
//! ## Usage
//!
//! ```text
//! # Match a submission against the cohort and append it to the log
//! matchbox match --store store.json --query patient.json --record
//!
//! # Withhold variant-level detail from the output
//! matchbox match --store store.json --query patient.json --no-share-variants
//!
//! # Public metrics as JSON
//! matchbox metrics --store store.json --public --format json
//!
//! # Resolve gene symbols
//! matchbox resolve A1BG EFTUD2 --gene-table config/gene_symbol_to_ensembl_id_map.txt
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::genes::GeneResolver;

pub mod metrics;
pub mod query;
pub mod resolve;

#[derive(Parser)]
#[command(name = "matchbox")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Match rare-disease patients and report matchmaker statistics")]
#[command(
    long_about = "matchbox matches Matchmaker Exchange patient submissions against a stored cohort.\n\nTwo patients match when they share a gene (symbols and Ensembl ids are normalized) and, depending on the policy, the same variant or the same Sequence Ontology effect. Every request is kept in an append-only log that the metrics command summarizes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a query patient against the stored cohort
    Match(query::MatchArgs),

    /// Report cohort and match statistics
    Metrics(metrics::MetricsArgs),

    /// Resolve gene symbols to stable gene ids
    Resolve(resolve::ResolveArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Build the gene resolver from an optional table path
///
/// Without a table every gene reference resolves to itself.
pub(crate) fn load_resolver(path: Option<&Path>, verbose: bool) -> GeneResolver {
    match path {
        Some(path) => {
            let resolver = GeneResolver::load_from_file(path);
            if verbose {
                eprintln!("Loaded {} gene symbols", resolver.len());
            }
            resolver
        }
        None => GeneResolver::new(),
    }
}

#[derive(clap::Args)]
pub struct GeneTableArg {
    /// Gene symbol table: whitespace-delimited `<source-id> <symbol> <stable-id>` rows
    #[arg(long)]
    pub gene_table: Option<PathBuf>,
}
