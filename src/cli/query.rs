use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{load_resolver, GeneTableArg, OutputFormat};
use crate::core::patient::Patient;
use crate::core::query::ExternalMatchQuery;
use crate::core::types::VariantSharing;
use crate::matching::engine::{MatchPolicy, MatchingConfig, MatchingEngine};
use crate::projection::WireProjection;
use crate::store::{InMemoryStore, MatchStore};
use crate::utils::validation::validate_submission;

#[derive(Args)]
pub struct MatchArgs {
    /// Store file (JSON) holding the cohort and the match log
    #[arg(long, required = true)]
    pub store: PathBuf,

    /// Query patient (Matchmaker Exchange JSON). Use '-' for stdin
    #[arg(long, required = true)]
    pub query: PathBuf,

    #[command(flatten)]
    pub genes: GeneTableArg,

    /// Which feature comparisons must agree for two patients to match
    #[arg(long, value_enum, default_value = "gene-and-variant-or-type")]
    pub policy: MatchPolicy,

    /// Also require the query's zygosity to be supplied and equal
    #[arg(long)]
    pub require_zygosity: bool,

    /// Do not include variant-level data in the output
    #[arg(long)]
    pub no_share_variants: bool,

    /// Hostname the request came from, kept in the match log
    #[arg(long)]
    pub origin: Option<String>,

    /// Append the request and its results to the store's match log
    #[arg(long)]
    pub record: bool,
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if the query or store cannot be read, the query is not a
/// valid submission, or the store cannot be written back.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let query = read_query(&args.query)?;
    validate_submission(&query)
        .map_err(|e| anyhow::anyhow!("Invalid query patient '{}': {e}", query.id))?;

    let mut store = InMemoryStore::load_from_file(&args.store)?;
    let cohort = store.find_all_patients()?;

    if verbose {
        eprintln!(
            "Matching {} genomic features against {} patients",
            query.genomic_features.len(),
            cohort.len()
        );
    }

    let resolver = load_resolver(args.genes.gene_table.as_deref(), verbose);
    let config = MatchingConfig {
        policy: args.policy,
        require_zygosity: args.require_zygosity,
    };
    let engine = MatchingEngine::with_config(&resolver, config);

    let mut record = engine.process_query(query, &cohort);
    if let Some(origin) = &args.origin {
        record = record.with_origin(origin);
    }

    let sharing = VariantSharing::from_flag(!args.no_share_variants);
    match format {
        OutputFormat::Text => print_text_results(&record),
        OutputFormat::Json => println!("{}", record.to_wire_json_pretty(sharing)?),
        OutputFormat::Tsv => print_tsv_results(&record),
    }

    if args.record {
        store.record_match_query(record);
        store.save_to_file(&args.store)?;
        if verbose {
            eprintln!(
                "Recorded match request ({} in log)",
                store.match_query_count()
            );
        }
    }

    Ok(())
}

fn read_query(path: &Path) -> anyhow::Result<Patient> {
    use std::io::{self, Read};

    let content = if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(serde_json::from_str(&content)?)
}

fn print_text_results(record: &ExternalMatchQuery) {
    println!("Match Results for {}", record.incoming_query.id);
    println!("{}", "=".repeat(60));

    if !record.match_found {
        println!("\nNo matching patients found.");
        return;
    }

    for (i, result) in record.results.iter().enumerate() {
        let contact = &result.patient.contact;
        println!("\n#{} {}", i + 1, result.patient.id);
        if !result.patient.label.is_empty() {
            println!("  Label: {}", result.patient.label);
        }
        println!("  Contact: {}", contact.name);
        if !contact.institution.is_empty() {
            println!("  Institution: {}", contact.institution);
        }
        if !contact.href.is_empty() {
            println!("  Href: {}", contact.href);
        }
        println!("  Matched genes: {}", result.matched_genes.join(", "));
    }
}

fn print_tsv_results(record: &ExternalMatchQuery) {
    println!("query_id\tcandidate_id\tcontact\tinstitution\tmatched_genes");
    for result in &record.results {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.incoming_query.id,
            result.patient.id,
            result.patient.contact.name,
            result.patient.contact.institution,
            result.matched_genes.join(","),
        );
    }
}
