use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_resolver, GeneTableArg, OutputFormat};
use crate::metrics::engine::MetricsEngine;
use crate::metrics::report::MetricsReport;
use crate::store::{InMemoryStore, MatchStore};

#[derive(Args)]
pub struct MetricsArgs {
    /// Store file (JSON) holding the cohort and the match log
    #[arg(long, required = true)]
    pub store: PathBuf,

    #[command(flatten)]
    pub genes: GeneTableArg,

    /// Omit per-gene and per-phenotype counts
    #[arg(long)]
    pub public: bool,
}

/// Execute metrics subcommand
///
/// # Errors
///
/// Returns an error if the store cannot be read or holds no patients.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MetricsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = InMemoryStore::load_from_file(&args.store)?;
    let patients = store.find_all_patients()?;

    // Means are undefined without patients; say so instead of printing NaN
    if patients.is_empty() {
        anyhow::bail!(
            "Store '{}' contains no patients, metrics are undefined",
            args.store.display()
        );
    }

    if verbose {
        eprintln!(
            "Loaded {} patients and {} match requests",
            patients.len(),
            store.match_query_count()
        );
    }

    let resolver = load_resolver(args.genes.gene_table.as_deref(), verbose);
    let engine = MetricsEngine::new(&store, &resolver);

    let mut report = MetricsReport::collect(&engine, &patients)?;
    if args.public {
        report = report.to_public();
    }

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &MetricsReport) {
    println!("Matchmaker Metrics");
    println!("{}", "=".repeat(60));

    println!("\nCohort:");
    println!("  Cases: {}", report.number_of_cases);
    println!("  Submitters: {}", report.number_of_submitters);
    println!("  Cases with diagnosis: {}", report.number_of_cases_with_diagnosis);
    println!("  Unique genes: {}", report.number_of_unique_genes);
    println!("  Unique phenotypes: {}", report.number_of_unique_phenotypes);
    println!(
        "  Mean genes per case: {}",
        format_ratio(report.mean_number_of_genes_per_case, 2)
    );
    println!(
        "  Mean phenotypes per case: {}",
        format_ratio(report.mean_number_of_phenotypes_per_case, 2)
    );
    println!(
        "  Mean variants per case: {}",
        format_ratio(report.mean_number_of_variants_per_case, 2)
    );

    println!("\nMatching:");
    println!(
        "  Incoming match requests: {}",
        report.number_of_incoming_match_requests
    );
    println!("  Queries with matches: {}", report.number_of_matches);
    match report.percentage_of_genes_that_match {
        Some(fraction) => println!("  Genes that matched: {:.2}%", fraction * 100.0),
        None => println!("  Genes that matched: n/a (no genes in cohort)"),
    }

    if let Some(genes) = &report.gene_counts {
        println!("\nGene counts:");
        for (gene, count) in genes {
            println!("  {gene}: {count}");
        }
    }

    if let Some(phenotypes) = &report.phenotype_counts {
        println!("\nPhenotype counts:");
        for (term, count) in phenotypes {
            println!("  {term}: {count}");
        }
    }
}

fn print_tsv_report(report: &MetricsReport) {
    println!("metric\tvalue");
    println!("number_of_cases\t{}", report.number_of_cases);
    println!("number_of_submitters\t{}", report.number_of_submitters);
    println!(
        "number_of_cases_with_diagnosis\t{}",
        report.number_of_cases_with_diagnosis
    );
    println!(
        "number_of_incoming_match_requests\t{}",
        report.number_of_incoming_match_requests
    );
    println!("number_of_matches\t{}", report.number_of_matches);
    println!(
        "number_of_unique_phenotypes\t{}",
        report.number_of_unique_phenotypes
    );
    println!("number_of_unique_genes\t{}", report.number_of_unique_genes);
    println!(
        "mean_number_of_genes_per_case\t{}",
        format_ratio(report.mean_number_of_genes_per_case, 4)
    );
    println!(
        "mean_number_of_phenotypes_per_case\t{}",
        format_ratio(report.mean_number_of_phenotypes_per_case, 4)
    );
    println!(
        "mean_number_of_variants_per_case\t{}",
        format_ratio(report.mean_number_of_variants_per_case, 4)
    );
    println!(
        "percentage_of_genes_that_match\t{}",
        format_ratio(report.percentage_of_genes_that_match, 4)
    );
}

/// Render an optional mean or ratio, or "n/a" when undefined
fn format_ratio(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(
        || "n/a".to_string(),
        |v| format!("{v:.precision$}"),
    )
}
