use clap::Args;

use crate::cli::{load_resolver, GeneTableArg, OutputFormat};

#[derive(Args)]
pub struct ResolveArgs {
    /// Gene symbols or stable ids to resolve
    #[arg(required = true)]
    pub genes: Vec<String>,

    #[command(flatten)]
    pub table: GeneTableArg,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if JSON output cannot be encoded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let resolver = load_resolver(args.table.gene_table.as_deref(), verbose);

    let rows: Vec<(&str, Option<String>)> = args
        .genes
        .iter()
        .map(|g| (g.as_str(), resolver.resolve_known(g)))
        .collect();

    match format {
        OutputFormat::Text => {
            for (gene, resolved) in &rows {
                match resolved {
                    Some(id) => println!("{gene}\t{id}"),
                    None => println!("{gene}\t{gene}\t(unresolved)"),
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows
                .iter()
                .map(|(gene, resolved)| {
                    serde_json::json!({
                        "query": gene,
                        "resolved": resolved.clone().unwrap_or_else(|| (*gene).to_string()),
                        "known": resolved.is_some(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("query\tresolved\tknown");
            for (gene, resolved) in &rows {
                println!(
                    "{gene}\t{}\t{}",
                    resolved.as_deref().unwrap_or(*gene),
                    resolved.is_some()
                );
            }
        }
    }

    Ok(())
}
