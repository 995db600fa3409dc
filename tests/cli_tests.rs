//! End-to-end tests for the `matchbox` binary
//!
//! Each test writes a store (and optionally a gene table and query patient)
//! into a temporary directory and runs the binary against it.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STORE: &str = r#"{
  "version": "1.0.0",
  "patients": [
    {
      "id": "C1",
      "label": "candidate one",
      "contact": {"name": "Alice", "institution": "Node A", "href": "mailto:alice@example.org"},
      "disorders": [{"id": "MIM:154700"}],
      "features": [{"id": "HP:0000252"}],
      "genomicFeatures": [
        {
          "gene": {"id": "ENSG00000108883"},
          "variant": {"assembly": "GRCh37", "referenceName": "17", "start": 42929131, "end": 42929131, "referenceBases": "C", "alternateBases": "T"},
          "zygosity": 1,
          "type": {"id": "SO:0001587", "label": "STOPGAIN"}
        }
      ]
    },
    {
      "id": "C2",
      "contact": {"name": "Bob"},
      "features": [{"id": "HP:0000252"}, {"id": "HP:0001250"}],
      "genomicFeatures": [{"gene": {"id": "NGLY1"}}]
    }
  ],
  "matchQueries": []
}"#;

const QUERY: &str = r#"{
  "id": "Q1",
  "contact": {"name": "Carol", "institution": "Node B"},
  "genomicFeatures": [
    {
      "gene": {"id": "EFTUD2"},
      "variant": {"assembly": "GRCh37", "referenceName": "17", "start": 42929131, "end": 42929131, "referenceBases": "C", "alternateBases": "T"}
    }
  ]
}"#;

const GENE_TABLE: &str = "HGNC:3423\tEFTUD2\tENSG00000108883\nHGNC:17646\tNGLY1\tENSG00000151092\n";

struct Fixture {
    _dir: TempDir,
    store: PathBuf,
    query: PathBuf,
    genes: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = write(dir.path(), "store.json", STORE);
    let query = write(dir.path(), "query.json", QUERY);
    let genes = write(dir.path(), "genes.txt", GENE_TABLE);
    Fixture {
        _dir: dir,
        store,
        query,
        genes,
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn matchbox() -> Command {
    Command::cargo_bin("matchbox").expect("binary should build")
}

#[test]
fn test_match_resolves_symbol_against_ensembl_id() {
    let f = fixture();

    matchbox()
        .args(["match", "--store"])
        .arg(&f.store)
        .arg("--query")
        .arg(&f.query)
        .arg("--gene-table")
        .arg(&f.genes)
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 C1"))
        .stdout(predicate::str::contains("Matched genes: EFTUD2"))
        .stdout(predicate::str::contains("C2").not());
}

#[test]
fn test_match_without_gene_table_finds_nothing() {
    let f = fixture();

    matchbox()
        .args(["match", "--store"])
        .arg(&f.store)
        .arg("--query")
        .arg(&f.query)
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching patients found."));
}

#[test]
fn test_match_json_withholds_variants() {
    let f = fixture();

    let output = matchbox()
        .args(["--format", "json", "match", "--no-share-variants", "--store"])
        .arg(&f.store)
        .arg("--query")
        .arg(&f.query)
        .arg("--gene-table")
        .arg(&f.genes)
        .output()
        .expect("failed to run matchbox");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["matchFound"], true);
    assert_eq!(value["results"][0]["patient"]["id"], "C1");
    assert!(value["results"][0]["patient"]["genomicFeatures"][0]
        .get("variant")
        .is_none());
    assert_eq!(
        value["results"][0]["patient"]["genomicFeatures"][0]["zygosity"],
        1
    );
    assert!(value["incomingQuery"].get("species").is_none());
}

#[test]
fn test_match_record_appends_to_log() {
    let f = fixture();

    matchbox()
        .args(["match", "--record", "--origin", "node-b.example.org", "--store"])
        .arg(&f.store)
        .arg("--query")
        .arg(&f.query)
        .arg("--gene-table")
        .arg(&f.genes)
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&f.store).unwrap()).unwrap();
    let log = saved["matchQueries"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["incomingQuery"]["id"], "Q1");
    assert_eq!(log[0]["matchFound"], true);
    assert_eq!(log[0]["requestOriginHostname"], "node-b.example.org");

    matchbox()
        .args(["--format", "tsv", "metrics", "--store"])
        .arg(&f.store)
        .arg("--gene-table")
        .arg(&f.genes)
        .assert()
        .success()
        .stdout(predicate::str::contains("number_of_incoming_match_requests\t1"))
        .stdout(predicate::str::contains("number_of_matches\t1"))
        .stdout(predicate::str::contains("percentage_of_genes_that_match\t0.5000"));
}

#[test]
fn test_match_rejects_invalid_submission() {
    let f = fixture();
    let empty_query = write(
        f.store.parent().unwrap(),
        "empty.json",
        r#"{"id": "Q2", "contact": {"name": "Carol"}}"#,
    );

    matchbox()
        .args(["match", "--store"])
        .arg(&f.store)
        .arg("--query")
        .arg(&empty_query)
        .assert()
        .failure()
        .stderr(predicate::str::contains("features"));
}

#[test]
fn test_match_reads_query_from_stdin() {
    let f = fixture();

    matchbox()
        .args(["match", "--query", "-", "--store"])
        .arg(&f.store)
        .arg("--gene-table")
        .arg(&f.genes)
        .write_stdin(QUERY)
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 C1"));
}

#[test]
fn test_metrics_text_report() {
    let f = fixture();

    matchbox()
        .args(["metrics", "--store"])
        .arg(&f.store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cases: 2"))
        .stdout(predicate::str::contains("Submitters: 2"))
        .stdout(predicate::str::contains("Cases with diagnosis: 1"))
        .stdout(predicate::str::contains("Unique phenotypes: 2"))
        .stdout(predicate::str::contains("Mean variants per case: 0.50"))
        .stdout(predicate::str::contains("HP:0000252: 2"));
}

#[test]
fn test_metrics_public_json_omits_counts() {
    let f = fixture();

    let output = matchbox()
        .args(["--format", "json", "metrics", "--public", "--store"])
        .arg(&f.store)
        .output()
        .expect("failed to run matchbox");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["numberOfCases"], 2);
    assert_eq!(value["numberOfSubmitters"], 2);
    assert!(value.get("geneCounts").is_none());
    assert!(value.get("phenotypeCounts").is_none());
}

#[test]
fn test_metrics_phenotype_only_cohort_reports_no_gene_fraction() {
    let dir = TempDir::new().unwrap();
    let store = write(
        dir.path(),
        "store.json",
        r#"{"version": "1.0.0", "patients": [
            {"id": "P1", "contact": {"name": "Alice"}, "features": [{"id": "HP:0000252"}]}
        ]}"#,
    );

    matchbox()
        .args(["metrics", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Genes that matched: n/a"))
        .stdout(predicate::str::contains("NaN").not());

    matchbox()
        .args(["--format", "tsv", "metrics", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("percentage_of_genes_that_match\tn/a"))
        .stdout(predicate::str::contains("mean_number_of_genes_per_case\t0.0000"));

    let output = matchbox()
        .args(["--format", "json", "metrics", "--store"])
        .arg(&store)
        .output()
        .expect("failed to run matchbox");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("null"));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(value.get("percentageOfGenesThatMatch").is_none());
    assert_eq!(value["numberOfUniqueGenes"], 0);
}

#[test]
fn test_metrics_on_empty_store_fails() {
    let dir = TempDir::new().unwrap();
    let store = write(dir.path(), "store.json", r#"{"version": "1.0.0"}"#);

    matchbox()
        .args(["metrics", "--store"])
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no patients"));
}

#[test]
fn test_resolve() {
    let f = fixture();

    matchbox()
        .args(["resolve", "EFTUD2", "ENSG00000121410", "UNKNOWNSYM", "--gene-table"])
        .arg(&f.genes)
        .assert()
        .success()
        .stdout(predicate::str::contains("EFTUD2\tENSG00000108883"))
        .stdout(predicate::str::contains("ENSG00000121410\tENSG00000121410"))
        .stdout(predicate::str::contains("UNKNOWNSYM\tUNKNOWNSYM\t(unresolved)"));
}

#[test]
fn test_resolve_with_missing_table_passes_through() {
    matchbox()
        .args([
            "resolve",
            "A1BG",
            "--gene-table",
            "/nonexistent/gene_table.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("A1BG\tA1BG\t(unresolved)"));
}
