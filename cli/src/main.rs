//! catu CLI — driving adapter for the claim matching engine.
//!
//! Subcommands:
//! - `eval <claim> <uri> [--trace] [--json]` — evaluate a claim file against a URI
//! - `check <claim> [--labeled]` — validate a claim file loads without errors
//! - `info` — print the URI components and the standard match types
//!
//! Claim files are name-keyed documents, JSON or YAML by extension:
//!
//! ```yaml
//! scheme:
//!   exact-match: https
//! path:
//!   prefix-match: /vod/
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catu::{Claim, UriComponent, Url};
use catu_catalog::{MatchKind, StandardCatalog};
use clap::{Parser, Subcommand};
use tracing::debug;

/// Evaluate CATU claims against request URIs
#[derive(Parser)]
#[command(name = "catu")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a claim file against a URI
    Eval {
        /// Claim document (.json, .yaml or .yml)
        claim: PathBuf,

        /// Request URI to check
        uri: String,

        /// Print each evaluated component
        #[arg(long)]
        trace: bool,

        /// Print the trace as JSON (implies --trace)
        #[arg(long)]
        json: bool,
    },

    /// Validate that a claim file loads without errors
    Check {
        /// Claim document (.json, .yaml or .yml)
        claim: PathBuf,

        /// Print the claim with wire labels
        #[arg(long)]
        labeled: bool,
    },

    /// Print URI components and standard match types
    Info,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = StandardCatalog::new();
    match cli.command {
        Command::Eval {
            claim,
            uri,
            trace,
            json,
        } => cmd_eval(&claim, &uri, trace || json, json, &catalog).await,
        Command::Check { claim, labeled } => cmd_check(&claim, labeled, &catalog),
        Command::Info => {
            cmd_info();
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

async fn cmd_eval(
    claim_path: &Path,
    uri: &str,
    trace: bool,
    json: bool,
    catalog: &StandardCatalog,
) -> Result<()> {
    let claim = load_claim(claim_path, catalog)?;
    let uri = Url::parse(uri).with_context(|| format!("invalid URI \"{uri}\""))?;
    debug!(components = claim.len(), %uri, "evaluating claim");

    if !trace {
        let matched = claim
            .matches(&uri, catalog)
            .await
            .context("evaluation failed")?;
        println!("{}", if matched { "match" } else { "no match" });
        return Ok(());
    }

    let trace = claim
        .evaluate_with_trace(&uri, catalog)
        .await
        .context("evaluation failed")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        print!("{trace}");
    }
    Ok(())
}

fn cmd_check(claim_path: &Path, labeled: bool, catalog: &StandardCatalog) -> Result<()> {
    let claim = load_claim(claim_path, catalog)?;

    if labeled {
        println!("{}", serde_json::to_string_pretty(&claim.to_labeled())?);
    } else {
        println!("Claim valid ({} components)", claim.len());
    }
    Ok(())
}

fn cmd_info() {
    println!("URI components:");
    for component in UriComponent::ALL {
        println!("  {:>2}  {component}", component.label());
    }

    println!("\nMatch types:");
    for kind in MatchKind::ALL {
        let shape = if kind.takes_sequence() {
            "sequence"
        } else {
            "string"
        };
        println!("  {:>2}  {kind} ({shape})", kind.label());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Claim loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_claim(path: &Path, catalog: &StandardCatalog) -> Result<Claim> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let document = parse_document(&content, is_json)?;
    Claim::from_dict(&document, catalog)
        .with_context(|| format!("invalid claim in \"{}\"", path.display()))
}

fn parse_document(content: &str, is_json: bool) -> Result<serde_json::Value> {
    if is_json {
        serde_json::from_str(content).context("JSON parse error")
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).context("YAML parse error")
    }
}
