//! json-home CLI
//!
//! Command-line tool for building discovery documents from candidate files
//! and inspecting published ones.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use jsonhome::{
    merge_candidates, parse, to_json_string, DiscoveryError, Document, Profile, RawCandidate,
    ResourceLink,
};

#[derive(Parser)]
#[command(name = "jsonhome")]
#[command(about = "Build, merge, and inspect json-home discovery documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a discovery document from a candidates file
    Build(BuildArgs),
    /// Parse and summarize a published discovery document
    Inspect(InspectArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Path to a JSON array of raw candidate objects
    candidates: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the extended application/json profile (includes description
    /// hints) instead of the restricted application/json-home profile
    #[arg(long)]
    extended: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Path or URL of a discovery document
    source: String,

    /// Show only the entry for this relation-type URI
    #[arg(long)]
    rel: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

/// Check if a source string is a URL
fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load wire bytes from either a URL or a local path
fn load_bytes(source: &str) -> Result<Vec<u8>, DiscoveryError> {
    if is_url(source) {
        let response = reqwest::blocking::get(source).map_err(|e| DiscoveryError::Load {
            source_name: source.to_string(),
            reason: e.to_string(),
        })?;
        let bytes = response.bytes().map_err(|e| DiscoveryError::Load {
            source_name: source.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    } else {
        fs::read(source).map_err(|e| DiscoveryError::Load {
            source_name: source.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), DiscoveryError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("Wrote discovery document to {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_build(args: BuildArgs) -> Result<(), DiscoveryError> {
    let content = fs::read_to_string(&args.candidates)?;
    let candidates: Vec<RawCandidate> = serde_json::from_str(&content)?;
    let candidate_count = candidates.len();

    let doc = merge_candidates(candidates)?;

    let profile = if args.extended {
        Profile::Extended
    } else {
        Profile::Restricted
    };

    eprintln!(
        "Merged {} candidates into {} resources ({})",
        candidate_count,
        doc.len(),
        profile.media_type()
    );

    let output = to_json_string(&doc, profile, args.pretty)?;
    write_output(&output, args.output.as_ref())
}

fn summarize(doc: &Document) {
    for link in doc.iter() {
        let allow: Vec<&str> = link.hints().allow.iter().map(|m| m.as_str()).collect();
        match link {
            ResourceLink::Direct(direct) => {
                println!(
                    "{}  href={}  allow=[{}]",
                    direct.relation_type,
                    direct.href,
                    allow.join(",")
                );
            }
            ResourceLink::Templated(templated) => {
                println!(
                    "{}  href-template={}  vars={}  allow=[{}]",
                    templated.relation_type,
                    templated.href_template,
                    templated.href_vars.len(),
                    allow.join(",")
                );
            }
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<(), DiscoveryError> {
    let bytes = load_bytes(&args.source)?;
    let doc = parse(&bytes)?;

    eprintln!("Parsed {} resources from {}", doc.len(), args.source);

    match &args.rel {
        Some(rel) => {
            let link = doc.lookup(rel).ok_or_else(|| DiscoveryError::Load {
                source_name: args.source.clone(),
                reason: format!("no resource for relation type '{}'", rel),
            })?;
            let single = Document::build(vec![link.clone()])?;
            let output = to_json_string(&single, Profile::Extended, args.pretty)?;
            println!("{}", output);
        }
        None => summarize(&doc),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Inspect(args) => run_inspect(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
