#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use toolreg_aggregate::{aggregate_registry, AggregateOptions, TimestampPolicy};
use toolreg_core::ExitCode;
use toolreg_model::Snapshot;
use toolreg_validate::{load_taxonomy_store, validate_registry};

#[derive(Parser)]
#[command(name = "toolreg")]
#[command(about = "Tools registry pipeline: validate category files, build the snapshot")]
struct Cli {
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every category file against the taxonomy; exits 3 on violations.
    Validate {
        #[arg(long)]
        root: PathBuf,
    },
    /// Merge all categories into the versioned snapshot and hash sidecar.
    Aggregate {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Skip the validation gate. Local inspection only.
        #[arg(long, default_value_t = false)]
        allow_invalid: bool,
        /// Stamp generatedAt as 0 for reproducible fixture builds.
        #[arg(long, default_value_t = false)]
        deterministic_timestamp: bool,
    },
    /// Recompute a snapshot's integrity hash and compare it against the
    /// embedded value and, when given, the sidecar digest.
    Verify {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        hash: Option<PathBuf>,
    },
}

fn main() -> ProcessExitCode {
    match run() {
        Ok(code) => ProcessExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(ExitCode::Internal as u8)
        }
    }
}

fn run() -> Result<ExitCode, String> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { root } => validate(root),
        Commands::Aggregate {
            root,
            out,
            allow_invalid,
            deterministic_timestamp,
        } => aggregate(
            root,
            out,
            allow_invalid,
            deterministic_timestamp,
            cli.verbose,
        ),
        Commands::Verify { snapshot, hash } => verify(snapshot, hash),
    }
}

fn validate(root: PathBuf) -> Result<ExitCode, String> {
    let store = load_taxonomy_store(&root).map_err(|e| e.to_string())?;
    let report = validate_registry(&store, &root).map_err(|e| e.to_string())?;
    if report.is_clean() {
        println!(
            "validation: OK ({} categories checked)",
            store.config.categories.len()
        );
        return Ok(ExitCode::Success);
    }
    for violation in &report.violations {
        eprintln!("{violation}");
    }
    println!("validation: FAILED ({} violations)", report.violations.len());
    Ok(ExitCode::Validation)
}

fn aggregate(
    root: PathBuf,
    out: Option<PathBuf>,
    allow_invalid: bool,
    deterministic_timestamp: bool,
    verbose: u8,
) -> Result<ExitCode, String> {
    // Gate here rather than inside the library call so a dirty registry
    // exits with the validation code, not the internal one.
    if !allow_invalid {
        let store = load_taxonomy_store(&root).map_err(|e| e.to_string())?;
        let report = validate_registry(&store, &root).map_err(|e| e.to_string())?;
        if !report.is_clean() {
            for violation in &report.violations {
                eprintln!("{violation}");
            }
            println!(
                "aggregate: refused, registry failed validation ({} violations)",
                report.violations.len()
            );
            return Ok(ExitCode::Validation);
        }
    }

    let out_dir = out.unwrap_or_else(|| root.join("snapshot"));
    let result = aggregate_registry(&AggregateOptions {
        root,
        out_dir,
        enforce_gate: false,
        timestamp_policy: if deterministic_timestamp {
            TimestampPolicy::DeterministicZero
        } else {
            TimestampPolicy::SystemClock
        },
    })
    .map_err(|e| e.to_string())?;

    if verbose > 0 {
        for event in &result.events {
            eprintln!(
                "{}",
                serde_json::to_string(event).map_err(|e| e.to_string())?
            );
        }
    }

    let counts = &result.snapshot.integrity.counts;
    println!(
        "aggregate: OK tools={} categories={} capabilities={}",
        counts.tools, counts.categories, counts.capabilities
    );
    println!("snapshot: {}", result.snapshot_path.display());
    println!("hash sidecar: {}", result.hash_path.display());
    Ok(ExitCode::Success)
}

fn verify(snapshot_path: PathBuf, hash_path: Option<PathBuf>) -> Result<ExitCode, String> {
    let raw = fs::read_to_string(&snapshot_path)
        .map_err(|e| format!("failed to read {}: {e}", snapshot_path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .map_err(|e| format!("failed to parse {}: {e}", snapshot_path.display()))?;

    snapshot.validate_strict().map_err(|e| e.to_string())?;
    let recomputed = snapshot.compute_integrity_hash().map_err(|e| e.to_string())?;
    if recomputed != snapshot.integrity.hash {
        eprintln!(
            "integrity hash mismatch: embedded {}, recomputed {recomputed}",
            snapshot.integrity.hash
        );
        return Ok(ExitCode::Validation);
    }

    if let Some(path) = hash_path {
        let sidecar = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        if sidecar.trim() != recomputed {
            eprintln!(
                "sidecar hash mismatch: sidecar {}, recomputed {recomputed}",
                sidecar.trim()
            );
            return Ok(ExitCode::Validation);
        }
    }

    println!("verify: OK {recomputed}");
    Ok(ExitCode::Success)
}
