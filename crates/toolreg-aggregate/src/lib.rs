// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod logging;
mod merge;
mod write;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use toolreg_model::Snapshot;
use toolreg_validate::{load_category_tools, load_taxonomy_store, validate_registry};

pub const CRATE_NAME: &str = "toolreg-aggregate";

pub use logging::{PipelineEvent, PipelineLog, PipelineStage};
pub use merge::{build_indexes, build_snapshot, merge_category_tools};
pub use write::write_snapshot_outputs;

#[derive(Debug)]
pub struct AggregateError(pub String);

impl Display for AggregateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for AggregateError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPolicy {
    SystemClock,
    /// Fixed zero timestamp for reproducible fixtures.
    DeterministicZero,
}

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub root: PathBuf,
    pub out_dir: PathBuf,
    /// Run the governance validator first and refuse to aggregate data
    /// that fails it. Off only for local inspection of known-bad inputs.
    pub enforce_gate: bool,
    pub timestamp_policy: TimestampPolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            out_dir: PathBuf::new(),
            enforce_gate: true,
            timestamp_policy: TimestampPolicy::SystemClock,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregateResult {
    pub snapshot: Snapshot,
    pub snapshot_path: PathBuf,
    pub hash_path: PathBuf,
    pub events: Vec<PipelineEvent>,
}

/// Run the full aggregation pass: load the taxonomy, gate on validation,
/// merge every declared category, assemble and persist the snapshot.
/// A category with no file contributes zero tools; a file that exists but
/// cannot be read or decoded is fatal and names the offending path.
pub fn aggregate_registry(opts: &AggregateOptions) -> Result<AggregateResult, AggregateError> {
    let mut log = PipelineLog::default();
    log.emit(PipelineStage::Prepare, "aggregate.start", BTreeMap::new());

    let store =
        load_taxonomy_store(&opts.root).map_err(|e| AggregateError(e.to_string()))?;

    if opts.enforce_gate {
        let report = validate_registry(&store, &opts.root)
            .map_err(|e| AggregateError(e.to_string()))?;
        if !report.is_clean() {
            return Err(AggregateError(format!(
                "validation gate rejected registry: {} violation(s); run the validate command for details",
                report.violations.len()
            )));
        }
        log.emit(PipelineStage::Gate, "aggregate.gate.clean", BTreeMap::new());
    }

    let paths = toolreg_model::registry_paths(&opts.root);
    let mut per_category = Vec::new();
    for slug in store.config.categories.keys() {
        let path = paths.category_file(slug);
        if !path.exists() {
            continue;
        }
        let tools = load_category_tools(&path).map_err(|e| AggregateError(e.to_string()))?;
        let mut fields = BTreeMap::new();
        fields.insert("category".to_string(), slug.clone());
        fields.insert("tools".to_string(), tools.len().to_string());
        log.emit(PipelineStage::Load, "aggregate.load.category", fields);
        per_category.push(tools);
    }

    let tools = merge::merge_category_tools(per_category);
    let mut fields = BTreeMap::new();
    fields.insert("tools".to_string(), tools.len().to_string());
    log.emit(PipelineStage::Merge, "aggregate.merge.complete", fields);

    let generated_at = match opts.timestamp_policy {
        TimestampPolicy::SystemClock => unix_now()?,
        TimestampPolicy::DeterministicZero => 0,
    };
    let snapshot = merge::build_snapshot(&store, tools, generated_at)
        .map_err(|e| AggregateError(e.to_string()))?;

    let out_paths = write::write_snapshot_outputs(&opts.out_dir, &snapshot)?;
    let mut fields = BTreeMap::new();
    fields.insert(
        "snapshot".to_string(),
        out_paths.snapshot.display().to_string(),
    );
    fields.insert("hash".to_string(), snapshot.integrity.hash.clone());
    log.emit(PipelineStage::Persist, "aggregate.persist.complete", fields);
    log.emit(PipelineStage::Finalize, "aggregate.done", BTreeMap::new());

    Ok(AggregateResult {
        snapshot,
        snapshot_path: out_paths.snapshot,
        hash_path: out_paths.hash,
        events: log.events().to_vec(),
    })
}

fn unix_now() -> Result<u64, AggregateError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AggregateError(format!("system clock before unix epoch: {e}")))
}
