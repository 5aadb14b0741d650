// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use toolreg_model::{snapshot_paths, Snapshot, SnapshotPaths};

use crate::AggregateError;

/// Persist the snapshot and its hash sidecar. Overwrites the latest
/// artifacts in place; retention of older snapshots is a deployment
/// concern, not this writer's.
pub fn write_snapshot_outputs(
    out_dir: &Path,
    snapshot: &Snapshot,
) -> Result<SnapshotPaths, AggregateError> {
    fs::create_dir_all(out_dir).map_err(|e| {
        AggregateError(format!(
            "failed to create output directory {}: {e}",
            out_dir.display()
        ))
    })?;
    let paths = snapshot_paths(out_dir, &snapshot.schema_version);

    let body = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| AggregateError(format!("snapshot serialization failed: {e}")))?;
    fs::write(&paths.snapshot, body).map_err(|e| {
        AggregateError(format!(
            "failed to write {}: {e}",
            paths.snapshot.display()
        ))
    })?;

    fs::write(&paths.hash, format!("{}\n", snapshot.integrity.hash)).map_err(|e| {
        AggregateError(format!("failed to write {}: {e}", paths.hash.display()))
    })?;

    Ok(paths)
}
