use crate::taxonomy::CategoryConfig;
use crate::tool::{compare_names, Tool};
use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The aggregated build artifact consumed by the web client. Rebuilt whole
/// on every pipeline run; never incrementally patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub schema_version: String,
    /// Unix seconds. Excluded from the integrity hash.
    pub generated_at: u64,
    pub categories: BTreeMap<String, CategoryConfig>,
    pub tools: Vec<Tool>,
    pub indexes: SnapshotIndexes,
    pub integrity: Integrity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SnapshotIndexes {
    pub by_category: BTreeMap<String, Vec<String>>,
    pub by_capability: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Integrity {
    pub hash: String,
    pub counts: IntegrityCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrityCounts {
    pub tools: u64,
    pub categories: u64,
    pub capabilities: u64,
}

impl Snapshot {
    /// Content digest over the canonical serialization of the snapshot with
    /// `generatedAt` and the `integrity` block removed, so the hash is a
    /// pure function of taxonomy, tool data, and index contents. Verifiers
    /// recompute this and compare against `integrity.hash`.
    pub fn compute_integrity_hash(&self) -> Result<String, ValidationError> {
        let bytes =
            toolreg_core::canonical::stable_json_bytes_without(self, &["generatedAt", "integrity"])
                .map_err(|e| ValidationError(format!("snapshot serialization failed: {e}")))?;
        Ok(toolreg_core::canonical::stable_hash_hex(&bytes))
    }

    /// Structural self-check for a snapshot read back from disk or fetched
    /// by a consumer: counts agree with contents, the global sort holds,
    /// and every indexed ID points at a tool that exists.
    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.integrity.hash.trim().is_empty() {
            return Err(ValidationError(
                "integrity.hash must not be empty".to_string(),
            ));
        }
        if self.integrity.counts.tools != self.tools.len() as u64 {
            return Err(ValidationError(format!(
                "integrity.counts.tools is {} but snapshot holds {} tools",
                self.integrity.counts.tools,
                self.tools.len()
            )));
        }
        if self.integrity.counts.categories != self.categories.len() as u64 {
            return Err(ValidationError(format!(
                "integrity.counts.categories is {} but snapshot holds {} categories",
                self.integrity.counts.categories,
                self.categories.len()
            )));
        }
        if self.integrity.counts.capabilities != self.indexes.by_capability.len() as u64 {
            return Err(ValidationError(format!(
                "integrity.counts.capabilities is {} but byCapability holds {} buckets",
                self.integrity.counts.capabilities,
                self.indexes.by_capability.len()
            )));
        }
        for pair in self.tools.windows(2) {
            if compare_names(&pair[0].name, &pair[1].name).is_gt() {
                return Err(ValidationError(format!(
                    "tools are not globally sorted: \"{}\" precedes \"{}\"",
                    pair[0].name, pair[1].name
                )));
            }
        }
        let known: std::collections::BTreeSet<&str> =
            self.tools.iter().map(|t| t.id.as_str()).collect();
        for (slug, ids) in &self.indexes.by_category {
            for id in ids {
                if !known.contains(id.as_str()) {
                    return Err(ValidationError(format!(
                        "byCategory[{slug}] references unknown tool id \"{id}\""
                    )));
                }
            }
        }
        for (capability, ids) in &self.indexes.by_capability {
            for id in ids {
                if !known.contains(id.as_str()) {
                    return Err(ValidationError(format!(
                        "byCapability[{capability}] references unknown tool id \"{id}\""
                    )));
                }
            }
        }
        Ok(())
    }
}
