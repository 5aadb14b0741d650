// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use toolreg_model::{
    compare_names, Integrity, IntegrityCounts, Snapshot, SnapshotIndexes, TaxonomyStore, Tool,
    ValidationError,
};

/// Flatten per-category tool lists (already in config order) into one
/// globally sorted sequence. The comparator is the same one the per-file
/// sort-order check uses, and the underlying sort is stable, so equal
/// names keep their deterministic category order.
#[must_use]
pub fn merge_category_tools(per_category: Vec<Vec<Tool>>) -> Vec<Tool> {
    let mut all: Vec<Tool> = per_category.into_iter().flatten().collect();
    all.sort_by(|a, b| compare_names(&a.name, &b.name));
    all
}

/// Derive both indexes by filtering the globally sorted list, so index
/// order always mirrors global order. Every config category gets a
/// `byCategory` bucket (possibly empty); `byCapability` only holds
/// capabilities actually declared by at least one tool.
#[must_use]
pub fn build_indexes(store: &TaxonomyStore, tools: &[Tool]) -> SnapshotIndexes {
    let mut by_category: BTreeMap<String, Vec<String>> = store
        .config
        .categories
        .keys()
        .map(|slug| (slug.clone(), Vec::new()))
        .collect();
    let mut by_capability: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for tool in tools {
        if let Some(bucket) = by_category.get_mut(&tool.category) {
            bucket.push(tool.id.clone());
        }
        for capability in &tool.capabilities {
            by_capability
                .entry(capability.clone())
                .or_default()
                .push(tool.id.clone());
        }
    }

    SnapshotIndexes {
        by_category,
        by_capability,
    }
}

/// Assemble the snapshot envelope and stamp its integrity block. The hash
/// covers everything except `generatedAt` and the integrity block itself.
pub fn build_snapshot(
    store: &TaxonomyStore,
    tools: Vec<Tool>,
    generated_at: u64,
) -> Result<Snapshot, ValidationError> {
    let indexes = build_indexes(store, &tools);
    let counts = IntegrityCounts {
        tools: tools.len() as u64,
        categories: store.config.categories.len() as u64,
        capabilities: indexes.by_capability.len() as u64,
    };
    let mut snapshot = Snapshot {
        version: store.config.version.clone(),
        schema_version: store.config.schema_version.clone(),
        generated_at,
        categories: store.config.categories.clone(),
        tools,
        indexes,
        integrity: Integrity {
            hash: String::new(),
            counts,
        },
    };
    snapshot.integrity.hash = snapshot.compute_integrity_hash()?;
    Ok(snapshot)
}
