#![forbid(unsafe_code)]

mod paths;
mod snapshot;
mod taxonomy;
mod tool;

pub const CRATE_NAME: &str = "toolreg-model";

pub use paths::{registry_paths, snapshot_paths, RegistryPaths, SnapshotPaths};
pub use snapshot::{Integrity, IntegrityCounts, Snapshot, SnapshotIndexes};
pub use taxonomy::{
    CapabilityDef, CapabilityVocabulary, CategoryConfig, CategoryStatus, ComplianceFlagDef,
    ComplianceVocabulary, PricingVocabulary, RegistryConfig, TaxonomyStore,
};
pub use tool::{compare_names, name_sort_key, Pricing, Tool};

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}
