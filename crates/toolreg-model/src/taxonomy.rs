use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Live,
    Planned,
    Hidden,
}

impl CategoryStatus {
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub name: String,
    pub status: CategoryStatus,
    #[serde(rename = "minTools", default, skip_serializing_if = "Option::is_none")]
    pub min_tools: Option<u64>,
}

/// The taxonomy store config document: version stamps, the pipeline-wide
/// live-category minimum, and the authoritative category registry. The
/// `BTreeMap` keying makes config order the single deterministic iteration
/// order for every pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub version: String,
    pub schema_version: String,
    pub min_tools_per_live_category: u64,
    pub categories: BTreeMap<String, CategoryConfig>,
}

impl RegistryConfig {
    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.version.trim().is_empty() {
            return Err(ValidationError("version must not be empty".to_string()));
        }
        if self.schema_version.trim().is_empty() {
            return Err(ValidationError(
                "schemaVersion must not be empty".to_string(),
            ));
        }
        for (slug, category) in &self.categories {
            if slug.trim().is_empty() {
                return Err(ValidationError(
                    "category slug must not be empty".to_string(),
                ));
            }
            if category.name.trim().is_empty() {
                return Err(ValidationError(format!(
                    "category \"{slug}\" must have a non-empty name"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDef {
    pub slug: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityVocabulary {
    pub capabilities: Vec<CapabilityDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingVocabulary {
    pub models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFlagDef {
    pub key: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceVocabulary {
    pub flags: Vec<ComplianceFlagDef>,
}

/// The loaded taxonomy: config plus the three controlled vocabularies,
/// reduced to membership sets. Passed explicitly into the validator and
/// aggregator; there is no process-wide singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyStore {
    pub config: RegistryConfig,
    capabilities: BTreeSet<String>,
    pricing_models: BTreeSet<String>,
    compliance_flags: BTreeSet<String>,
}

impl TaxonomyStore {
    #[must_use]
    pub fn new(
        config: RegistryConfig,
        capabilities: CapabilityVocabulary,
        pricing: PricingVocabulary,
        compliance: ComplianceVocabulary,
    ) -> Self {
        Self {
            config,
            capabilities: capabilities
                .capabilities
                .into_iter()
                .map(|c| c.slug)
                .collect(),
            pricing_models: pricing.models.into_iter().collect(),
            compliance_flags: compliance.flags.into_iter().map(|f| f.key).collect(),
        }
    }

    #[must_use]
    pub fn has_capability(&self, slug: &str) -> bool {
        self.capabilities.contains(slug)
    }

    #[must_use]
    pub fn has_pricing_model(&self, model: &str) -> bool {
        self.pricing_models.contains(model)
    }

    #[must_use]
    pub fn has_compliance_flag(&self, key: &str) -> bool {
        self.compliance_flags.contains(key)
    }

    /// Minimum tool count required for a live category: per-category
    /// override when present, else the pipeline-wide default.
    #[must_use]
    pub fn effective_min_tools(&self, slug: &str) -> u64 {
        self.config
            .categories
            .get(slug)
            .and_then(|c| c.min_tools)
            .unwrap_or(self.config.min_tools_per_live_category)
    }
}
