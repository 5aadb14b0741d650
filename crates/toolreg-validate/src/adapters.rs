use crate::ValidateError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use toolreg_model::{
    registry_paths, CapabilityVocabulary, ComplianceVocabulary, PricingVocabulary, RegistryConfig,
    TaxonomyStore, Tool,
};

/// Load and strictly decode the taxonomy store from a registry root.
/// Any unreadable or malformed taxonomy document is fatal; the pipeline
/// cannot reason about tool data without its reference vocabularies.
pub fn load_taxonomy_store(root: &Path) -> Result<TaxonomyStore, ValidateError> {
    let paths = registry_paths(root);

    let config: RegistryConfig = read_json(&paths.config)?;
    config
        .validate_strict()
        .map_err(|e| ValidateError(format!("{}: {e}", paths.config.display())))?;

    let capabilities: CapabilityVocabulary = read_json(&paths.capabilities)?;
    let pricing: PricingVocabulary = read_json(&paths.pricing_models)?;
    let compliance: ComplianceVocabulary = read_json(&paths.compliance_flags)?;

    Ok(TaxonomyStore::new(config, capabilities, pricing, compliance))
}

/// Raw records of one category file, for the accumulate-everything
/// validation passes.
pub fn load_raw_category_records(path: &Path) -> Result<Vec<Value>, ValidateError> {
    read_json(path)
}

/// Typed tools of one category file. Used by the aggregator, which runs
/// after the validation gate and treats decode failures as fatal.
pub fn load_category_tools(path: &Path) -> Result<Vec<Tool>, ValidateError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ValidateError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ValidateError(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| ValidateError(format!("failed to parse {}: {e}", path.display())))
}
