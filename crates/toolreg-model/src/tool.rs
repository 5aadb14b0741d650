use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One catalog entry. Field names follow the published JSON contract
/// consumed by the web client, hence the camelCase renames. Unknown extra
/// fields are tolerated here; the schema validator owns structural policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub category: String,
    pub capabilities: Vec<String>,
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub model: String,
    #[serde(
        rename = "minMonthlyUSD",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_monthly_usd: Option<f64>,
    #[serde(
        rename = "maxMonthlyUSD",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_monthly_usd: Option<f64>,
}

/// Case-folded sort key for tool names. Lowercase folding is performed
/// per-scalar with `char::to_lowercase`, which is locale-independent and
/// therefore stable across platforms and runs.
#[must_use]
pub fn name_sort_key(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Total order over tool names: case-insensitive first, raw string as the
/// tie-breaker. Both the per-category sort-order check and the global
/// aggregation sort use this comparator, so "sorted" means the same thing
/// everywhere in the pipeline.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_sort_key(a)
        .cmp(&name_sort_key(b))
        .then_with(|| a.cmp(b))
}
