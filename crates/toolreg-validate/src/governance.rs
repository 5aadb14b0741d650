use crate::adapters::load_raw_category_records;
use crate::schema::{check_tool_shape, decode_tool};
use crate::{ValidateError, Violation};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use toolreg_model::{compare_names, registry_paths, TaxonomyStore, Tool};

/// Outcome of an exhaustive validation pass. Pass/fail is decided only
/// after every configured category has been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate one category file against the taxonomy and against itself.
/// Every rule is checked independently per tool; one bad record can emit
/// several violations. Only the sort-order check short-circuits, since a
/// single out-of-order pair already falsifies "the file is sorted".
#[must_use]
pub fn validate_category(store: &TaxonomyStore, slug: &str, records: &[Value]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen_ids: BTreeSet<String> = BTreeSet::new();
    let mut file_names: Vec<String> = Vec::new();

    for record in records {
        let label = record_label(record);
        let shape_problems = check_tool_shape(record);
        if !shape_problems.is_empty() {
            for message in shape_problems {
                violations.push(Violation::for_tool(slug, &label, message));
            }
            continue;
        }
        let tool = match decode_tool(record) {
            Ok(tool) => tool,
            Err(e) => {
                violations.push(Violation::for_tool(slug, &label, e.to_string()));
                continue;
            }
        };
        file_names.push(tool.name.clone());

        if !seen_ids.insert(tool.id.clone()) {
            // Repeated record was already fully validated under its first
            // occurrence; report the duplicate and move on.
            violations.push(Violation::for_tool(
                slug,
                &tool.name,
                format!("duplicate tool id \"{}\"", tool.id),
            ));
            continue;
        }

        violations.extend(check_tool_governance(store, slug, &tool));
    }

    if let Some(violation) = check_sort_order(slug, &file_names) {
        violations.push(violation);
    }

    violations.extend(check_population(store, slug, records.len() as u64));
    violations
}

fn check_tool_governance(store: &TaxonomyStore, slug: &str, tool: &Tool) -> Vec<Violation> {
    let mut violations = Vec::new();

    if tool.category != slug {
        violations.push(Violation::for_tool(
            slug,
            &tool.name,
            format!(
                "category mismatch: expected \"{slug}\", found \"{}\"",
                tool.category
            ),
        ));
    }

    for capability in &tool.capabilities {
        if !store.has_capability(capability) {
            violations.push(Violation::for_tool(
                slug,
                &tool.name,
                format!("unknown capability \"{capability}\""),
            ));
        }
    }

    if !store.has_pricing_model(&tool.pricing.model) {
        violations.push(Violation::for_tool(
            slug,
            &tool.name,
            format!("unknown pricing model \"{}\"", tool.pricing.model),
        ));
    }

    if let Some(compliance) = &tool.compliance {
        for key in compliance.keys() {
            if !store.has_compliance_flag(key) {
                violations.push(Violation::for_tool(
                    slug,
                    &tool.name,
                    format!("unknown compliance flag \"{key}\""),
                ));
            }
        }
    }

    if let (Some(min), Some(max)) = (tool.pricing.min_monthly_usd, tool.pricing.max_monthly_usd) {
        if min > max {
            violations.push(Violation::for_tool(
                slug,
                &tool.name,
                format!("invalid price range: minMonthlyUSD {min} exceeds maxMonthlyUSD {max}"),
            ));
        }
    }

    violations
}

fn check_sort_order(slug: &str, names: &[String]) -> Option<Violation> {
    for pair in names.windows(2) {
        if compare_names(&pair[0], &pair[1]).is_gt() {
            return Some(Violation::for_file(
                slug,
                format!(
                    "tools not sorted by name: \"{}\" precedes \"{}\"",
                    pair[0], pair[1]
                ),
            ));
        }
    }
    None
}

fn check_population(store: &TaxonomyStore, slug: &str, found: u64) -> Option<Violation> {
    let category = store.config.categories.get(slug)?;
    if !category.status.is_live() {
        return None;
    }
    let required = store.effective_min_tools(slug);
    if found < required {
        return Some(Violation::for_file(
            slug,
            format!("category below minimum population: found {found}, required {required}"),
        ));
    }
    None
}

/// Validate every category the taxonomy store declares, exhaustively.
/// A missing file counts as a population of zero for live categories; a
/// present-but-unreadable file is itself a file-level violation so the
/// pass can still cover the remaining categories. After the per-file
/// passes, tool IDs are checked for uniqueness across the whole registry,
/// since aggregation merges every category into one flat namespace.
pub fn validate_registry(
    store: &TaxonomyStore,
    root: &Path,
) -> Result<ValidationReport, ValidateError> {
    let paths = registry_paths(root);
    let mut report = ValidationReport::default();
    let mut id_owners: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for slug in store.config.categories.keys() {
        let path = paths.category_file(slug);
        if !path.exists() {
            report.violations.extend(check_population(store, slug, 0));
            continue;
        }
        let records = match load_raw_category_records(&path) {
            Ok(records) => records,
            Err(e) => {
                report
                    .violations
                    .push(Violation::for_file(slug, e.to_string()));
                continue;
            }
        };
        report
            .violations
            .extend(validate_category(store, slug, &records));

        let mut file_ids: BTreeSet<String> = BTreeSet::new();
        for record in &records {
            if let Some(id) = record.get("id").and_then(Value::as_str) {
                file_ids.insert(id.to_string());
            }
        }
        for id in file_ids {
            id_owners.entry(id).or_default().push(slug.clone());
        }
    }

    for (id, owners) in id_owners {
        if owners.len() > 1 {
            report.violations.push(Violation::for_registry(format!(
                "duplicate tool id \"{id}\" across categories: {}",
                owners.join(", ")
            )));
        }
    }

    Ok(report)
}

fn record_label(record: &Value) -> String {
    record
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| record.get("id").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}
