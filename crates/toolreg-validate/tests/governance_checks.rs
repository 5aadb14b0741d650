use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use toolreg_model::{
    CapabilityDef, CapabilityVocabulary, CategoryConfig, CategoryStatus, ComplianceFlagDef,
    ComplianceVocabulary, PricingVocabulary, RegistryConfig, TaxonomyStore,
};
use toolreg_validate::{validate_category, validate_registry};

fn store(categories: &[(&str, CategoryStatus, Option<u64>)]) -> TaxonomyStore {
    let mut map = BTreeMap::new();
    for (slug, status, min_tools) in categories {
        map.insert(
            (*slug).to_string(),
            CategoryConfig {
                name: slug.to_uppercase(),
                status: *status,
                min_tools: *min_tools,
            },
        );
    }
    TaxonomyStore::new(
        RegistryConfig {
            version: "2.3.0".to_string(),
            schema_version: "1".to_string(),
            min_tools_per_live_category: 1,
            categories: map,
        },
        CapabilityVocabulary {
            capabilities: vec![
                CapabilityDef {
                    slug: "drafting".to_string(),
                    label: "Drafting".to_string(),
                },
                CapabilityDef {
                    slug: "editing".to_string(),
                    label: "Editing".to_string(),
                },
            ],
        },
        PricingVocabulary {
            models: vec!["free".to_string(), "paid".to_string()],
        },
        ComplianceVocabulary {
            flags: vec![ComplianceFlagDef {
                key: "gdpr".to_string(),
                label: "GDPR".to_string(),
            }],
        },
    )
}

fn tool(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "writing",
        "capabilities": ["drafting"],
        "pricing": {"model": "free"}
    })
}

#[test]
fn clean_category_passes_with_zero_violations() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let violations = validate_category(&store, "writing", &[tool("t1", "Alpha")]);
    assert!(violations.is_empty(), "unexpected: {violations:?}");
}

#[test]
fn unknown_capability_produces_exactly_one_violation_naming_it() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let mut record = tool("t1", "Alpha");
    record["capabilities"] = json!(["drafting", "mind-reading"]);
    let violations = validate_category(&store, "writing", &[record]);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "unknown capability \"mind-reading\""
    );
    assert_eq!(violations[0].tool, "Alpha");
}

#[test]
fn unknown_pricing_model_is_reported() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let mut record = tool("t1", "Alpha");
    record["pricing"] = json!({"model": "enterprise"});
    let violations = validate_category(&store, "writing", &[record]);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "unknown pricing model \"enterprise\"");
}

#[test]
fn unknown_compliance_flag_is_reported_per_key() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let mut record = tool("t1", "Alpha");
    record["compliance"] = json!({"gdpr": true, "soc2": "yes"});
    let violations = validate_category(&store, "writing", &[record]);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "unknown compliance flag \"soc2\"");
}

#[test]
fn category_mismatch_names_expected_and_actual() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let mut record = tool("t1", "Alpha");
    record["category"] = json!("research");
    let violations = validate_category(&store, "writing", &[record]);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "category mismatch: expected \"writing\", found \"research\""
    );
}

#[test]
fn inverted_price_range_cites_both_bounds() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let mut record = tool("t1", "Alpha");
    record["pricing"] = json!({"model": "paid", "minMonthlyUSD": 50.0, "maxMonthlyUSD": 20.0});
    let violations = validate_category(&store, "writing", &[record]);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "invalid price range: minMonthlyUSD 50 exceeds maxMonthlyUSD 20"
    );
}

#[test]
fn one_bad_tool_can_violate_several_rules_at_once() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let record = json!({
        "id": "t1",
        "name": "Alpha",
        "category": "research",
        "capabilities": ["mind-reading"],
        "pricing": {"model": "enterprise", "minMonthlyUSD": 9.0, "maxMonthlyUSD": 1.0}
    });
    let violations = validate_category(&store, "writing", &[record]);
    assert_eq!(violations.len(), 4);
}

#[test]
fn duplicate_id_reported_once_and_rest_of_file_still_checked() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let mut repeat = tool("t1", "Bravo");
    // Governance problems on the repeated record are not re-checked.
    repeat["capabilities"] = json!(["mind-reading"]);
    let mut later = tool("t3", "Charlie");
    later["pricing"] = json!({"model": "enterprise"});
    let records = vec![tool("t1", "Alpha"), repeat, later];
    let violations = validate_category(&store, "writing", &records);
    assert_eq!(violations.len(), 2, "unexpected: {violations:?}");
    assert_eq!(violations[0].message, "duplicate tool id \"t1\"");
    assert_eq!(violations[1].message, "unknown pricing model \"enterprise\"");
}

#[test]
fn unsorted_file_reports_first_offending_pair_only() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let records = vec![
        tool("t1", "Delta"),
        tool("t2", "Alpha"),
        tool("t3", "Charlie"),
        tool("t4", "Bravo"),
    ];
    let violations = validate_category(&store, "writing", &records);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "tools not sorted by name: \"Delta\" precedes \"Alpha\""
    );
    assert!(violations[0].tool.is_empty());
}

#[test]
fn sort_check_is_case_insensitive() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let records = vec![tool("t1", "alpha"), tool("t2", "Bravo")];
    let violations = validate_category(&store, "writing", &records);
    assert!(violations.is_empty(), "unexpected: {violations:?}");
}

#[test]
fn under_populated_live_category_states_found_and_required() {
    let store = store(&[("writing", CategoryStatus::Live, Some(3))]);
    let violations = validate_category(&store, "writing", &[tool("t1", "Alpha")]);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "category below minimum population: found 1, required 3"
    );
}

#[test]
fn population_default_applies_when_no_override() {
    let store = store(&[("writing", CategoryStatus::Live, None)]);
    let violations = validate_category(&store, "writing", &[]);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "category below minimum population: found 0, required 1"
    );
}

#[test]
fn non_live_category_below_minimum_is_not_an_error() {
    let store = store(&[("writing", CategoryStatus::Planned, Some(3))]);
    let violations = validate_category(&store, "writing", &[]);
    assert!(violations.is_empty(), "unexpected: {violations:?}");
}

#[test]
fn structurally_broken_record_does_not_stop_the_file() {
    let store = store(&[("writing", CategoryStatus::Live, Some(1))]);
    let records = vec![json!({"name": "Alpha"}), tool("t2", "Bravo")];
    let violations = validate_category(&store, "writing", &records);
    assert!(violations
        .iter()
        .all(|v| v.message.starts_with("missing required field")));
    assert_eq!(violations.len(), 4);
}

fn write_registry(root: &std::path::Path, categories_json: &[(&str, Value)]) {
    fs::create_dir_all(root.join("taxonomy")).expect("taxonomy dir");
    fs::create_dir_all(root.join("categories")).expect("categories dir");
    fs::write(
        root.join("taxonomy/config.json"),
        serde_json::to_vec_pretty(&json!({
            "version": "2.3.0",
            "schemaVersion": "1",
            "minToolsPerLiveCategory": 1,
            "categories": {
                "research": {"name": "Research", "status": "live"},
                "writing": {"name": "Writing", "status": "live"}
            }
        }))
        .expect("config"),
    )
    .expect("write config");
    fs::write(
        root.join("taxonomy/capabilities.json"),
        serde_json::to_vec_pretty(&json!({
            "capabilities": [{"slug": "drafting", "label": "Drafting"}]
        }))
        .expect("capabilities"),
    )
    .expect("write capabilities");
    fs::write(
        root.join("taxonomy/pricing-models.json"),
        serde_json::to_vec_pretty(&json!({"models": ["free"]})).expect("models"),
    )
    .expect("write pricing models");
    fs::write(
        root.join("taxonomy/compliance-flags.json"),
        serde_json::to_vec_pretty(&json!({"flags": []})).expect("flags"),
    )
    .expect("write compliance flags");
    for (slug, tools) in categories_json {
        fs::write(
            root.join(format!("categories/{slug}.json")),
            serde_json::to_vec_pretty(tools).expect("tools"),
        )
        .expect("write category");
    }
}

#[test]
fn registry_pass_flags_ids_shared_across_categories() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut research_tool = tool("t1", "Alpha");
    research_tool["category"] = json!("research");
    write_registry(
        tmp.path(),
        &[
            ("writing", json!([tool("t1", "Alpha")])),
            ("research", json!([research_tool])),
        ],
    );
    let store = toolreg_validate::load_taxonomy_store(tmp.path()).expect("store");
    let report = validate_registry(&store, tmp.path()).expect("report");
    assert_eq!(report.violations.len(), 1, "unexpected: {report:?}");
    assert_eq!(
        report.violations[0].message,
        "duplicate tool id \"t1\" across categories: research, writing"
    );
    assert!(report.violations[0].category.is_empty());
}

#[test]
fn registry_pass_treats_missing_live_file_as_zero_population() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_registry(tmp.path(), &[("writing", json!([tool("t1", "Alpha")]))]);
    let store = toolreg_validate::load_taxonomy_store(tmp.path()).expect("store");
    let report = validate_registry(&store, tmp.path()).expect("report");
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].category, "research");
    assert_eq!(
        report.violations[0].message,
        "category below minimum population: found 0, required 1"
    );
}

#[test]
fn registry_pass_reports_corrupt_file_and_continues() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_registry(tmp.path(), &[("writing", json!([tool("t1", "Alpha")]))]);
    fs::write(tmp.path().join("categories/research.json"), b"{not json")
        .expect("write corrupt file");
    let store = toolreg_validate::load_taxonomy_store(tmp.path()).expect("store");
    let report = validate_registry(&store, tmp.path()).expect("report");
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].category, "research");
    assert!(report.violations[0].message.contains("failed to parse"));
}

#[test]
fn clean_registry_run_is_reported_clean() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut research_tool = tool("r1", "Quill");
    research_tool["category"] = json!("research");
    write_registry(
        tmp.path(),
        &[
            ("writing", json!([tool("t1", "Alpha")])),
            ("research", json!([research_tool])),
        ],
    );
    let store = toolreg_validate::load_taxonomy_store(tmp.path()).expect("store");
    let report = validate_registry(&store, tmp.path()).expect("report");
    assert!(report.is_clean(), "unexpected: {report:?}");
}
