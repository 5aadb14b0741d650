use serde_json::json;
use toolreg_validate::check_tool_shape;

#[test]
fn well_formed_record_has_no_problems() {
    let record = json!({
        "id": "t1",
        "name": "Alpha",
        "category": "writing",
        "capabilities": ["drafting"],
        "pricing": {"model": "free"}
    });
    assert!(check_tool_shape(&record).is_empty());
}

#[test]
fn non_object_record_reports_single_problem() {
    let problems = check_tool_shape(&json!(["not", "an", "object"]));
    assert_eq!(problems, vec!["record must be a JSON object".to_string()]);
}

#[test]
fn missing_fields_are_all_reported() {
    let problems = check_tool_shape(&json!({"name": "Alpha"}));
    assert!(problems.contains(&"missing required field: id".to_string()));
    assert!(problems.contains(&"missing required field: category".to_string()));
    assert!(problems.contains(&"missing required field: capabilities".to_string()));
    assert!(problems.contains(&"missing required field: pricing".to_string()));
}

#[test]
fn wrong_shapes_accumulate_instead_of_short_circuiting() {
    let record = json!({
        "id": "",
        "name": 42,
        "category": "writing",
        "capabilities": ["drafting", 7],
        "pricing": {"model": true, "minMonthlyUSD": "ten"}
    });
    let problems = check_tool_shape(&record);
    assert!(problems.contains(&"id must be a non-empty string".to_string()));
    assert!(problems.contains(&"name must be a non-empty string".to_string()));
    assert!(problems.contains(&"capabilities[1] must be a string".to_string()));
    assert!(problems.contains(&"pricing.model must be a string".to_string()));
    assert!(problems.contains(&"pricing.minMonthlyUSD must be numeric".to_string()));
    assert_eq!(problems.len(), 5);
}

#[test]
fn capabilities_must_be_a_list() {
    let record = json!({
        "id": "t1",
        "name": "Alpha",
        "category": "writing",
        "capabilities": "drafting",
        "pricing": {"model": "free"}
    });
    let problems = check_tool_shape(&record);
    assert!(problems.contains(&"capabilities must be a list of strings".to_string()));
}

#[test]
fn compliance_must_be_an_object_when_present() {
    let record = json!({
        "id": "t1",
        "name": "Alpha",
        "category": "writing",
        "capabilities": [],
        "pricing": {"model": "free"},
        "compliance": ["gdpr"]
    });
    let problems = check_tool_shape(&record);
    assert_eq!(problems, vec!["compliance must be an object".to_string()]);
}
