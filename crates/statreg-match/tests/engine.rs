use statreg_match::{MappingState, auto_map, similarity};
use statreg_model::{FieldSpec, TargetSchema, registers};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn abbreviated_headers_leave_the_mapping_incomplete() {
    let schema = TargetSchema::new(
        "directors",
        vec![
            FieldSpec::new("firstName", "First Name"),
            FieldSpec::new("dateOfBirth", "Date of Birth"),
            FieldSpec::new("nationality", "Nationality"),
        ],
    )
    .unwrap();

    // "DOB" and "Country" share too few bigrams with any label to clear
    // the threshold; "Name" is contained in "First Name" and scores 0.8.
    let headers = headers(&["Name", "DOB", "Country"]);
    for label in ["First Name", "Date of Birth", "Nationality"] {
        assert!(similarity("DOB", label) <= 0.5);
        assert!(similarity("Country", label) <= 0.5);
    }

    let mut state = MappingState::from_auto(&headers, &schema);
    assert_eq!(state.header_for("firstName"), Some("Name"));
    assert_eq!(state.header_for("dateOfBirth"), None);
    assert_eq!(state.header_for("nationality"), None);

    // The operator has to finish the job by hand before the wizard may
    // advance past the mapping step.
    assert!(!state.is_complete(&schema));
    let missing: Vec<_> = state
        .unmapped_required(&schema)
        .iter()
        .map(|f| f.key.as_str())
        .collect();
    assert_eq!(missing, vec!["dateOfBirth", "nationality"]);

    state.set_manual("dateOfBirth", "DOB");
    state.set_manual("nationality", "Country");
    assert!(state.is_complete(&schema));
    assert_eq!(state.confidence_for("dateOfBirth"), Some(1.0));
}

#[test]
fn template_headers_map_every_director_field() {
    let schema = registers::directors();
    let template_headers: Vec<String> = schema
        .fields()
        .iter()
        .map(|f| f.label.to_uppercase())
        .collect();

    let outcome = auto_map(&template_headers, &schema);
    for field in schema.fields() {
        assert_eq!(
            outcome.mapping.get(&field.key),
            Some(field.label.to_uppercase().as_str()),
            "field '{}' did not map back to its own label",
            field.key
        );
        assert_eq!(outcome.confidence.get(&field.key), Some(1.0));
    }
}

#[test]
fn rerunning_after_manual_edits_reproduces_the_same_suggestions() {
    let schema = registers::charges();
    let headers = headers(&[
        "Charge ID",
        "Charge Type",
        "Amount",
        "Currency",
        "Chargor",
        "Chargee",
        "Property Charged",
        "Date Created",
        "Registration Date",
        "Description",
        "Status",
    ]);

    let first = auto_map(&headers, &schema);
    let second = auto_map(&headers, &schema);
    assert_eq!(first, second);
}
