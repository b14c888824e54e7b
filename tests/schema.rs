use workday_cards::config::parse_requirement;
use workday_cards::{validate, Config, Schema, Source, WorkdayError};

fn two_column() -> Schema {
    Schema::new()
        .require("Committee", "Committee")
        .require("Job Name", "Job Name")
}

#[test]
fn complete_header_validates() {
    let header = ["Committee", "Job Name", "Extra"];
    assert!(validate(&header, &two_column()).is_empty());
}

#[test]
fn header_cells_are_trimmed() {
    let header = ["  Committee", "Job Name \t"];
    assert!(validate(&header, &two_column()).is_empty());
}

#[test]
fn missing_columns_follow_schema_order() {
    let schema = Schema::new()
        .require("Job Name", "Job Name")
        .require("Committee", "Committee")
        .require("Supplies Needed", "Supplies");
    let header = ["Committee"];
    assert_eq!(validate(&header, &schema), vec!["Job Name", "Supplies Needed"]);
}

#[test]
fn match_is_case_sensitive() {
    let header = ["committee", "Job Name"];
    assert_eq!(validate(&header, &two_column()), vec!["Committee"]);
}

#[test]
fn validate_is_empty_exactly_when_all_present() {
    let columns = ["Committee", "Job Name", "Priority"];
    let schema = columns.iter().map(|c| (*c, *c)).collect::<Schema>();
    // Every subset of the columns as a header.
    for mask in 0u8..8 {
        let header: Vec<&str> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| *c)
            .collect();
        let missing = validate(&header, &schema);
        assert_eq!(missing.is_empty(), mask == 0b111, "header {header:?}");
        assert_eq!(missing.len(), 3 - header.len());
    }
}

#[test]
fn requiring_twice_keeps_position_and_takes_new_label() {
    let schema = Schema::new()
        .require("Committee", "Committee")
        .require("Job Name", "Job Name")
        .require("Committee", "Group");
    let entries: Vec<(&str, &str)> = schema
        .iter()
        .map(|e| (e.source.as_str(), e.label.as_str()))
        .collect();
    assert_eq!(entries, vec![("Committee", "Group"), ("Job Name", "Job Name")]);
}

#[test]
fn workday_schema_ends_with_seasonal_column() {
    let schema = Schema::workday("Which work day: Sunday or Flexible");
    assert_eq!(schema.len(), 10);
    assert_eq!(schema.label_of("Which work day: Sunday or Flexible"), Some("work day"));
    assert_eq!(
        schema.label_of("Priority - Indicate: Low, Medium, or High"),
        Some("priority")
    );
}

#[test]
fn requirement_pairs_parse() -> anyhow::Result<()> {
    assert_eq!(
        parse_requirement("Job Description=Description")?,
        ("Job Description".to_string(), "Description".to_string())
    );
    assert_eq!(
        parse_requirement("Committee")?,
        ("Committee".to_string(), "Committee".to_string())
    );
    assert!(matches!(parse_requirement(" =x"), Err(WorkdayError::Config(_))));
    Ok(())
}

#[test]
fn config_requires_key_fields_in_schema() {
    let source = Source::Path("jobs.csv".into());
    assert!(Config::new(source.clone(), two_column()).validate().is_ok());

    let only_name = Schema::new().require("Job Name", "Job Name");
    let err = Config::new(source.clone(), only_name).validate().unwrap_err();
    assert!(err.to_string().contains("grouping field 'Committee'"));

    assert!(Config::new(source, Schema::new()).validate().is_err());
}

#[test]
fn google_sheet_url() {
    assert_eq!(
        Source::google_sheet("abc123", 7),
        Source::Url("https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=7".into())
    );
}

#[test]
fn padded_sources_collapse_to_one_entry() {
    let schema = Schema::new()
        .require(" Job Name", "Job Name")
        .require("Job Name ", "Title");
    assert_eq!(schema.len(), 1);
    assert_eq!(schema.iter().next().map(|e| e.source.as_str()), Some("Job Name"));
    assert_eq!(schema.label_of("Job Name"), Some("Title"));
}

#[test]
fn padded_key_fields_validate() {
    let config = Config::new(Source::Path("jobs.csv".into()), two_column())
        .with_grouping_field(" Committee")
        .with_primary_key_field("Job Name ");
    assert_eq!(config.grouping_field, "Committee");
    assert_eq!(config.primary_key_field, "Job Name");
    assert!(config.validate().is_ok());
}
