use workday_cards::{build, process, FilterState, Keys, Outcome, Record, Row, Schema};

const KEYS: Keys<'static> = Keys {
    grouping: "Committee",
    primary: "Job Name",
};

fn schema() -> Schema {
    Schema::new()
        .require("Committee", "Committee")
        .require("Job Name", "Job Name")
}

fn records(rows: &[&[&str]]) -> Vec<Record> {
    let rows: Vec<Row> = rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();
    build(&["Committee", "Job Name"], &rows)
}

fn groups(outcome: &Outcome) -> Vec<(String, usize)> {
    outcome
        .groups
        .iter()
        .map(|(g, n)| (g.to_string(), n))
        .collect()
}

fn names(outcome: &Outcome) -> Vec<String> {
    outcome
        .visible
        .iter()
        .map(|r| r.value("Job Name").to_string())
        .collect()
}

#[test]
fn single_complete_record() {
    let outcome = process(
        records(&[&["Kitchen", "Wash dishes"]]),
        &schema(),
        KEYS,
        &FilterState::all(),
    );
    assert!(outcome.errors.is_empty());
    assert_eq!(groups(&outcome), vec![("Kitchen".to_string(), 1)]);
    assert_eq!(outcome.visible.len(), 1);
}

#[test]
fn unnamed_record_is_skipped_entirely() {
    let outcome = process(
        records(&[&["Kitchen", ""]]),
        &schema(),
        KEYS,
        &FilterState::all(),
    );
    assert!(outcome.errors.is_empty());
    assert!(outcome.groups.is_empty());
    assert!(outcome.visible.is_empty());
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn short_row_without_name_is_skipped() {
    let outcome = process(records(&[&["Kitchen"]]), &schema(), KEYS, &FilterState::all());
    assert_eq!(outcome.skipped, 1);
    assert!(outcome.groups.is_empty());
}

#[test]
fn filter_limits_visible_but_not_counts() {
    let input = records(&[
        &["Kitchen", "Wash dishes"],
        &["Garden", "Weed beds"],
        &["Kitchen", "Mop floor"],
    ]);
    let filter = FilterState::new(Some("Kitchen".into()));
    let outcome = process(input, &schema(), KEYS, &filter);

    assert_eq!(
        groups(&outcome),
        vec![("Kitchen".to_string(), 2), ("Garden".to_string(), 1)]
    );
    assert_eq!(names(&outcome), vec!["Wash dishes", "Mop floor"]);
}

#[test]
fn filter_is_exact_and_case_sensitive() {
    let input = records(&[&["Kitchen", "Wash dishes"], &["kitchen", "Sweep"]]);
    let outcome = process(
        input,
        &schema(),
        KEYS,
        &FilterState::new(Some("kitchen".into())),
    );
    assert_eq!(names(&outcome), vec!["Sweep"]);
    assert_eq!(outcome.groups.len(), 2);
}

#[test]
fn blank_fields_reported_in_schema_order() {
    let schema = Schema::new()
        .require("Supplies Needed", "Supplies")
        .require("Committee", "Committee")
        .require("Job Name", "Job Name")
        .require("Honcho", "Honcho");
    let rows: Vec<Row> = vec![
        vec!["".into(), "Weed beds".into(), " ".into()],
        vec!["Garden".into(), "Prune".into(), "shears".into(), "Sam".into()],
    ];
    let header = ["Committee", "Job Name", "Supplies Needed", "Honcho"];
    let outcome = process(build(&header, &rows), &schema, KEYS, &FilterState::all());

    assert_eq!(outcome.errors.len(), 1);
    let warning = &outcome.errors[0];
    assert_eq!(warning.index, 0);
    assert_eq!(warning.missing, vec!["Supplies", "Committee", "Honcho"]);
    assert_eq!(warning.label.to_string(), "\"\" \"Weed beds\"");
    // Records with warnings still render.
    assert_eq!(outcome.visible.len(), 2);
}

#[test]
fn warnings_cover_filtered_out_records() {
    let schema = schema().require("Priority", "priority");
    let outcome = process(
        records(&[&["Garden", "Weed beds"], &["Kitchen", "Mop"]]),
        &schema,
        KEYS,
        &FilterState::new(Some("Kitchen".into())),
    );
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(outcome.visible.len(), 1);
}

#[test]
fn counts_do_not_depend_on_input_order() {
    let rows: &[&[&str]] = &[
        &["Kitchen", "a"],
        &["Garden", "b"],
        &["Kitchen", "c"],
        &["Grounds", ""],
        &["Garden", "d"],
        &["Kitchen", "e"],
    ];
    let baseline = {
        let mut g = groups(&process(records(rows), &schema(), KEYS, &FilterState::all()));
        g.sort();
        g
    };

    for shift in 1..rows.len() {
        let mut permuted: Vec<&[&str]> = rows.to_vec();
        permuted.rotate_left(shift);
        if shift % 2 == 0 {
            permuted.reverse();
        }
        let outcome = process(records(&permuted), &schema(), KEYS, &FilterState::all());

        let mut g = groups(&outcome);
        g.sort();
        assert_eq!(g, baseline);

        let mut visible = names(&outcome);
        visible.sort();
        assert_eq!(visible, vec!["a", "b", "c", "d", "e"]);
    }
}

#[test]
fn groups_iterate_in_first_seen_order() {
    let outcome = process(
        records(&[&["Garden", "a"], &["Kitchen", "b"], &["Garden", "c"]]),
        &schema(),
        KEYS,
        &FilterState::all(),
    );
    let order: Vec<&str> = outcome.groups.iter().map(|(g, _)| g).collect();
    assert_eq!(order, vec!["Garden", "Kitchen"]);
    assert_eq!(outcome.groups.get("Garden"), Some(2));
    assert_eq!(outcome.groups.total(), 3);
}

#[test]
fn unnamed_records_never_surface() {
    let input = records(&[&["Kitchen", ""], &["Ghost", ""], &["Kitchen", "Dishes"]]);
    let outcome = process(input, &schema().require("Notes", "Notes"), KEYS, &FilterState::all());

    assert_eq!(outcome.groups.get("Ghost"), None);
    assert_eq!(outcome.groups.get("Kitchen"), Some(1));
    assert!(outcome.errors.iter().all(|e| !e.label.name.is_empty()));
    assert_eq!(names(&outcome), vec!["Dishes"]);
    assert_eq!(outcome.skipped, 2);
}

#[test]
fn filter_state_from_query() {
    assert_eq!(
        FilterState::from_query("?filter=Common%20House").value(),
        Some("Common House")
    );
    assert_eq!(
        FilterState::from_query("page=2&filter=Garden+Club").value(),
        Some("Garden Club")
    );
    assert!(!FilterState::from_query("?filter=").is_active());
    assert!(!FilterState::from_query("").is_active());
    assert!(!FilterState::new(Some(String::new())).is_active());
}

#[test]
fn padded_schema_source_matches_trimmed_header() {
    let schema = schema().require(" Supplies Needed ", "Supplies");
    let header = ["Committee", "Job Name", "Supplies Needed"];
    let rows: Vec<Row> = vec![vec!["Kitchen".into(), "Wash".into(), "soap".into()]];

    assert!(workday_cards::validate(&header, &schema).is_empty());
    let outcome = process(build(&header, &rows), &schema, KEYS, &FilterState::all());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.visible.len(), 1);
}
