use structure_oracle::matcher::{EnumViolation, match_enum_values};
use structure_oracle::report::enum_failures;
use structure_oracle::types::Criterion;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn missing_value_reports_count_and_membership() {
    let violations = match_enum_values(
        &strings(&["RED", "GREEN", "BLUE"]),
        &strings(&["RED", "GREEN"]),
    );
    assert_eq!(
        violations,
        vec![
            EnumViolation::WrongCount {
                expected: 3,
                observed: 2
            },
            EnumViolation::Missing("BLUE".into()),
        ]
    );
}

#[test]
fn same_values_in_other_order_pass() {
    let violations = match_enum_values(
        &strings(&["RED", "GREEN", "BLUE"]),
        &strings(&["BLUE", "RED", "GREEN"]),
    );
    assert!(violations.is_empty());
}

#[test]
fn extras_only_show_in_count() {
    let violations = match_enum_values(&strings(&["A"]), &strings(&["A", "B", "C"]));
    assert_eq!(
        violations,
        vec![EnumViolation::WrongCount {
            expected: 1,
            observed: 3
        }]
    );
}

#[test]
fn membership_is_case_sensitive() {
    let violations = match_enum_values(&strings(&["Red"]), &strings(&["RED"]));
    assert_eq!(violations, vec![EnumViolation::Missing("Red".into())]);
}

#[test]
fn no_constants_is_its_own_failure() {
    let violations = match_enum_values(&strings(&["A", "B"]), &[]);
    assert_eq!(
        violations,
        vec![
            EnumViolation::NoConstants,
            EnumViolation::WrongCount {
                expected: 2,
                observed: 0
            },
            EnumViolation::Missing("A".into()),
            EnumViolation::Missing("B".into()),
        ]
    );
    assert_eq!(
        match_enum_values(&[], &[]),
        vec![EnumViolation::NoConstants]
    );
}

#[test]
fn failures_carry_class_and_value() {
    let violations = match_enum_values(&strings(&["RED", "BLUE"]), &strings(&["RED"]));
    let failures = enum_failures("Color", &violations);
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].criterion, Criterion::Count);
    assert_eq!(failures[0].subject, None);
    assert_eq!(failures[1].criterion, Criterion::Membership);
    assert_eq!(failures[1].subject.as_deref(), Some("BLUE"));
    assert!(failures.iter().all(|f| f.class_name == "Color"));
    assert!(failures[1].message.contains("BLUE"));
}
