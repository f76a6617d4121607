use std::collections::BTreeSet;
use structure_oracle::matcher::{AttributeOutcome, match_attribute};
use structure_oracle::report::attribute_failures;
use structure_oracle::scan::scan_field;
use structure_oracle::types::{Criterion, ExpectedAttribute, ObservedField};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn expected(name: &str, ty: &str, modifiers: &[&str]) -> ExpectedAttribute {
    ExpectedAttribute {
        name: name.into(),
        type_name: ty.into(),
        modifiers: set(modifiers),
        annotations: BTreeSet::new(),
    }
}

fn field(name: &str, ty: &str, arg: Option<&str>, modifiers: &[&str]) -> ObservedField {
    ObservedField {
        name: name.into(),
        declared_type_name: ty.into(),
        generic_argument_type_name: arg.map(String::from),
        modifiers: set(modifiers),
        annotations: BTreeSet::new(),
    }
}

const ALL_OK: AttributeOutcome = AttributeOutcome {
    name_ok: true,
    type_ok: true,
    modifiers_ok: true,
    annotations_ok: true,
};

#[test]
fn plain_int_attribute_matches() {
    let outcome = match_attribute(&expected("id", "int", &[]), &[field("id", "int", None, &[])]);
    assert_eq!(outcome, ALL_OK);
    assert!(outcome.violations().is_empty());
}

#[test]
fn raw_list_fails_generic_type_only() {
    let outcome = match_attribute(
        &expected("items", "List<String>", &[]),
        &[field("items", "List", None, &[])],
    );
    assert_eq!(
        outcome,
        AttributeOutcome {
            type_ok: false,
            ..ALL_OK
        }
    );
}

#[test]
fn missing_final_fails_modifiers_only() {
    let outcome = match_attribute(
        &expected("count", "int", &["private", "final"]),
        &[field("count", "int", None, &["private"])],
    );
    assert_eq!(
        outcome,
        AttributeOutcome {
            modifiers_ok: false,
            ..ALL_OK
        }
    );
}

#[test]
fn extra_modifier_fails() {
    let outcome = match_attribute(
        &expected("count", "int", &["private"]),
        &[field("count", "int", None, &["private", "static"])],
    );
    assert!(!outcome.modifiers_ok);
    // Omitted modifiers mean "none", not "any"
    let outcome = match_attribute(
        &expected("count", "int", &[]),
        &[field("count", "int", None, &["public"])],
    );
    assert!(!outcome.modifiers_ok);
}

#[test]
fn absent_field_fails_every_criterion() {
    let outcome = match_attribute(
        &expected("name", "String", &[]),
        &[field("id", "int", None, &[]), field("title", "String", None, &[])],
    );
    assert_eq!(outcome, AttributeOutcome::default());
    assert_eq!(outcome.violations().len(), 4);
}

#[test]
fn annotations_compare_as_sets() {
    let mut exp = expected("id", "long", &[]);
    exp.annotations = set(&["Id", "GeneratedValue"]);
    let mut f = field("id", "long", None, &[]);
    f.annotations = set(&["GeneratedValue", "Id"]);
    assert_eq!(match_attribute(&exp, &[f.clone()]), ALL_OK);

    f.annotations = set(&["Id"]);
    let outcome = match_attribute(&exp, &[f]);
    assert!(!outcome.annotations_ok);
    assert!(outcome.type_ok && outcome.modifiers_ok);
}

#[test]
fn first_full_match_wins() {
    let outcome = match_attribute(
        &expected("x", "int", &[]),
        &[
            field("x", "int", None, &[]),
            field("x", "long", None, &["static"]),
        ],
    );
    assert_eq!(outcome, ALL_OK);
}

#[test]
fn last_same_named_field_decides_without_full_match() {
    // The first candidate is closer, but the last one examined is reported.
    let outcome = match_attribute(
        &expected("x", "int", &["private"]),
        &[
            field("x", "int", None, &[]),
            field("x", "long", None, &["private"]),
        ],
    );
    assert_eq!(
        outcome,
        AttributeOutcome {
            type_ok: false,
            ..ALL_OK
        }
    );
}

#[test]
fn wrong_case_hint_goes_on_the_name_failure_only() {
    let exp = expected("firstName", "String", &["private"]);
    let fields = [field("firstname", "String", None, &["private"])];
    let outcome = match_attribute(&exp, &fields);
    let failures = attribute_failures("Person", &exp, &outcome, &scan_field(&exp.name, &fields));

    let criteria: Vec<Criterion> = failures.iter().map(|f| f.criterion).collect();
    assert_eq!(
        criteria,
        vec![
            Criterion::Name,
            Criterion::Type,
            Criterion::Modifiers,
            Criterion::Annotations
        ]
    );
    for f in &failures {
        assert_eq!(f.class_name, "Person");
        assert_eq!(f.subject.as_deref(), Some("firstName"));
        assert!(f.message.contains("'firstName'"));
        assert_eq!(
            f.message.contains("'firstname'"),
            f.criterion == Criterion::Name,
            "{}",
            f.message
        );
    }
}
