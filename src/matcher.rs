//! Attribute and enum value comparison.
//!
//! Comparison is purely name based: types, modifiers and annotations are
//! matched on their simple names only, so two types sharing a simple name in
//! different packages are indistinguishable.

use crate::types::{Criterion, ExpectedAttribute, ObservedField};
use std::collections::BTreeSet;

/// The criteria checked per attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCriterion {
    Name,
    Type,
    Modifiers,
    Annotations,
}

impl From<AttributeCriterion> for Criterion {
    fn from(c: AttributeCriterion) -> Self {
        match c {
            AttributeCriterion::Name => Criterion::Name,
            AttributeCriterion::Type => Criterion::Type,
            AttributeCriterion::Modifiers => Criterion::Modifiers,
            AttributeCriterion::Annotations => Criterion::Annotations,
        }
    }
}

/// Outcome of matching one expected attribute against a class's fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeOutcome {
    pub name_ok: bool,
    pub type_ok: bool,
    pub modifiers_ok: bool,
    pub annotations_ok: bool,
}

impl AttributeOutcome {
    fn is_match(&self) -> bool {
        self.type_ok && self.modifiers_ok && self.annotations_ok
    }

    /// Criteria that did not hold, in reporting order.
    pub fn violations(&self) -> Vec<AttributeCriterion> {
        [
            (self.name_ok, AttributeCriterion::Name),
            (self.type_ok, AttributeCriterion::Type),
            (self.modifiers_ok, AttributeCriterion::Modifiers),
            (self.annotations_ok, AttributeCriterion::Annotations),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, c)| c)
        .collect()
    }
}

/// Scans `observed` in declaration order for fields named like `expected`.
///
/// The first same-named field that matches on type, modifiers and annotations
/// wins. Without such a field the outcome is the one of the *last* same-named
/// field, not of the closest candidate. Valid classes never declare two fields
/// with the same name, so this only shows with hand-made descriptors.
pub fn match_attribute(expected: &ExpectedAttribute, observed: &[ObservedField]) -> AttributeOutcome {
    let mut outcome = AttributeOutcome::default();
    for field in observed {
        if field.name != expected.name {
            continue;
        }
        outcome = AttributeOutcome {
            name_ok: true,
            type_ok: type_matches(&expected.type_name, field),
            modifiers_ok: sets_match(&expected.modifiers, &field.modifiers),
            annotations_ok: sets_match(&expected.annotations, &field.annotations),
        };
        if outcome.is_match() {
            break;
        }
    }
    outcome
}

/// Expected type as written in the oracle.
#[derive(Debug, PartialEq, Eq)]
pub enum ExpectedType<'a> {
    Simple(&'a str),
    Generic { outer: &'a str, inner: String },
}

impl<'a> ExpectedType<'a> {
    /// `Outer<Inner>` yields the text before the first `<` and the text up to
    /// the next `<` with closing brackets stripped. Deeper nesting and further
    /// type arguments are not understood.
    pub fn parse(type_name: &'a str) -> Self {
        if !(type_name.contains('<') && type_name.contains('>')) {
            return ExpectedType::Simple(type_name);
        }
        let (outer, rest) = type_name.split_once('<').unwrap_or((type_name, ""));
        let inner = rest.split('<').next().unwrap_or_default().replace('>', "");
        ExpectedType::Generic { outer, inner }
    }
}

pub fn type_matches(expected_type: &str, field: &ObservedField) -> bool {
    match ExpectedType::parse(expected_type) {
        ExpectedType::Simple(name) => name == field.declared_type_name,
        ExpectedType::Generic { outer, inner } => {
            let outer_ok = outer == field.declared_type_name;
            // A raw (non-parameterized) field never satisfies a generic type.
            let inner_ok = field
                .generic_argument_type_name
                .as_deref()
                .is_some_and(|arg| arg == inner);
            outer_ok && inner_ok
        }
    }
}

// An empty expected set means "none", not "don't care".
fn sets_match(expected: &BTreeSet<String>, observed: &BTreeSet<String>) -> bool {
    expected == observed
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumViolation {
    NoConstants,
    WrongCount { expected: usize, observed: usize },
    Missing(String),
}

impl EnumViolation {
    pub fn criterion(&self) -> Criterion {
        match self {
            EnumViolation::NoConstants => Criterion::EnumConstants,
            EnumViolation::WrongCount { .. } => Criterion::Count,
            EnumViolation::Missing(_) => Criterion::Membership,
        }
    }
}

/// Compares expected enum constant names against the observed ones.
///
/// A count mismatch does not stop the membership checks. Observed constants
/// that were not expected only show up through the count.
pub fn match_enum_values(expected: &[String], observed: &[String]) -> Vec<EnumViolation> {
    let mut violations = Vec::new();
    if observed.is_empty() {
        violations.push(EnumViolation::NoConstants);
    }
    if expected.len() != observed.len() {
        violations.push(EnumViolation::WrongCount {
            expected: expected.len(),
            observed: observed.len(),
        });
    }
    for value in expected {
        if !observed.iter().any(|o| o == value) {
            violations.push(EnumViolation::Missing(value.clone()));
        }
    }
    violations
}
