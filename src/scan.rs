//! Near-miss classification for names that could not be found.
//!
//! Used to give students a hint when a class or attribute is missing because
//! of a wrong case, a typo or a wrong package. The hints never change whether
//! a criterion passes.

use crate::types::{ClassIdentity, ObservedField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassScan {
    CorrectNameCorrectPlace,
    CorrectNameMisplaced { package: String },
    CorrectNameMultipleTimesPresent { packages: Vec<String> },
    WrongCase { found: ClassIdentity },
    Typo { found: ClassIdentity },
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldScan {
    Found,
    WrongCase { found: String },
    Typo { found: String },
    NotFound,
}

/// Classifies how `expected` relates to the classes the introspector knows.
pub fn scan_class(expected: &ClassIdentity, known: &[ClassIdentity]) -> ClassScan {
    if known.contains(expected) {
        return ClassScan::CorrectNameCorrectPlace;
    }
    let same_name: Vec<&ClassIdentity> = known.iter().filter(|k| k.name == expected.name).collect();
    match same_name.as_slice() {
        [] => {}
        [only] => {
            return ClassScan::CorrectNameMisplaced {
                package: only.package.clone(),
            };
        }
        many => {
            return ClassScan::CorrectNameMultipleTimesPresent {
                packages: many.iter().map(|k| k.package.clone()).collect(),
            };
        }
    }
    if let Some(found) = known
        .iter()
        .find(|k| k.name.eq_ignore_ascii_case(&expected.name))
    {
        return ClassScan::WrongCase {
            found: found.clone(),
        };
    }
    match known.iter().find(|k| is_typo(&expected.name, &k.name)) {
        Some(found) => ClassScan::Typo {
            found: found.clone(),
        },
        None => ClassScan::NotFound,
    }
}

pub fn scan_field(expected_name: &str, fields: &[ObservedField]) -> FieldScan {
    if fields.iter().any(|f| f.name == expected_name) {
        return FieldScan::Found;
    }
    if let Some(f) = fields
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(expected_name))
    {
        return FieldScan::WrongCase {
            found: f.name.clone(),
        };
    }
    match fields.iter().find(|f| is_typo(expected_name, &f.name)) {
        Some(f) => FieldScan::Typo {
            found: f.name.clone(),
        },
        None => FieldScan::NotFound,
    }
}

fn is_typo(expected: &str, candidate: &str) -> bool {
    let allowed = if expected.chars().count() > 3 { 2 } else { 1 };
    let distance = edit_distance(&expected.to_lowercase(), &candidate.to_lowercase());
    distance > 0 && distance <= allowed
}

// Levenshtein distance over chars, single row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}
