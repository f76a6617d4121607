use crate::oracle::OracleDocument;
use crate::t;
use crate::types::ExpectedClassStructure;
use thiserror::Error;
use tracing::debug;

/// Fatal configuration problems. Reported once per run, never per class.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{}", t!("error-no-oracle"))]
    MissingOracle,
    #[error("{}", t!("error-no-units"))]
    NoUnits,
}

/// Self-contained check of one class entry of the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationUnit {
    pub name: String,
    pub expected: ExpectedClassStructure,
}

impl VerificationUnit {
    pub fn new(expected: ExpectedClassStructure) -> Self {
        Self {
            name: format!("testAttributes[{}]", expected.identity.name),
            expected,
        }
    }
}

/// One unit per oracle entry that names a class and declares attributes or
/// enum values, in oracle order.
///
/// An absent oracle, or one that yields no unit at all, is an error: the
/// check must be given data or removed, it never passes vacuously.
pub fn generate_units(
    oracle: Option<&OracleDocument>,
) -> Result<Vec<VerificationUnit>, GenerationError> {
    let oracle = oracle.ok_or(GenerationError::MissingOracle)?;
    let units: Vec<VerificationUnit> = oracle
        .entries
        .iter()
        .filter_map(|entry| entry.expected_structure())
        .map(VerificationUnit::new)
        .collect();
    if units.is_empty() {
        return Err(GenerationError::NoUnits);
    }
    debug!(
        "generated {} units from {} oracle entries",
        units.len(),
        oracle.entries.len()
    );
    Ok(units)
}
