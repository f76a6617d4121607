use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Name and package of a class, as written in the oracle.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassIdentity {
    pub name: String,
    pub package: String,
}

impl ClassIdentity {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

impl fmt::Display for ClassIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedAttribute {
    pub name: String,
    /// Simple type name, or `Outer<Inner>` for a single level of generics.
    pub type_name: String,
    pub modifiers: BTreeSet<String>,
    pub annotations: BTreeSet<String>,
}

/// Required shape of one class. At least one of the two sections is present
/// for every structure that makes it into a verification unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedClassStructure {
    pub identity: ClassIdentity,
    pub attributes: Option<Vec<ExpectedAttribute>>,
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedField {
    pub name: String,
    pub declared_type_name: String,
    /// Simple name of the first type argument, only for parameterized types.
    pub generic_argument_type_name: Option<String>,
    pub modifiers: BTreeSet<String>,
    pub annotations: BTreeSet<String>,
}

/// Snapshot of a submitted class, fields and enum constants in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedClass {
    pub identity: ClassIdentity,
    pub fields: Vec<ObservedField>,
    pub enum_constants: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    Name,
    Type,
    Modifiers,
    Annotations,
    EnumConstants,
    Count,
    Membership,
    ClassNotFound,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Name => "name",
            Criterion::Type => "type",
            Criterion::Modifiers => "modifiers",
            Criterion::Annotations => "annotations",
            Criterion::EnumConstants => "enum-constants",
            Criterion::Count => "count",
            Criterion::Membership => "membership",
            Criterion::ClassNotFound => "class-not-found",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub class_name: String,
    /// Attribute name or enum value the failure is about.
    pub subject: Option<String>,
    pub criterion: Criterion,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitResult {
    pub name: String,
    pub class_name: String,
    pub failures: Vec<Failure>,
    pub error: Option<String>,
    // Criteria evaluated for this unit, failed ones included
    pub checked_criteria: usize,
}

impl UnitResult {
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,  // Total number of verification units
    pub passed: usize, // Number of passed units
    pub failed: usize, // Number of failed units
    pub units: Vec<UnitResult>,

    // Criterion-level counts for more granular reporting
    pub total_criteria: usize,
    pub passed_criteria: usize,
    pub failed_criteria: usize,
}

impl Summary {
    pub fn from_units(units: Vec<UnitResult>) -> Self {
        let passed = units.iter().filter(|u| u.passed()).count();
        let total_criteria: usize = units.iter().map(|u| u.checked_criteria).sum();
        let failed_criteria: usize = units.iter().map(|u| u.failures.len()).sum();
        Summary {
            total: units.len(),
            passed,
            failed: units.len() - passed,
            units,
            total_criteria,
            passed_criteria: total_criteria.saturating_sub(failed_criteria),
            failed_criteria,
        }
    }
}
