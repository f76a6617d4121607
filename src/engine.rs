use crate::generator::VerificationUnit;
use crate::introspect::Introspector;
use crate::matcher::{match_attribute, match_enum_values};
use crate::report::{attribute_failures, class_not_found, enum_failures};
use crate::scan::{scan_class, scan_field};
use crate::types::{Summary, UnitResult};
use rayon::prelude::*;
use tracing::{debug, warn};

const CRITERIA_PER_ATTRIBUTE: usize = 4;
// Presence of constants and their count
const ENUM_BASE_CRITERIA: usize = 2;

impl VerificationUnit {
    /// Checks every expected attribute and enum value of this unit's class
    /// and collects one failure per violated criterion.
    pub fn verify<I: Introspector + ?Sized>(&self, introspector: &I) -> UnitResult {
        let identity = &self.expected.identity;
        let class_name = identity.name.as_str();
        let mut result = UnitResult {
            name: self.name.clone(),
            class_name: class_name.to_string(),
            failures: Vec::new(),
            error: None,
            checked_criteria: 0,
        };

        let observed = match introspector.introspect(identity) {
            Ok(Some(observed)) => observed,
            Ok(None) => {
                let scan = scan_class(identity, &introspector.known_classes());
                debug!("class {identity} not found: {scan:?}");
                result.checked_criteria = 1;
                result.failures.push(class_not_found(identity, &scan));
                return result;
            }
            Err(e) => {
                warn!("introspection of {identity} failed: {e:#}");
                result.error = Some(format!("{e:#}"));
                return result;
            }
        };

        if let Some(attributes) = &self.expected.attributes {
            for expected in attributes {
                let outcome = match_attribute(expected, &observed.fields);
                let hint = scan_field(&expected.name, &observed.fields);
                result.checked_criteria += CRITERIA_PER_ATTRIBUTE;
                result
                    .failures
                    .extend(attribute_failures(class_name, expected, &outcome, &hint));
            }
        }

        if let Some(values) = &self.expected.enum_values {
            let violations = match_enum_values(values, &observed.enum_constants);
            result.checked_criteria += ENUM_BASE_CRITERIA + values.len();
            result.failures.extend(enum_failures(class_name, &violations));
        }

        result
    }
}

/// Runs all units against `introspector`. Units are independent, so they run
/// on the rayon pool unless `serial` is set; results keep unit order either way.
pub fn run_units<I: Introspector + ?Sized>(
    introspector: &I,
    units: &[VerificationUnit],
    serial: bool,
) -> Summary {
    let results: Vec<UnitResult> = if serial {
        units.iter().map(|u| u.verify(introspector)).collect()
    } else {
        units.par_iter().map(|u| u.verify(introspector)).collect()
    };
    Summary::from_units(results)
}
