//! Failure construction and summary rendering.

use crate::matcher::{AttributeCriterion, AttributeOutcome, EnumViolation};
use crate::scan::{ClassScan, FieldScan};
use crate::types::{ClassIdentity, Criterion, ExpectedAttribute, Failure, Summary};
use crate::{t, t_args};
use anyhow::Result;
use colored::Colorize;

/// One failure per violated criterion of an attribute. `hint` is appended to
/// the name failure only.
pub fn attribute_failures(
    class_name: &str,
    expected: &ExpectedAttribute,
    outcome: &AttributeOutcome,
    hint: &FieldScan,
) -> Vec<Failure> {
    outcome
        .violations()
        .into_iter()
        .map(|criterion| {
            let key = match criterion {
                AttributeCriterion::Name => "attribute-name",
                AttributeCriterion::Type => "attribute-type",
                AttributeCriterion::Modifiers => "attribute-modifiers",
                AttributeCriterion::Annotations => "attribute-annotations",
            };
            let mut message = t_args!(key,
                "attribute" => &expected.name,
                "class" => class_name
            );
            if criterion == AttributeCriterion::Name {
                if let Some(h) = field_hint(hint) {
                    message.push(' ');
                    message.push_str(&h);
                }
            }
            Failure {
                class_name: class_name.to_string(),
                subject: Some(expected.name.clone()),
                criterion: criterion.into(),
                message,
            }
        })
        .collect()
}

fn field_hint(scan: &FieldScan) -> Option<String> {
    match scan {
        FieldScan::WrongCase { found } => Some(t_args!("hint-wrong-case", "found" => found)),
        FieldScan::Typo { found } => Some(t_args!("hint-typo", "found" => found)),
        FieldScan::Found | FieldScan::NotFound => None,
    }
}

pub fn enum_failures(class_name: &str, violations: &[EnumViolation]) -> Vec<Failure> {
    violations
        .iter()
        .map(|v| {
            let (subject, message) = match v {
                EnumViolation::NoConstants => {
                    (None, t_args!("enum-no-constants", "class" => class_name))
                }
                EnumViolation::WrongCount { expected, observed } => (
                    None,
                    t_args!("enum-wrong-count",
                        "class" => class_name,
                        "expected" => expected,
                        "observed" => observed
                    ),
                ),
                EnumViolation::Missing(value) => (
                    Some(value.clone()),
                    t_args!("enum-missing", "class" => class_name, "value" => value),
                ),
            };
            Failure {
                class_name: class_name.to_string(),
                subject,
                criterion: v.criterion(),
                message,
            }
        })
        .collect()
}

pub fn class_not_found(identity: &ClassIdentity, scan: &ClassScan) -> Failure {
    let mut message = t_args!("class-not-found", "class" => &identity.name);
    let hint = match scan {
        ClassScan::CorrectNameMisplaced { package } => {
            Some(t_args!("hint-misplaced", "package" => package_label(package)))
        }
        ClassScan::CorrectNameMultipleTimesPresent { packages } => {
            let list: Vec<String> = packages.iter().map(|p| package_label(p)).collect();
            Some(t_args!("hint-multiple", "packages" => list.join(", ")))
        }
        ClassScan::WrongCase { found } => Some(t_args!("hint-wrong-case", "found" => found)),
        ClassScan::Typo { found } => Some(t_args!("hint-typo", "found" => found)),
        ClassScan::CorrectNameCorrectPlace | ClassScan::NotFound => None,
    };
    if let Some(h) = hint {
        message.push(' ');
        message.push_str(&h);
    }
    Failure {
        class_name: identity.name.clone(),
        subject: None,
        criterion: Criterion::ClassNotFound,
        message,
    }
}

fn package_label(package: &str) -> String {
    if package.is_empty() {
        t!("default-package")
    } else {
        package.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Normal,
    Compact,
    Terse,
    Final,
    Json,
}

pub fn render_human(
    summary: &Summary,
    hide_fails: bool,
    hide_passes: bool,
    kind: OutputKind,
) -> String {
    let mut out = String::new();
    match kind {
        // JSON goes through `render_json`
        OutputKind::Final | OutputKind::Json => {}
        OutputKind::Terse => {
            for u in &summary.units {
                let mark = if u.passed() {
                    ".".green().to_string()
                } else {
                    "F".red().bold().to_string()
                };
                out.push_str(&mark);
            }
            out.push('\n');
        }
        OutputKind::Compact => {
            for u in &summary.units {
                if u.passed() && !hide_passes {
                    out.push_str(&format!("{} {}\n", "[OK]".green().bold(), u.name));
                } else if !u.passed() && !hide_fails {
                    out.push_str(&format!(
                        "{} {} ({})\n",
                        "[FAIL]".red().bold(),
                        u.name,
                        t_args!("failure-count", "count" => u.failures.len())
                    ));
                }
            }
        }
        OutputKind::Normal => {
            for u in &summary.units {
                if u.passed() {
                    if !hide_passes {
                        out.push_str(&format!("{} {}\n", "[OK]".green().bold(), u.name.green()));
                    }
                    continue;
                }
                if hide_fails {
                    continue;
                }
                out.push_str(&format!("{} {}\n", "[FAIL]".red().bold(), u.name.red().bold()));
                if let Some(err) = &u.error {
                    out.push_str(&format!("  {} {}\n", t!("label-error").bold(), err.red()));
                }
                for f in &u.failures {
                    out.push_str(&format!(
                        "  {} {}\n",
                        format!("[{}]", f.criterion).bold(),
                        f.message
                    ));
                }
            }
        }
    }
    out.push_str(&render_totals(summary));
    out
}

fn render_totals(summary: &Summary) -> String {
    let failed = if summary.failed > 0 {
        summary.failed.to_string().red().bold().to_string()
    } else {
        summary.failed.to_string().green().to_string()
    };
    format!(
        "{}\n",
        t_args!("summary-totals",
            "total" => summary.total,
            "passed" => summary.passed.to_string().green(),
            "failed" => failed,
            "criteria" => summary.total_criteria,
            "failed_criteria" => summary.failed_criteria
        )
    )
}

pub fn render_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

pub fn print_human(summary: &Summary, hide_fails: bool, hide_passes: bool, kind: OutputKind) -> Result<()> {
    if kind == OutputKind::Json {
        println!("{}", render_json(summary)?);
    } else {
        print!("{}", render_human(summary, hide_fails, hide_passes, kind));
    }
    Ok(())
}
