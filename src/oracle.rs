use crate::t_args;
use crate::types::{ClassIdentity, ExpectedAttribute, ExpectedClassStructure};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// `class` section of an oracle entry. Class level modifiers, superclass and
/// interfaces may be present but are checked elsewhere.
#[derive(Debug, Deserialize, Clone)]
pub struct RawClass {
    pub name: String,
    #[serde(default)]
    pub package: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawAttribute {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub modifiers: Option<Vec<String>>,
    pub annotations: Option<Vec<String>>,
}

/// One class entry of the oracle. Sections this crate does not check
/// (`methods`, `constructors`, ...) are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OracleEntry {
    pub class: Option<RawClass>,
    pub attributes: Option<Vec<RawAttribute>>,
    pub enum_values: Option<Vec<String>>,
}

impl OracleEntry {
    /// `None` unless the entry names a class and has attributes or enum values.
    pub fn expected_structure(&self) -> Option<ExpectedClassStructure> {
        let class = self.class.as_ref()?;
        if self.attributes.is_none() && self.enum_values.is_none() {
            return None;
        }
        let attributes = self.attributes.as_ref().map(|attrs| {
            attrs
                .iter()
                .map(|a| ExpectedAttribute {
                    name: a.name.clone(),
                    type_name: a.type_name.clone(),
                    modifiers: a.modifiers.iter().flatten().cloned().collect(),
                    annotations: a.annotations.iter().flatten().cloned().collect(),
                })
                .collect()
        });
        Some(ExpectedClassStructure {
            identity: ClassIdentity::new(&class.name, &class.package),
            attributes,
            enum_values: self.enum_values.clone(),
        })
    }
}

/// Parsed structure oracle.
#[derive(Debug, Clone, Default)]
pub struct OracleDocument {
    pub entries: Vec<OracleEntry>,
}

impl OracleDocument {
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: Vec<OracleEntry> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let entries: Vec<OracleEntry> = serde_yaml::from_str(content)?;
        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentFormat {
    Json,
    Yaml,
}

pub(crate) fn document_format(path: &Path) -> Option<DocumentFormat> {
    match path.extension()?.to_str()? {
        "json" => Some(DocumentFormat::Json),
        "yaml" | "yml" => Some(DocumentFormat::Yaml),
        _ => None,
    }
}

/// Expands directories into the documents they contain, sorted for a stable
/// order. Missing paths are skipped with a warning.
pub(crate) fn collect_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for p in paths {
        if p.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(p) {
                let entry = entry?;
                if entry.file_type().is_file() && document_format(entry.path()).is_some() {
                    found.push(entry.path().to_path_buf());
                }
            }
            found.sort();
            files.extend(found);
        } else if p.is_file() {
            files.push(p.clone());
        } else {
            warn!("skipping missing path {}", p.display());
        }
    }
    Ok(files)
}

/// Loads every oracle file under `paths` into one document. Returns `None`
/// when no oracle file exists or every one of them is blank, which callers
/// must treat as a configuration error rather than as an empty oracle.
pub fn load_oracle(paths: &[PathBuf]) -> Result<Option<OracleDocument>> {
    let mut doc: Option<OracleDocument> = None;
    for f in collect_documents(paths)? {
        let content = fs::read_to_string(&f)
            .with_context(|| t_args!("oracle-failed-to-read", "file" => f.display()))?;
        if content.trim().is_empty() {
            warn!("skipping blank oracle file {}", f.display());
            continue;
        }
        let part = match document_format(&f) {
            Some(DocumentFormat::Yaml) => OracleDocument::from_yaml(&content),
            // test.json is the conventional name, so anything else is JSON
            _ => OracleDocument::from_json(&content),
        }
        .with_context(|| t_args!("oracle-parse-error", "file" => f.display()))?;
        debug!("loaded {} oracle entries from {}", part.entries.len(), f.display());
        doc.get_or_insert_with(OracleDocument::default)
            .entries
            .extend(part.entries);
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_sections_is_skipped() {
        let doc = OracleDocument::from_json(
            r#"[{"class": {"name": "A", "package": "p"}, "methods": []}]"#,
        )
        .unwrap();
        assert!(doc.entries[0].expected_structure().is_none());
    }

    #[test]
    fn entry_without_class_is_skipped() {
        let doc = OracleDocument::from_json(r#"[{"attributes": []}]"#).unwrap();
        assert!(doc.entries[0].expected_structure().is_none());
    }

    #[test]
    fn omitted_modifiers_and_annotations_are_empty() {
        let doc = OracleDocument::from_json(
            r#"[{"class": {"name": "A", "package": "p"},
                 "attributes": [{"name": "id", "type": "int"}]}]"#,
        )
        .unwrap();
        let s = doc.entries[0].expected_structure().unwrap();
        let attrs = s.attributes.unwrap();
        assert!(attrs[0].modifiers.is_empty());
        assert!(attrs[0].annotations.is_empty());
        assert!(s.enum_values.is_none());
    }

    #[test]
    fn formats_by_extension() {
        assert_eq!(document_format(Path::new("test.json")), Some(DocumentFormat::Json));
        assert_eq!(document_format(Path::new("a/b.yml")), Some(DocumentFormat::Yaml));
        assert_eq!(document_format(Path::new("README.md")), None);
    }
}
