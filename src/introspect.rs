use crate::modifiers;
use crate::oracle::{DocumentFormat, collect_documents, document_format};
use crate::t_args;
use crate::types::{ClassIdentity, ObservedClass, ObservedField};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Source of structural metadata for submitted classes.
pub trait Introspector: Send + Sync {
    /// Declared fields and enum constants of one class, `None` if no such
    /// class exists.
    fn introspect(&self, identity: &ClassIdentity) -> Result<Option<ObservedClass>>;
    /// Every class this introspector can see. Only used for hints.
    fn known_classes(&self) -> Vec<ClassIdentity>;
}

/// Introspector over class descriptors dumped from the submission, either
/// loaded from JSON/YAML files or built in memory.
#[derive(Debug, Clone, Default)]
pub struct DescriptorIntrospector {
    classes: IndexMap<ClassIdentity, ObservedClass>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    pub access_flags: Option<u32>,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
    #[serde(default)]
    pub enum_constants: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawClassDescriptor>),
    One(RawClassDescriptor),
}

impl From<OneOrMany> for Vec<RawClassDescriptor> {
    fn from(v: OneOrMany) -> Self {
        match v {
            OneOrMany::Many(ds) => ds,
            OneOrMany::One(d) => vec![d],
        }
    }
}

/// `java.util.Map$Entry` -> `Entry`
pub fn simple_type_name(name: &str) -> &str {
    let tail = name.rsplit('.').next().unwrap_or(name);
    tail.rsplit('$').next().unwrap_or(tail)
}

/// Type arguments keep everything after the last dot, like the platform's
/// printed form does.
fn simple_argument_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// `@javax.validation.constraints.Size(max = 3)` -> `Size`
pub fn simple_annotation_name(name: &str) -> &str {
    let name = name.trim().trim_start_matches('@');
    let name = name.split('(').next().unwrap_or(name).trim_end();
    name.rsplit('.').next().unwrap_or(name)
}

impl From<RawField> for ObservedField {
    fn from(raw: RawField) -> Self {
        let mut modifiers = modifiers::normalize(raw.modifiers.iter().map(String::as_str));
        if let Some(flags) = raw.access_flags {
            modifiers.extend(modifiers::tokens_from_flags(flags).into_iter().map(String::from));
        }
        ObservedField {
            declared_type_name: simple_type_name(&raw.type_name).to_string(),
            generic_argument_type_name: raw
                .type_arguments
                .first()
                .map(|arg| simple_argument_name(arg).to_string()),
            modifiers,
            annotations: raw
                .annotations
                .iter()
                .map(|a| simple_annotation_name(a).to_string())
                .collect(),
            name: raw.name,
        }
    }
}

impl From<RawClassDescriptor> for ObservedClass {
    fn from(raw: RawClassDescriptor) -> Self {
        ObservedClass {
            identity: ClassIdentity::new(raw.name, raw.package),
            fields: raw.fields.into_iter().map(ObservedField::from).collect(),
            enum_constants: raw.enum_constants,
        }
    }
}

impl DescriptorIntrospector {
    pub fn from_classes(classes: impl IntoIterator<Item = ObservedClass>) -> Self {
        let mut this = Self::default();
        for class in classes {
            this.insert(class);
        }
        this
    }

    /// Later descriptors of the same class replace earlier ones.
    pub fn insert(&mut self, class: ObservedClass) {
        if let Some(old) = self.classes.insert(class.identity.clone(), class) {
            debug!("replaced descriptor of {}", old.identity);
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: OneOrMany = serde_json::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: OneOrMany = serde_yaml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: OneOrMany) -> Self {
        let descriptors: Vec<RawClassDescriptor> = raw.into();
        Self::from_classes(descriptors.into_iter().map(ObservedClass::from))
    }

    /// Loads all descriptor files found under `paths` (files or directories).
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut this = Self::default();
        for f in collect_documents(paths)? {
            let content = fs::read_to_string(&f)
                .with_context(|| t_args!("descriptor-failed-to-read", "file" => f.display()))?;
            let part = match document_format(&f) {
                Some(DocumentFormat::Yaml) => Self::from_yaml(&content),
                _ => Self::from_json(&content),
            }
            .with_context(|| t_args!("descriptor-parse-error", "file" => f.display()))?;
            debug!("loaded {} class descriptors from {}", part.len(), f.display());
            for class in part.classes.into_values() {
                this.insert(class);
            }
        }
        Ok(this)
    }
}

impl Introspector for DescriptorIntrospector {
    fn introspect(&self, identity: &ClassIdentity) -> Result<Option<ObservedClass>> {
        Ok(self.classes.get(identity).cloned())
    }

    fn known_classes(&self) -> Vec<ClassIdentity> {
        self.classes.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn simple_names() {
        assert_eq!(simple_type_name("java.util.List"), "List");
        assert_eq!(simple_type_name("java.util.Map$Entry"), "Entry");
        assert_eq!(simple_type_name("int"), "int");
        assert_eq!(simple_argument_name("java.lang.String"), "String");
        assert_eq!(simple_argument_name("java.util.Map$Entry"), "Map$Entry");
        assert_eq!(simple_annotation_name("@javax.persistence.Id"), "Id");
        assert_eq!(simple_annotation_name("@Size(max = 3)"), "Size");
        assert_eq!(simple_annotation_name("Override"), "Override");
    }

    #[test]
    fn field_normalization() {
        let raw = RawField {
            name: "items".into(),
            type_name: "java.util.List".into(),
            type_arguments: vec!["java.lang.String".into(), "ignored".into()],
            modifiers: vec!["Protected".into()],
            access_flags: Some(modifiers::STATIC | modifiers::FINAL),
            annotations: vec!["@org.jetbrains.annotations.NotNull".into()],
        };
        let f = ObservedField::from(raw);
        assert_eq!(f.declared_type_name, "List");
        assert_eq!(f.generic_argument_type_name.as_deref(), Some("String"));
        assert_eq!(f.modifiers, set(&["protected", "static", "final"]));
        assert_eq!(f.annotations, set(&["NotNull"]));
    }

    #[test]
    fn single_descriptor_or_list() {
        let one = DescriptorIntrospector::from_json(r#"{"name": "A", "package": "p"}"#).unwrap();
        assert_eq!(one.len(), 1);
        let many = DescriptorIntrospector::from_yaml(
            "- name: A\n  package: p\n- name: B\n  package: p\n  enumConstants: [X]\n",
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        let b = many
            .introspect(&ClassIdentity::new("B", "p"))
            .unwrap()
            .unwrap();
        assert_eq!(b.enum_constants, vec!["X".to_string()]);
        assert!(many.introspect(&ClassIdentity::new("C", "p")).unwrap().is_none());
    }
}
