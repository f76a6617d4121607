//! Modifier flags as reported by JVM reflection, and their keyword form.

use std::collections::BTreeSet;

pub const PUBLIC: u32 = 0x0001;
pub const PRIVATE: u32 = 0x0002;
pub const PROTECTED: u32 = 0x0004;
pub const STATIC: u32 = 0x0008;
pub const FINAL: u32 = 0x0010;
pub const SYNCHRONIZED: u32 = 0x0020;
pub const VOLATILE: u32 = 0x0040;
pub const TRANSIENT: u32 = 0x0080;
pub const NATIVE: u32 = 0x0100;
pub const INTERFACE: u32 = 0x0200;
pub const ABSTRACT: u32 = 0x0400;
pub const STRICT: u32 = 0x0800;

// Order in which the platform prints modifiers.
const PRINT_ORDER: &[(u32, &str)] = &[
    (PUBLIC, "public"),
    (PROTECTED, "protected"),
    (PRIVATE, "private"),
    (ABSTRACT, "abstract"),
    (STATIC, "static"),
    (FINAL, "final"),
    (TRANSIENT, "transient"),
    (VOLATILE, "volatile"),
    (SYNCHRONIZED, "synchronized"),
    (NATIVE, "native"),
    (STRICT, "strictfp"),
    (INTERFACE, "interface"),
];

/// Keyword tokens for a flag set, in print order. Unknown bits (synthetic,
/// enum, ...) are dropped.
pub fn tokens_from_flags(flags: u32) -> Vec<&'static str> {
    PRINT_ORDER
        .iter()
        .filter(|(bit, _)| flags & bit != 0)
        .map(|(_, kw)| *kw)
        .collect()
}

/// Normalizes free-form modifier strings ("private final", "Static") into a
/// set of lowercase tokens.
pub fn normalize<'a, I>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter()
        .flat_map(str::split_whitespace)
        .map(str::to_lowercase)
        .collect()
}
