use std::collections::HashMap;
use std::sync::OnceLock;

/// Global localization state
static LOCALIZER: OnceLock<Localizer> = OnceLock::new();

/// Initialize the global localizer. Lookups initialize it lazily as well, so
/// calling this is only needed to pin the language early.
pub fn init() {
    localizer();
}

fn localizer() -> &'static Localizer {
    LOCALIZER.get_or_init(Localizer::new)
}

/// Get a localized message by key
pub fn t(key: &str) -> String {
    localizer().get(key)
}

/// Get a localized message by key with arguments (simplified)
pub fn t_with_args(key: &str, args: &[(&str, &dyn std::fmt::Display)]) -> String {
    localizer().get_with_args(key, args)
}

/// Localization manager
#[derive(Debug)]
pub struct Localizer {
    messages: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Localizer {
    fn new() -> Self {
        let language = Self::detect_language();
        Self::for_language(&language)
    }

    fn for_language(language: &str) -> Self {
        Self {
            messages: Self::load_messages(language),
            fallback: Self::load_messages("en"),
        }
    }

    fn detect_language() -> String {
        // Check environment variables in order of preference
        let lang_vars = ["LC_ALL", "LC_MESSAGES", "LANG"];

        for var in &lang_vars {
            if let Ok(value) = std::env::var(var) {
                // "nb_NO.UTF-8" -> "nb"
                let locale = value.split('.').next().unwrap_or(&value);
                let lang_code = locale
                    .split(['_', '-'])
                    .next()
                    .unwrap_or(locale)
                    .to_lowercase();

                match lang_code.as_str() {
                    "nb" | "no" | "nor" | "nn" | "nno" => return "nb".to_string(),
                    "en" => return "en".to_string(),
                    _ => continue,
                }
            }
        }

        "en".to_string()
    }

    fn load_messages(language: &str) -> HashMap<String, String> {
        let content = match language {
            "nb" => include_str!("../locales/nb.ftl"),
            _ => include_str!("../locales/en.ftl"),
        };

        // Simple `key = value` lines
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(" = "))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect()
    }

    fn get(&self, key: &str) -> String {
        self.messages
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| {
                tracing::warn!("missing translation key: {key}");
                format!("MISSING: {key}")
            })
    }

    fn get_with_args(&self, key: &str, args: &[(&str, &dyn std::fmt::Display)]) -> String {
        let mut message = self.get(key);

        // Simple string replacement for {$var} patterns
        for (var_name, value) in args {
            let placeholder = format!("{{${var_name}}}");
            message = message.replace(&placeholder, &format!("{value}"));
        }

        message
    }
}

// Convenience macros for common usage patterns
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::t($key)
    };
}

#[macro_export]
macro_rules! t_args {
    ($key:expr, $($name:expr => $value:expr),*) => {{
        let args: &[(&str, &dyn std::fmt::Display)] = &[
            $(
                ($name, &$value),
            )*
        ];
        $crate::i18n::t_with_args($key, args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_localization() {
        let localizer = Localizer::for_language("en");
        let message = localizer.get("cli-about");
        assert!(!message.is_empty());
        assert!(!message.starts_with("MISSING"));
    }

    #[test]
    fn test_arguments_are_substituted() {
        let localizer = Localizer::for_language("en");
        let args: &[(&str, &dyn std::fmt::Display)] = &[("class", &"Book")];
        let message = localizer.get_with_args("class-not-found", args);
        assert!(message.contains("Book"));
        assert!(!message.contains("{$class}"));
    }

    #[test]
    fn test_every_english_key_is_translated() {
        let en = Localizer::load_messages("en");
        let nb = Localizer::load_messages("nb");
        for key in en.keys() {
            assert!(nb.contains_key(key), "nb.ftl lacks {key}");
        }
    }

    #[test]
    fn test_language_detection() {
        let lang = Localizer::detect_language();
        assert!(lang == "en" || lang == "nb", "unexpected language {lang}");
    }
}
