//! Target language catalog

/// Language code treated as "no translation needed"
pub const DEFAULT_CODE: &str = "en";

/// Display name used when a language code is not in the catalog.
/// An unrecognized code never fails the pipeline; prompts fall back
/// to this generic name.
pub const FALLBACK_NAME: &str = "the selected language";

/// A selectable target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// All selectable target languages
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "ru", name: "Russian" },
    Language { code: "ar", name: "Arabic" },
];

/// Look up a language by its code
pub fn find(code: &str) -> Option<Language> {
    LANGUAGES.iter().copied().find(|l| l.code == code)
}

/// Display name for a code, falling back to the generic placeholder
pub fn display_name(code: &str) -> &'static str {
    find(code).map(|l| l.name).unwrap_or(FALLBACK_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_code() {
        assert_eq!(find("es").map(|l| l.name), Some("Spanish"));
        assert_eq!(find("en").map(|l| l.name), Some("English"));
    }

    #[test]
    fn find_unknown_code() {
        assert!(find("xx").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(display_name("ja"), "Japanese");
        assert_eq!(display_name("xx"), FALLBACK_NAME);
    }

    #[test]
    fn default_code_is_in_catalog() {
        assert!(find(DEFAULT_CODE).is_some());
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in LANGUAGES.iter().enumerate() {
            for b in &LANGUAGES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }
}
