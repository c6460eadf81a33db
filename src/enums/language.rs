use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Languages the scanner knows how to attribute files to. The extension
/// sets mirror the pattern files shipped under `intelligence/languages/`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Language {
    #[serde(rename = "php")]
    Php,
    #[serde(rename = "java")]
    Java,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "javascript")]
    Javascript,
    #[serde(rename = "golang")]
    Golang,
    #[serde(rename = "ruby")]
    Ruby,
}

static EXTENSION_MAP: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for language in Language::all() {
        for ext in language.extensions() {
            map.insert(*ext, *language);
        }
    }
    map
});

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::Php,
            Language::Java,
            Language::Python,
            Language::Javascript,
            Language::Golang,
            Language::Ruby,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Php => "php",
            Language::Java => "java",
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Golang => "golang",
            Language::Ruby => "ruby",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Php => &["php", "phtml", "php3", "php4", "php5", "php7", "phps"],
            Language::Java => &["java", "jsp", "jspx"],
            Language::Python => &["py", "pyw"],
            Language::Javascript => &["js", "jsx", "ts", "tsx"],
            Language::Golang => &["go"],
            Language::Ruby => &["rb", "erb", "rake", "gemspec", "ru"],
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Language::all()
            .iter()
            .find(|language| language.as_str() == identifier.to_lowercase())
            .copied()
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        EXTENSION_MAP.get(extension.to_lowercase().as_str()).copied()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
