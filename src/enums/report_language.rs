use std::fmt;

/// Display languages the report can be rendered in. The canonical working
/// language is always English; anything else goes through the translator.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReportLanguage {
    English,
    Japanese,
}

impl ReportLanguage {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "en" => Some(ReportLanguage::English),
            "ja" => Some(ReportLanguage::Japanese),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReportLanguage::English => "en",
            ReportLanguage::Japanese => "ja",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReportLanguage::English => "English",
            ReportLanguage::Japanese => "Japanese",
        }
    }
}

impl fmt::Display for ReportLanguage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
