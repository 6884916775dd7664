// crates/domain/src/locale.rs

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Locale
// ─────────────────────────────────────────────────────────────────────────────

/// The two locales content is authored in.
///
/// Every bilingual field is stored twice, once per locale, with the locale
/// suffix appended to the logical field name (`headingPl`, `headingEn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Pl,
    En,
}

/// Locale of last resort: its fields are authoritative and are consulted
/// whenever the requested locale's field is absent.
pub const DEFAULT_LOCALE: Locale = Locale::Pl;

/// All supported locales, default first.
pub const LOCALES: [Locale; 2] = [Locale::Pl, Locale::En];

impl Locale {
    /// Lowercase code as used in URLs and cache keys.
    pub const fn code(self) -> &'static str {
        match self {
            Locale::Pl => "pl",
            Locale::En => "en",
        }
    }

    /// Capitalized code appended to a logical field name.
    pub const fn suffix(self) -> &'static str {
        match self {
            Locale::Pl => "Pl",
            Locale::En => "En",
        }
    }

    /// Parse a locale code. Case-insensitive; region tags (`en-GB`, `pl_PL`)
    /// are accepted and ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        match value.split(['-', '_']).next().unwrap_or("") {
            "pl" => Some(Locale::Pl),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Locale for a URL segment; anything unrecognised is the default locale.
    pub fn from_segment(segment: &str) -> Self {
        Self::parse(segment).unwrap_or(DEFAULT_LOCALE)
    }

    /// Concrete field name for a logical field in this locale.
    pub fn field(self, base: &str) -> String {
        format!("{}{}", base, self.suffix())
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
