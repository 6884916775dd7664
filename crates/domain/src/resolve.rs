// crates/domain/src/resolve.rs

//! Localized field resolution.
//!
//! A bilingual field `heading` is stored as `headingPl` and `headingEn`. For a
//! requested locale the resolver reads, in this fixed order:
//!
//!   1. `record[base + locale.suffix()]`
//!   2. `record[base + default.suffix()]`
//!   3. the caller's fallback
//!
//! When the requested locale *is* the default, steps 1 and 2 read the same
//! key; the key is read once.
//!
//! Resolution never fails. A `null` or non-object record simply has no
//! fields, so every lookup falls through to the fallback. Callers decide
//! record-level absence ("no such document") before resolving fields.

use crate::locale::{Locale, DEFAULT_LOCALE};
use serde_json::Value as Json;

/// What an empty string means for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    /// `""` is treated like a missing field and resolution continues.
    #[default]
    Absent,
    /// `""` is a real value and stops resolution.
    Present,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedResolver {
    default: Locale,
    empty: EmptyPolicy,
}

impl Default for LocalizedResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl LocalizedResolver {
    pub const fn new(default: Locale) -> Self {
        Self {
            default,
            empty: EmptyPolicy::Absent,
        }
    }

    pub const fn with_empty_policy(mut self, empty: EmptyPolicy) -> Self {
        self.empty = empty;
        self
    }

    pub const fn default_locale(&self) -> Locale {
        self.default
    }

    pub const fn empty_policy(&self) -> EmptyPolicy {
        self.empty
    }

    /// Is this candidate value usable, or should resolution continue?
    fn usable(&self, v: &Json) -> bool {
        match v {
            Json::Null => false,
            Json::String(s) if s.is_empty() => self.empty == EmptyPolicy::Present,
            _ => true,
        }
    }

    /// Raw candidate selection: the requested locale's value, else the default
    /// locale's value, else `None`.
    pub fn pick<'a>(&self, record: &'a Json, base: &str, locale: Locale) -> Option<&'a Json> {
        let primary = record
            .get(locale.field(base))
            .filter(|v| self.usable(v));

        if primary.is_some() || locale == self.default {
            return primary;
        }

        record
            .get(self.default.field(base))
            .filter(|v| self.usable(v))
    }

    /// Like [`pick`](Self::pick) but only string candidates count.
    fn pick_str<'a>(&self, record: &'a Json, base: &str, locale: Locale) -> Option<&'a str> {
        let primary = record
            .get(locale.field(base))
            .filter(|v| self.usable(v))
            .and_then(Json::as_str);

        if primary.is_some() || locale == self.default {
            return primary;
        }

        record
            .get(self.default.field(base))
            .filter(|v| self.usable(v))
            .and_then(Json::as_str)
    }

    /// Total text resolution: always produces a string.
    pub fn text(&self, record: &Json, base: &str, locale: Locale, fallback: &str) -> String {
        self.pick_str(record, base, locale)
            .unwrap_or(fallback)
            .to_owned()
    }

    /// Text resolution for optional fields: `None` when neither locale has it.
    pub fn opt_text(&self, record: &Json, base: &str, locale: Locale) -> Option<String> {
        self.pick_str(record, base, locale).map(str::to_owned)
    }

    /// Whole-array selection for array-valued bilingual fields. The array is
    /// chosen as a unit; elements are never mixed across locales.
    pub fn list(&self, record: &Json, base: &str, locale: Locale) -> Vec<Json> {
        let primary = record
            .get(locale.field(base))
            .and_then(Json::as_array);

        let chosen = match primary {
            Some(arr) => Some(arr),
            None if locale == self.default => None,
            None => record
                .get(self.default.field(base))
                .and_then(Json::as_array),
        };

        chosen.cloned().unwrap_or_default()
    }
}
