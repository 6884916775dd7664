// crates/domain/src/category.rs

use crate::locale::Locale;

/// Controlled vocabulary of project categories: `(key, pl, en)`.
pub const CATEGORY_LABELS: &[(&str, &str, &str)] = &[
    ("elektronika-pcb", "Elektronika & PCB", "Electronics & PCB"),
    ("firmware-embedded", "Firmware & Embedded", "Firmware & Embedded"),
    ("mechanika-wzornictwo", "Mechanika & Wzornictwo", "Mechanics & Design"),
    ("iot-automatyka", "IoT & Automatyka", "IoT & Automation"),
    ("medycyna", "Medycyna & Sprzęt Medyczny", "Medical & Medical Equipment"),
    ("motoryzacja", "Motoryzacja", "Automotive"),
    ("wearables", "Wearables", "Wearables"),
    ("inne", "Inne", "Other"),
];

/// Vocabulary label for a category key in the given locale.
pub fn vocabulary_label(key: &str, locale: Locale) -> Option<&'static str> {
    CATEGORY_LABELS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, pl, en)| match locale {
            Locale::Pl => *pl,
            Locale::En => *en,
        })
}

/// Display label for a record's category.
///
/// A non-empty free-text override wins regardless of locale; otherwise the
/// key is looked up in the vocabulary. Unknown keys have no label.
pub fn category_label(
    category: Option<&str>,
    custom: Option<&str>,
    locale: Locale,
) -> Option<String> {
    if let Some(custom) = custom.filter(|c| !c.is_empty()) {
        return Some(custom.to_owned());
    }
    category
        .and_then(|key| vocabulary_label(key, locale))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_override_wins_in_every_locale() {
        for locale in [Locale::Pl, Locale::En] {
            assert_eq!(
                category_label(Some("elektronika-pcb"), Some("Custom X"), locale).as_deref(),
                Some("Custom X")
            );
        }
    }

    #[test]
    fn vocabulary_lookup_is_locale_specific() {
        assert_eq!(
            category_label(Some("elektronika-pcb"), None, Locale::Pl).as_deref(),
            Some("Elektronika & PCB")
        );
        assert_eq!(
            category_label(Some("elektronika-pcb"), None, Locale::En).as_deref(),
            Some("Electronics & PCB")
        );
    }

    #[test]
    fn unknown_key_has_no_label() {
        assert_eq!(category_label(Some("kosmos"), None, Locale::En), None);
        assert_eq!(category_label(None, None, Locale::Pl), None);
    }

    #[test]
    fn empty_override_is_ignored() {
        assert_eq!(
            category_label(Some("inne"), Some(""), Locale::En).as_deref(),
            Some("Other")
        );
    }
}
