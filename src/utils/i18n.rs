use chrono::Locale;
use tracing::warn;

/// Locales shipped in `locales/`
pub const AVAILABLE_LOCALES: &[&str] = &["en", "fi"];

/// Reduce tags like `en-US` or `fi_FI` to a shipped locale
pub fn normalize_locale(locale: &str) -> Option<&'static str> {
    let language = locale.split(['-', '_']).next().unwrap_or(locale).to_lowercase();
    AVAILABLE_LOCALES
        .iter()
        .copied()
        .find(|available| *available == language)
}

/// Set the locale used for board labels, falling back to English for unknown locales
pub fn set_locale(locale: &str) {
    match normalize_locale(locale) {
        Some(normalized) => rust_i18n::set_locale(normalized),
        None => {
            warn!("Unsupported locale {}, using en", locale);
            rust_i18n::set_locale("en");
        }
    }
}

/// Calendar locale for month and weekday names matching the current label locale
pub fn date_locale() -> Locale {
    date_locale_for(&rust_i18n::locale())
}

pub fn date_locale_for(locale: &str) -> Locale {
    match normalize_locale(locale) {
        Some("fi") => Locale::fi_FI,
        _ => Locale::en_US,
    }
}

pub fn happening_soon() -> String {
    t!("happening_soon").to_string()
}

pub fn later_today() -> String {
    t!("later_today").to_string()
}

/// Placeholder for a missing campus or location
pub fn not_available() -> String {
    t!("not_available").to_string()
}

pub fn no_events_today() -> String {
    t!("no_events_today").to_string()
}

pub fn no_important_events() -> String {
    t!("no_important_events").to_string()
}
