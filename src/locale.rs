//! Display labels and locale selection.
//!
//! Messages live in Fluent resources under `locales/` and are embedded at
//! build time. Lookups go to the active locale, then to `en-CA`, and finally
//! hand the key back, so a missing translation never blanks a label.

use fluent_templates::{loader::LanguageIdentifier, static_loader, Loader};
use unic_langid::langid;

pub const DEFAULT_LOCALE: &str = "en-CA";
pub const FALLBACK_LANGUAGE: LanguageIdentifier = langid!("en-CA");

/// Env vars consulted for the initial locale, in order.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "en-CA",
        // Terminal output, no bidi isolation marks around placeables.
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    BookNow,
    DepartureFrom,
    ArriveAt,
    JourneyTime,
    Price,
    Loading,
    SearchFailed,
    NoDepartures,
    Footer,
}

impl Label {
    pub fn key(self) -> &'static str {
        match self {
            Label::BookNow => "bookNow",
            Label::DepartureFrom => "departureFrom",
            Label::ArriveAt => "arriveAt",
            Label::JourneyTime => "journeyTime",
            Label::Price => "price",
            Label::Loading => "loading",
            Label::SearchFailed => "searchFailed",
            Label::NoDepartures => "noDepartures",
            Label::Footer => "footer",
        }
    }
}

fn lookup_id(lang: Option<&LanguageIdentifier>, key: &str) -> String {
    lang.and_then(|lang| LOCALES.try_lookup(lang, key))
        .or_else(|| LOCALES.try_lookup(&FALLBACK_LANGUAGE, key))
        .unwrap_or_else(|| key.to_string())
}

/// Looks `key` up for `locale`, then for the default locale, then gives the
/// key back unchanged.
pub fn lookup(locale: &str, key: &str) -> String {
    let lang = locale.parse::<LanguageIdentifier>().ok();
    lookup_id(lang.as_ref(), key)
}

pub fn is_supported(locale: &str) -> bool {
    locale
        .parse::<LanguageIdentifier>()
        .map_or(false, |id| LOCALES.locales().any(|l| *l == id))
}

/// The active display locale. Any identifier is accepted; ones that do not
/// parse or have no resources render with the default bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    current: String,
    lang: Option<LanguageIdentifier>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl Locale {
    pub fn new(id: impl Into<String>) -> Self {
        let current = id.into();
        let lang = current.parse().ok();
        Self { current, lang }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn set(&mut self, id: impl Into<String>) {
        *self = Self::new(id);
    }

    pub fn label(&self, label: Label) -> String {
        lookup_id(self.lang.as_ref(), label.key())
    }

    /// `strftime` pattern for a short wall-clock time.
    pub fn short_time_format(&self) -> &'static str {
        let french = self
            .lang
            .as_ref()
            .map_or(false, |id| id.language.as_str() == "fr");
        if french {
            "%H:%M"
        } else {
            "%-I:%M %p"
        }
    }
}

/// Turns a POSIX locale (`fr_CA.UTF-8`) into a canonical BCP-47 tag
/// (`fr-CA`). `C`, `POSIX`, empty and unparsable values mean "no preference".
pub fn normalize(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next().unwrap_or("").trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    tag.replace('_', "-")
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|id| id.to_string())
}

/// First usable preference wins, otherwise the default locale.
pub fn resolve_preferred<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|c| normalize(&c))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// `--locale` override first, then the POSIX locale variables.
pub fn from_env(flag: Option<String>) -> String {
    let env = LOCALE_ENV_VARS.iter().map(|var| std::env::var(var).ok());
    let resolved = resolve_preferred(std::iter::once(flag).chain(env));
    if !is_supported(&resolved) {
        log::debug!("No bundle for {}, labels fall back to {}", resolved, DEFAULT_LOCALE);
    }
    resolved
}

/// Maps a user selection to a locale id. The short forms pick the Canadian
/// bundles; anything else is taken as-is.
pub fn selection(input: &str) -> Option<String> {
    match input.trim() {
        "" => None,
        "en" => Some("en-CA".to_string()),
        "fr" => Some("fr-CA".to_string()),
        other => Some(other.to_string()),
    }
}
