//! Translation table and locale-aware formatting.

use std::fmt;

use chrono::NaiveDate;

/// Placeholder substituted in templated strings.
const PLACEHOLDER: &str = "{}";

/// Text shown for a date the host could not parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// Languages with a translation table. English is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Italian.
    It,
    /// English.
    #[default]
    En,
}

/// Localized strings used by the card and reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    /// Default card header.
    pub next_collection: &'static str,
    /// Days-remaining template with one `{}` placeholder.
    pub days_until: &'static str,
    /// Badge text for a collection due tomorrow.
    pub tomorrow: &'static str,
    /// Badge text for a collection due today.
    pub today: &'static str,
    /// Reminder title.
    pub notification_title: &'static str,
    /// Reminder body for an upcoming collection, `{}` is the collection type.
    pub notification_message: &'static str,
    /// Reminder body for a collection due today, `{}` is the collection type.
    pub notification_message_today: &'static str,
}

const ITALIAN: Translations = Translations {
    next_collection: "Prossimo conferimento",
    days_until: "tra {} giorni",
    tomorrow: "domani",
    today: "oggi",
    notification_title: "Promemoria raccolta differenziata",
    notification_message: "Domani è previsto il conferimento di {}",
    notification_message_today: "Oggi è previsto il conferimento di {}",
};

const ENGLISH: Translations = Translations {
    next_collection: "Next waste collection",
    days_until: "in {} days",
    tomorrow: "tomorrow",
    today: "today",
    notification_title: "Waste collection reminder",
    notification_message: "Tomorrow is scheduled for {} collection",
    notification_message_today: "Today is scheduled for {} collection",
};

impl Language {
    /// Every language with a table.
    pub const ALL: [Language; 2] = [Language::It, Language::En];

    /// Exact lookup by language code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "it" => Some(Language::It),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Resolve the host's language setting, falling back to English when it is
    /// missing, empty or has no table.
    #[must_use]
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }

    /// Language code of this table.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
        }
    }

    /// Translation table for this language.
    #[must_use]
    pub fn translations(self) -> &'static Translations {
        match self {
            Language::It => &ITALIAN,
            Language::En => &ENGLISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

impl Translations {
    /// Text for the urgency badge.
    ///
    /// `0` and `1` have dedicated words; every other value, negative included, goes
    /// through the `days_until` template. An unknown count renders as `?`.
    #[must_use]
    pub fn days_until_text(&self, days: Option<i64>) -> String {
        match days {
            Some(0) => self.today.to_owned(),
            Some(1) => self.tomorrow.to_owned(),
            Some(days) => fill(self.days_until, &days.to_string()),
            None => fill(self.days_until, "?"),
        }
    }

    /// Reminder body for a collection of the given type.
    #[must_use]
    pub fn reminder_message(&self, label: &str, days: i64) -> String {
        let template = if days == 0 {
            self.notification_message_today
        } else {
            self.notification_message
        };
        fill(template, label)
    }
}

/// Short numeric date in the customary order of a host locale such as `it`, `de` or `en-GB`.
///
/// Independent of the translation tables: a locale without a table still gets its own
/// date order. Unknown locales use the US order.
#[must_use]
pub fn format_date(locale: &str, date: NaiveDate) -> String {
    let normalized = locale.trim().to_ascii_lowercase().replace('_', "-");
    let (primary, region) = match normalized.split_once('-') {
        Some((primary, region)) => (primary, Some(region)),
        None => (normalized.as_str(), None),
    };
    let pattern = match (primary, region) {
        ("en", None | Some("us")) => "%-m/%-d/%Y",
        ("en" | "fr" | "pt", _) => "%d/%m/%Y",
        ("it" | "es", _) => "%-d/%-m/%Y",
        ("de", _) => "%-d.%-m.%Y",
        ("nl", _) => "%-d-%-m-%Y",
        _ => "%-m/%-d/%Y",
    };
    date.format(pattern).to_string()
}

/// Substitute the first placeholder in `template`.
#[must_use]
pub fn fill(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}
