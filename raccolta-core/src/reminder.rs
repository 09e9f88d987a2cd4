//! Collection reminders built from the same sensors the card shows.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::model::{EntityId, StateSnapshot};
use crate::view::{DEFAULT_COLOR, DEFAULT_ICON};

const DEFAULT_TIME: &str = "19:00";
const DEFAULT_HOUR: u32 = 19;

/// When and how far ahead reminders are raised.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Whether reminders are produced at all.
    pub enabled: bool,
    /// Time of day reminders go out, as `HH:MM`.
    pub time: String,
    /// How many days ahead of a collection to start reminding.
    pub days_before: i64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            time: DEFAULT_TIME.to_owned(),
            days_before: 1,
        }
    }
}

impl ReminderSettings {
    /// Parsed reminder time; malformed values fall back to 19:00.
    #[must_use]
    pub fn notify_at(&self) -> NaiveTime {
        parse_hour_minute(&self.time).unwrap_or_else(|| {
            tracing::warn!(time = %self.time, "invalid reminder time, using {DEFAULT_TIME}");
            NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap_or_default()
        })
    }
}

fn parse_hour_minute(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.trim().split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// A reminder ready to hand to a notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub message: String,
    /// Tag grouping reminders for the same collection type.
    pub tag: String,
    /// Collection colour.
    pub color: String,
    /// Collection icon.
    pub icon: String,
    /// Days remaining until the collection.
    pub days_until: i64,
}

/// Reminders for every present sensor due within `settings.days_before` days.
///
/// Overdue collections and sensors without a day count are skipped. Returns nothing
/// when reminders are disabled.
#[must_use]
pub fn reminders(
    snapshot: &StateSnapshot,
    sensors: &[EntityId],
    language: Language,
    settings: &ReminderSettings,
) -> Vec<Reminder> {
    if !settings.enabled {
        return Vec::new();
    }

    let translations = language.translations();
    sensors
        .iter()
        .filter_map(|id| snapshot.get(id))
        .filter_map(|state| {
            let days = state.days_until()?;
            if !(0..=settings.days_before).contains(&days) {
                return None;
            }
            Some(Reminder {
                title: translations.notification_title.to_owned(),
                message: translations.reminder_message(&state.state, days),
                tag: format!("raccolta_differenziata_{}", state.state),
                color: state.color().unwrap_or(DEFAULT_COLOR).to_owned(),
                icon: state.icon().unwrap_or(DEFAULT_ICON).to_owned(),
                days_until: days,
            })
        })
        .collect()
}
