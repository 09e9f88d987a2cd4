use chrono::{DateTime, Local, NaiveTime};
use raccolta_core::{
    CardConfig, CardInfo, CollectionCard, Language, Reminder, ReminderSettings, SnapshotSource,
    StateSnapshot, VisualTree, reminders,
};
use serde_json::{Map, Value};

use crate::source::FileSource;

pub(crate) struct App {
    pub info: CardInfo,
    pub card: CollectionCard,
    pub source: FileSource,

    pub tree: VisualTree,
    pub reminder_settings: ReminderSettings,
    pub notify_at: NaiveTime,
    pub reminders: Vec<Reminder>,

    pub language_override: Option<Language>,
    pub last_refresh: Option<DateTime<Local>>,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        info: CardInfo,
        source: FileSource,
        card_config: Value,
        reminder_settings: ReminderSettings,
    ) -> Self {
        let mut app = Self {
            info,
            card: CollectionCard::new(),
            source,
            tree: VisualTree::Empty,
            notify_at: reminder_settings.notify_at(),
            reminder_settings,
            reminders: Vec::new(),
            language_override: None,
            last_refresh: None,
            error_message: None,
        };
        app.apply_config(card_config);
        app
    }

    /// Language actually handed to the card.
    pub(crate) fn language(&self) -> Language {
        self.language_override
            .unwrap_or_else(|| Language::resolve(self.source.language()))
    }

    pub(crate) fn show_count(&self) -> usize {
        self.card
            .config()
            .and_then(|config| config.show_count())
            .unwrap_or(1)
    }

    /// Reload the snapshot and rebuild the tree and reminders.
    pub(crate) fn refresh(&mut self) {
        match self.source.snapshot() {
            Ok(snapshot) => {
                if snapshot.is_empty() {
                    tracing::warn!(path = %self.source.path().display(), "snapshot holds no entities");
                }
                self.render(&snapshot);
                self.last_refresh = Some(Local::now());
                if self.card.config().is_some() {
                    self.error_message = None;
                }
            }
            Err(err) => {
                tracing::warn!(%err, path = %self.source.path().display(), "failed to load snapshot");
                self.error_message = Some(format!("Failed to load snapshot: {err}"));
            }
        }
    }

    fn render(&mut self, snapshot: &StateSnapshot) {
        let language = self
            .language_override
            .map(Language::code)
            .or_else(|| self.source.language());
        self.tree = self.card.render(Some(snapshot), language);
        self.reminders = reminders(
            snapshot,
            self.card.sensors(),
            self.language(),
            &self.reminder_settings,
        );
    }

    /// Bump `show_count` by `delta` and run the result through configuration intake.
    pub(crate) fn change_show_count(&mut self, delta: i64) {
        let current = i64::try_from(self.show_count()).unwrap_or(i64::MAX);
        let next = current.saturating_add(delta).max(1);
        let mut table = match self.card.config().map(CardConfig::raw) {
            Some(Value::Object(table)) => table.clone(),
            _ => Map::new(),
        };
        table.insert(String::from("show_count"), Value::from(next));
        self.apply_config(Value::Object(table));
    }

    pub(crate) fn cycle_language(&mut self) {
        let current = self.language();
        let next = Language::ALL
            .iter()
            .cycle()
            .skip_while(|language| **language != current)
            .nth(1)
            .copied()
            .unwrap_or_default();
        self.language_override = Some(next);
    }

    fn apply_config(&mut self, raw: Value) {
        if let Err(err) = self.card.set_config(&raw) {
            self.error_message = Some(format!("Card configuration rejected: {err}"));
        }
    }
}
