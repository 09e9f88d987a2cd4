//! Card facade combining configuration intake, sensor resolution and rendering.

use serde_json::Value;

use crate::config::CardConfig;
use crate::model::{EntityId, StateSnapshot};
use crate::ports::{CardError, SnapshotSource, SourceError};
use crate::resolver::resolve_sensors;
use crate::view::{VisualTree, render};

/// Layout height hint reported to the host.
const CARD_SIZE: u32 = 3;

/// Public entry point a host drives: configure once, render on every update.
#[derive(Debug, Default)]
pub struct CollectionCard {
    config: Option<CardConfig>,
    sensors: Vec<EntityId>,
}

impl CollectionCard {
    /// Create an unconfigured card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the card configuration.
    ///
    /// A rejected configuration also clears the previous one, so nothing renders until
    /// a valid configuration arrives.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidConfiguration`] when `raw` is absent or falsy.
    pub fn set_config(&mut self, raw: &Value) -> Result<(), CardError> {
        match CardConfig::from_value(raw) {
            Ok(config) => {
                self.config = Some(config);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "rejected card configuration");
                self.config = None;
                Err(err)
            }
        }
    }

    /// Current configuration, if one was accepted.
    #[must_use]
    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    /// Sensors found by the most recent render.
    #[must_use]
    pub fn sensors(&self) -> &[EntityId] {
        &self.sensors
    }

    /// Height hint in layout units.
    #[must_use]
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Re-scan the snapshot and build the visual tree.
    ///
    /// `language` is the host's language code. Texts fall back to English when it has no
    /// table; dates always follow the code itself.
    pub fn render(&mut self, snapshot: Option<&StateSnapshot>, language: Option<&str>) -> VisualTree {
        if self.config.is_none() {
            return VisualTree::Empty;
        }
        let Some(snapshot) = snapshot else {
            return VisualTree::Empty;
        };
        self.sensors = resolve_sensors(snapshot);
        render(
            Some(snapshot),
            &self.sensors,
            self.config.as_ref(),
            language,
        )
    }

    /// Pull a fresh snapshot from `source` and render it.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the source cannot supply a snapshot.
    pub fn render_from<S: SnapshotSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<VisualTree, SourceError> {
        let snapshot = source.snapshot()?;
        Ok(self.render(Some(&snapshot), source.language()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{EntityState, SensorSlot};

    struct FixedSource {
        snapshot: StateSnapshot,
        language: Option<String>,
    }

    impl SnapshotSource for FixedSource {
        fn snapshot(&self) -> Result<StateSnapshot, SourceError> {
            Ok(self.snapshot.clone())
        }

        fn language(&self) -> Option<&str> {
            self.language.as_deref()
        }
    }

    #[test]
    fn should_render_empty_until_configured() {
        let mut card = CollectionCard::new();
        assert_eq!(card.render(Some(&StateSnapshot::new()), None), VisualTree::Empty);
        assert!(card.sensors().is_empty());
    }

    #[test]
    fn should_cache_resolved_sensors_between_renders() {
        let mut card = CollectionCard::new();
        card.set_config(&json!({})).unwrap();
        let mut snapshot = StateSnapshot::new();
        snapshot.insert(SensorSlot::NextPlusOne, EntityState::default());
        card.render(Some(&snapshot), Some("en"));
        assert_eq!(card.sensors(), &[SensorSlot::NextPlusOne.entity_id()]);

        card.render(Some(&StateSnapshot::new()), Some("en"));
        assert!(card.sensors().is_empty());
    }

    #[test]
    fn should_clear_config_on_rejection() {
        let mut card = CollectionCard::new();
        card.set_config(&json!({ "title": "Rifiuti" })).unwrap();
        assert!(card.set_config(&Value::Null).is_err());
        assert!(card.config().is_none());
        assert_eq!(card.render(Some(&StateSnapshot::new()), None), VisualTree::Empty);
    }

    #[test]
    fn should_render_from_source() {
        let mut card = CollectionCard::new();
        card.set_config(&json!({ "show_count": 1 })).unwrap();
        let source = FixedSource {
            snapshot: StateSnapshot::new(),
            language: Some(String::from("it")),
        };
        let tree = card.render_from(&source).unwrap();
        assert_eq!(tree.header(), Some("Prossimo conferimento"));
        assert_eq!(card.card_size(), 3);
    }
}
