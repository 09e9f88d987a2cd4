//! Domain data structures for sensor identifiers, entity states and snapshots.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Prefix shared by every sensor the upstream integration publishes.
pub const SENSOR_PREFIX: &str = "sensor.raccolta_differenziata_";

/// The three sensor roles the card understands, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSlot {
    /// Soonest collection.
    Next,
    /// Second-soonest collection.
    NextPlusOne,
    /// Third-soonest collection.
    NextPlusTwo,
}

impl SensorSlot {
    /// All slots in canonical order.
    pub const ALL: [SensorSlot; 3] = [
        SensorSlot::Next,
        SensorSlot::NextPlusOne,
        SensorSlot::NextPlusTwo,
    ];

    /// Suffix appended to [`SENSOR_PREFIX`] to form the entity identifier.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            SensorSlot::Next => "next",
            SensorSlot::NextPlusOne => "next_plus_one",
            SensorSlot::NextPlusTwo => "next_plus_two",
        }
    }

    /// Entity identifier addressing this slot in the host's state store.
    #[must_use]
    pub fn entity_id(self) -> EntityId {
        EntityId(format!("{SENSOR_PREFIX}{}", self.suffix()))
    }
}

impl fmt::Display for SensorSlot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Stable key the host uses to address an entity's state.
pub struct EntityId(pub String);

impl EntityId {
    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<SensorSlot> for EntityId {
    fn from(slot: SensorSlot) -> Self {
        slot.entity_id()
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        EntityId(raw.to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// State of one entity as published by the host.
///
/// Attributes are kept loosely typed; the accessors below are the only place that
/// interprets their shape.
pub struct EntityState {
    /// Primary state; for collection sensors this is the collection-type name.
    pub state: String,
    /// Free-form attributes attached to the state. `null` reads as no attributes.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Map<String, Value>, D::Error> {
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl EntityState {
    /// Build a state from its primary value and attribute map.
    #[must_use]
    pub fn new<S: Into<String>>(state: S, attributes: Map<String, Value>) -> Self {
        Self {
            state: state.into(),
            attributes,
        }
    }

    /// Days remaining until the collection, if the attribute holds an integer.
    #[must_use]
    pub fn days_until(&self) -> Option<i64> {
        match self.attributes.get("days_until")? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Raw `date` attribute as published upstream.
    #[must_use]
    pub fn date_text(&self) -> Option<&str> {
        self.text_attribute("date")
    }

    /// Collection date parsed from the `date` attribute.
    ///
    /// Accepts plain ISO dates and full RFC 3339 timestamps. Anything else yields `None`.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.date_text()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|stamp| stamp.date_naive()))
    }

    /// Weekday name, already localized upstream.
    #[must_use]
    pub fn weekday(&self) -> Option<&str> {
        self.text_attribute("weekday")
    }

    /// Icon name such as `mdi:recycle`.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.text_attribute("icon")
    }

    /// Display colour, usually a `#rrggbb` hex string.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.text_attribute("color")
    }

    fn text_attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "HashMap<EntityId, EntityState>")]
/// Momentary read-only view of all entity states.
///
/// Deserializes from either the `entity_id → state` object the frontend sees or the
/// list of states the REST API returns. Null entries count as absent, and an entry
/// that is not a valid state is skipped without failing the rest of the snapshot.
pub struct StateSnapshot {
    states: HashMap<EntityId, EntityState>,
}

impl TryFrom<Value> for StateSnapshot {
    type Error = &'static str;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        match raw {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter(|(_, state)| !state.is_null())
                .filter_map(|(id, state)| decode_entry(EntityId(id), state))
                .collect()),
            Value::Array(list) => Ok(list.into_iter().filter_map(decode_listed).collect()),
            _ => Err("expected an object or a list of entity states"),
        }
    }
}

/// REST-style entry carrying its own identifier, as returned by `/api/states`.
fn decode_listed(mut entry: Value) -> Option<(EntityId, EntityState)> {
    let id = match entry.as_object_mut().and_then(|fields| fields.remove("entity_id")) {
        Some(Value::String(id)) => EntityId(id),
        _ => {
            tracing::debug!("skipping listed state without entity_id");
            return None;
        }
    };
    decode_entry(id, entry)
}

fn decode_entry(id: EntityId, raw: Value) -> Option<(EntityId, EntityState)> {
    match serde_json::from_value(raw) {
        Ok(state) => Some((id, state)),
        Err(error) => {
            tracing::debug!(entity_id = %id, %error, "skipping malformed entity state");
            None
        }
    }
}

impl From<StateSnapshot> for HashMap<EntityId, EntityState> {
    fn from(snapshot: StateSnapshot) -> Self {
        snapshot.states
    }
}

impl FromIterator<(EntityId, EntityState)> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = (EntityId, EntityState)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

impl StateSnapshot {
    /// Empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a state.
    pub fn insert<I: Into<EntityId>>(&mut self, id: I, state: EntityState) {
        self.states.insert(id.into(), state);
    }

    /// Look up the state for an entity.
    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&EntityState> {
        self.states.get(id)
    }

    /// Whether a non-null state exists for the entity.
    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.states.contains_key(id)
    }

    /// Number of entities in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the snapshot holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
