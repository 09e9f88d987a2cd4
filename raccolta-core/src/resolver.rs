//! Discovery of the collection sensors present in a snapshot.

use crate::model::{EntityId, SensorSlot, StateSnapshot};

/// Identifiers of the known sensors that exist in `snapshot`, in canonical slot order.
///
/// Presence is the only check; attribute shape is not inspected.
#[must_use]
pub fn resolve_sensors(snapshot: &StateSnapshot) -> Vec<EntityId> {
    let sensors: Vec<EntityId> = SensorSlot::ALL
        .into_iter()
        .map(SensorSlot::entity_id)
        .filter(|id| snapshot.contains(id))
        .collect();
    tracing::debug!(
        found = sensors.len(),
        entities = snapshot.len(),
        "resolved collection sensors"
    );
    sensors
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::model::EntityState;

    fn snapshot_with(slots: &[SensorSlot]) -> StateSnapshot {
        slots
            .iter()
            .map(|slot| (slot.entity_id(), EntityState::new("Plastica", Map::new())))
            .collect()
    }

    #[test]
    fn should_return_nothing_for_empty_snapshot() {
        assert!(resolve_sensors(&StateSnapshot::new()).is_empty());
    }

    #[test]
    fn should_keep_canonical_order_regardless_of_insertion() {
        let snapshot = snapshot_with(&[SensorSlot::NextPlusTwo, SensorSlot::Next]);
        assert_eq!(
            resolve_sensors(&snapshot),
            vec![
                SensorSlot::Next.entity_id(),
                SensorSlot::NextPlusTwo.entity_id()
            ]
        );
    }

    #[test]
    fn should_ignore_unrelated_entities() {
        let mut snapshot = snapshot_with(&[SensorSlot::NextPlusOne]);
        snapshot.insert("sensor.raccolta_differenziata_next_plus_three", EntityState::default());
        snapshot.insert("sensor.temperature", EntityState::default());
        assert_eq!(
            resolve_sensors(&snapshot),
            vec![SensorSlot::NextPlusOne.entity_id()]
        );
    }
}
