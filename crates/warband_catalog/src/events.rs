//! # Battle Events
//!
//! Typed event payloads for the layers embedding the engine (UI, replay,
//! AI). Each event kind is an enum variant carrying exactly the fields
//! that kind has - payloads are never dynamically typed.

use serde::{Deserialize, Serialize};

/// Event type discriminator.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEventKind {
    /// A unit entered play.
    UnitSpawned = 0,
    /// A unit was removed from play.
    UnitDestroyed = 1,
    /// A subset of units was split into a battle store.
    BattleForked = 2,
    /// A battle store was folded back into the world.
    BattleMerged = 3,
}

/// Events emitted around the entity store's lifecycle operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A unit entered play.
    UnitSpawned {
        /// Raw id of the spawned entity.
        entity: u32,
        /// 1-based prototype the unit was built from.
        prototype: u16,
    },

    /// A unit was removed from play.
    UnitDestroyed {
        /// Raw id the entity held before destruction.
        entity: u32,
    },

    /// A subset of units was split into an isolated battle store.
    BattleForked {
        /// Units moved out of the world store.
        unit_count: usize,
    },

    /// A battle store was folded back into the world.
    BattleMerged {
        /// Units returned to the world store.
        unit_count: usize,
    },
}

impl BattleEvent {
    /// Returns the event's type discriminator.
    #[must_use]
    pub const fn kind(&self) -> BattleEventKind {
        match self {
            Self::UnitSpawned { .. } => BattleEventKind::UnitSpawned,
            Self::UnitDestroyed { .. } => BattleEventKind::UnitDestroyed,
            Self::BattleForked { .. } => BattleEventKind::BattleForked,
            Self::BattleMerged { .. } => BattleEventKind::BattleMerged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_discriminator() {
        let spawn = BattleEvent::UnitSpawned {
            entity: 3,
            prototype: 1,
        };
        assert_eq!(spawn.kind(), BattleEventKind::UnitSpawned);
        assert_eq!(
            BattleEvent::BattleForked { unit_count: 8 }.kind(),
            BattleEventKind::BattleForked
        );
    }

    #[test]
    fn test_events_carry_their_fields() {
        let log = vec![
            BattleEvent::UnitSpawned {
                entity: 1,
                prototype: 2,
            },
            BattleEvent::UnitDestroyed { entity: 1 },
        ];
        let destroyed = log
            .iter()
            .filter(|event| event.kind() == BattleEventKind::UnitDestroyed)
            .count();
        assert_eq!(destroyed, 1);
    }
}
