//! Turn records and battle summaries.
//!
//! Records are the only observable output of the simulator. Identical seeds
//! and rosters produce identical record streams, which
//! [`compute_record_root`] condenses into a single commitment.

use bitflags::bitflags;

use crate::boss::PhaseTransition;
use crate::env::{Element, MoveDefinition, MoveId, Rarity, SpeciesId};
use crate::state::{CombatantId, Teams};

bitflags! {
    /// Notable outcomes of a single record.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RecordFlags: u16 {
        const CRITICAL        = 1 << 0;
        const SUPER_EFFECTIVE = 1 << 1;
        const RESISTED        = 1 << 2;
        const MISS            = 1 << 3;
        const SWAP            = 1 << 4;
        const IMMUNE          = 1 << 5;
        const ABSORBED        = 1 << 6;
        const GUARDED         = 1 << 7;
        /// The actor could not act (flinch, status or confusion).
        const BLOCKED         = 1 << 8;
        /// The desperation move stood in for an unknown or spent move.
        const FALLBACK        = 1 << 9;
        /// The record's target fainted.
        const KNOCKOUT        = 1 << 10;
        const PHASE           = 1 << 11;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    /// A move attempt, including blocked and missed ones.
    Move,
    /// A voluntary swap.
    Swap,
    /// End-of-turn status damage or an expiration notice.
    Upkeep,
    /// A boss phase transition.
    Phase,
    /// A fainted active replaced by the next living teammate.
    Replacement,
}

/// One entry of the turn-record stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub turn: u32,
    pub kind: RecordKind,
    pub actor: CombatantId,
    pub target: Option<CombatantId>,
    pub move_id: Option<MoveId>,
    pub move_name: Option<String>,
    pub element: Option<Element>,
    /// Damage dealt to `target`.
    pub damage: u32,
    pub flags: RecordFlags,
    /// Target HP after the record resolved.
    pub target_hp: Option<u32>,
    pub messages: Vec<String>,
    pub phase: Option<PhaseTransition>,
}

impl TurnRecord {
    pub fn new(turn: u32, kind: RecordKind, actor: CombatantId) -> Self {
        Self {
            turn,
            kind,
            actor,
            target: None,
            move_id: None,
            move_name: None,
            element: None,
            damage: 0,
            flags: RecordFlags::empty(),
            target_hp: None,
            messages: Vec::new(),
            phase: None,
        }
    }

    pub fn with_move(mut self, mv: &MoveDefinition) -> Self {
        self.move_id = Some(mv.id);
        self.move_name = Some(mv.name.clone());
        self.element = Some(mv.element);
        self
    }

    pub fn with_target(mut self, target: CombatantId, hp: u32) -> Self {
        self.target = Some(target);
        self.target_hp = Some(hp);
        self
    }

    pub fn with_flags(mut self, flags: RecordFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn has(&self, flags: RecordFlags) -> bool {
        self.flags.contains(flags)
    }
}

/// How a battle ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// The turn cap was exceeded. Neither side wins.
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    Ongoing,
    Finished(BattleOutcome),
}

impl BattleStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, BattleStatus::Finished(_))
    }
}

/// Everything one call to `next_turn` produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u32,
    pub records: Vec<TurnRecord>,
    pub status: BattleStatus,
}

/// Data an external reward calculator needs about a defeated opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatedOpponent {
    pub id: CombatantId,
    pub species: SpeciesId,
    pub level: u32,
    pub rarity: Rarity,
    pub element: Element,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    /// Turns resolved, counting the final one.
    pub turns: u32,
    pub defeated: Vec<DefeatedOpponent>,
    /// Player combatants still standing.
    pub survivors: Vec<CombatantId>,
    pub seed: u64,
}

impl BattleSummary {
    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }
}

/// Complete result of a battle: the record stream, the summary and both
/// rosters with their final HP for carry-over.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub records: Vec<TurnRecord>,
    pub summary: BattleSummary,
    pub teams: Teams,
}

/// Computes a commitment to a turn-record stream.
///
/// # Arguments
///
/// * `records` - Records in the order the battle produced them
///
/// # Returns
///
/// A 32-byte SHA-256 hash of the serialized records
///
/// # Design
///
/// - Uses bincode for deterministic serialization
/// - Order matters: the hash is computed sequentially over records
/// - Two runs with the same seed and rosters yield the same root
/// - A record that fails to serialize still contributes a fixed marker, so it
///   can never vanish from the commitment
#[cfg(feature = "serde")]
pub fn compute_record_root(records: &[TurnRecord]) -> [u8; 32] {
    hash_sequence(records)
}

#[cfg(feature = "serde")]
const UNSERIALIZABLE_MARKER: &[u8] = b"battle-core/unserializable-record";

#[cfg(feature = "serde")]
fn hash_sequence<T: serde::Serialize>(items: &[T]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for item in items {
        match bincode::serialize(item) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(UNSERIALIZABLE_MARKER),
        }
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_move_fields() {
        let mv = MoveDefinition::new(
            MoveId(3),
            "Ember",
            Element::Fire,
            crate::env::MoveCategory::Special,
            40,
            100,
        );
        let record = TurnRecord::new(2, RecordKind::Move, CombatantId(1))
            .with_move(&mv)
            .with_target(CombatantId(2), 17)
            .with_flags(RecordFlags::CRITICAL | RecordFlags::SUPER_EFFECTIVE);

        assert_eq!(record.move_name.as_deref(), Some("Ember"));
        assert_eq!(record.element, Some(Element::Fire));
        assert_eq!(record.target_hp, Some(17));
        assert!(record.has(RecordFlags::CRITICAL));
        assert!(!record.has(RecordFlags::MISS));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_root_depends_on_order() {
        let a = TurnRecord::new(1, RecordKind::Move, CombatantId(1));
        let b = TurnRecord::new(1, RecordKind::Move, CombatantId(2));

        let forward = compute_record_root(&[a.clone(), b.clone()]);
        let again = compute_record_root(&[a.clone(), b.clone()]);
        let reversed = compute_record_root(&[b, a]);

        assert_eq!(hex::encode(forward), hex::encode(again));
        assert_ne!(forward, reversed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unserializable_entries_still_count() {
        struct Broken;

        impl serde::Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("broken"))
            }
        }

        let empty = hash_sequence::<Broken>(&[]);
        let one = hash_sequence(&[Broken]);
        let two = hash_sequence(&[Broken, Broken]);

        assert_ne!(empty, one);
        assert_ne!(one, two);
    }
}
