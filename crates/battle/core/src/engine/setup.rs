//! Battle-start validation and construction.

use std::collections::BTreeSet;

use crate::config::BattleConfig;
use crate::env::{BattleEnv, BattleRng, compute_seed};
use crate::selector::ActionSelector;
use crate::state::{Combatant, CombatState, Side, Teams};

use super::{Battle, SetupError, Topology};

/// Builder for a [`Battle`].
///
/// Rosters are validated once, in [`BattleSetup::start`]. After that, combat
/// resolution never fails.
pub struct BattleSetup<'a> {
    player: Vec<Combatant>,
    opponent: Vec<Combatant>,
    topology: Topology,
    seed: Option<u64>,
    config: BattleConfig,
    manual: Option<Side>,
    selectors: [Option<&'a dyn ActionSelector>; 2],
}

impl<'a> BattleSetup<'a> {
    pub fn new(player: Vec<Combatant>, opponent: Vec<Combatant>) -> Self {
        Self {
            player,
            opponent,
            topology: Topology::Duel,
            seed: None,
            config: BattleConfig::default(),
            manual: None,
            selectors: [None, None],
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Hands control of `side` to the caller: its decisions come through
    /// `next_turn` instead of a selector.
    pub fn with_manual(mut self, side: Side) -> Self {
        self.manual = Some(side);
        self
    }

    pub fn with_selector(mut self, side: Side, selector: &'a dyn ActionSelector) -> Self {
        self.selectors[side.index()] = Some(selector);
        self
    }

    /// Seed the battle will use: the explicit one, or one derived from the
    /// roster ids so that identical rosters always replay identically.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| derive_seed(&self.player, &self.opponent))
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let mut seen = BTreeSet::new();
        for side in Side::BOTH {
            let roster = self.roster(side);
            if roster.is_empty() {
                return Err(SetupError::EmptyTeam { side });
            }
            if roster.len() > self.config.max_team_size {
                return Err(SetupError::TeamTooLarge {
                    side,
                    size: roster.len(),
                    max: self.config.max_team_size,
                });
            }
            for combatant in roster {
                validate_combatant(combatant)?;
                if !seen.insert(combatant.id) {
                    return Err(SetupError::DuplicateId { id: combatant.id });
                }
            }
            if !roster.iter().any(Combatant::is_alive) {
                return Err(SetupError::NoLivingMembers { side });
            }
        }

        if let (Some(side), Topology::Horde { lone }) = (self.manual, self.topology)
            && side != lone
        {
            return Err(SetupError::ManualHordeSide { side });
        }
        Ok(())
    }

    /// Validates the rosters and creates the battle.
    pub fn start(self, env: BattleEnv<'a>) -> Result<Battle<'a>, SetupError> {
        self.validate()?;
        let seed = self.seed();

        let teams = Teams::new(self.player, self.opponent);
        let mut state = CombatState::new();
        for (_, combatant) in teams.iter() {
            state.initialize(combatant.id);
        }
        for side in Side::BOTH {
            if let Some(index) = teams.first_living(side) {
                state.set_active(side, index);
            }
        }

        Ok(Battle::from_parts(
            env,
            self.config,
            self.topology,
            teams,
            state,
            BattleRng::new(seed),
            self.manual,
            self.selectors,
        ))
    }

    fn roster(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

fn validate_combatant(combatant: &Combatant) -> Result<(), SetupError> {
    if combatant.max_hp == 0 || combatant.hp > combatant.max_hp {
        return Err(SetupError::InvalidHp {
            id: combatant.id,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
        });
    }
    if combatant.level == 0 {
        return Err(SetupError::InvalidLevel { id: combatant.id });
    }
    if let Some(profile) = &combatant.boss
        && !profile.has_valid_thresholds()
    {
        return Err(SetupError::InvalidPhaseThresholds { id: combatant.id });
    }
    Ok(())
}

fn derive_seed(player: &[Combatant], opponent: &[Combatant]) -> u64 {
    let mut seed = 0;
    for (stream, roster) in [player, opponent].into_iter().enumerate() {
        for combatant in roster {
            seed = compute_seed(seed, combatant.id.0 as u64, stream as u32);
        }
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::{BossProfile, PhaseAbility, PhaseDefinition};
    use crate::env::{Element, SpeciesId};
    use crate::state::{CombatantId, Stats};

    fn member(id: u32) -> Combatant {
        Combatant::new(
            CombatantId(id),
            format!("m{id}"),
            SpeciesId(1),
            10,
            30,
            Stats::new(10, 10, 10, 10, 10),
            Element::Normal,
        )
    }

    #[test]
    fn rejects_invalid_rosters() {
        let empty = BattleSetup::new(vec![], vec![member(2)]);
        assert_eq!(
            empty.validate(),
            Err(SetupError::EmptyTeam { side: Side::Player })
        );

        let duplicate = BattleSetup::new(vec![member(1)], vec![member(1)]);
        assert_eq!(
            duplicate.validate(),
            Err(SetupError::DuplicateId { id: CombatantId(1) })
        );

        let fainted = BattleSetup::new(vec![member(1)], vec![member(2).with_hp(0)]);
        assert_eq!(
            fainted.validate(),
            Err(SetupError::NoLivingMembers {
                side: Side::Opponent
            })
        );

        let oversized = BattleSetup::new(vec![member(1)], (2..10).map(member).collect());
        assert!(matches!(
            oversized.validate(),
            Err(SetupError::TeamTooLarge { size: 8, .. })
        ));
    }

    #[test]
    fn rejects_unordered_boss_thresholds() {
        let profile = BossProfile::new(1)
            .with_phase(PhaseDefinition::new(30, PhaseAbility::Enrage))
            .with_phase(PhaseDefinition::new(60, PhaseAbility::Enrage));
        let setup = BattleSetup::new(vec![member(1)], vec![member(2).with_boss(profile)]);
        assert_eq!(
            setup.validate(),
            Err(SetupError::InvalidPhaseThresholds { id: CombatantId(2) })
        );
    }

    #[test]
    fn manual_control_of_the_horde_is_rejected() {
        let setup = BattleSetup::new(vec![member(1)], vec![member(2), member(3)])
            .with_topology(Topology::Horde { lone: Side::Player })
            .with_manual(Side::Opponent);
        assert_eq!(
            setup.validate(),
            Err(SetupError::ManualHordeSide {
                side: Side::Opponent
            })
        );
    }

    #[test]
    fn derived_seed_follows_rosters() {
        let a = BattleSetup::new(vec![member(1)], vec![member(2)]);
        let b = BattleSetup::new(vec![member(1)], vec![member(2)]);
        let c = BattleSetup::new(vec![member(1)], vec![member(3)]);
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), c.seed());
        assert_eq!(a.with_seed(7).seed(), 7);
    }

    #[test]
    fn first_living_member_starts_active() {
        let battle = BattleSetup::new(vec![member(1).with_hp(0), member(2)], vec![member(3)])
            .start(BattleEnv::empty())
            .expect("valid rosters");
        assert_eq!(battle.state().active(Side::Player), 1);
    }
}
