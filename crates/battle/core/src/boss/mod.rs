//! Boss phase controller.
//!
//! A boss carries an ordered list of HP thresholds. After a damaging action
//! leaves the boss alive, every threshold its HP has crossed and that has not
//! triggered yet fires in order: stat multipliers compound onto the current
//! phase values, the phase ability runs and a transition is reported. Each
//! phase triggers at most once.

use crate::combat::effective_stat;
use crate::config::CombatParams;
use crate::env::{BattleEnv, Element, SpeciesId};
use crate::state::{CombatState, CombatantId, Slot, StatAxis, StatKind, TemporaryEffectKind, Teams};

/// Ability tag executed when a phase triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PhaseAbility {
    /// No effect beyond the phase's stat multipliers.
    Enrage,
    Shield { percent: u32, turns: u32 },
    /// Restores a percentage of max HP.
    Regenerate { percent: u32 },
    /// Hits every living opponent for a percentage of the boss's attack.
    AreaDamage { percent: u32 },
    SpeedBoost { stages: i32 },
    /// Reported only; spawning the minion is the caller's decision.
    SummonMinion { species: SpeciesId },
    ElementalShift { element: Element },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseDefinition {
    /// Triggers once HP is at or below this percentage of max HP.
    pub threshold_percent: u32,
    #[cfg_attr(feature = "serde", serde(default = "unchanged"))]
    pub attack_percent: u32,
    #[cfg_attr(feature = "serde", serde(default = "unchanged"))]
    pub defense_percent: u32,
    #[cfg_attr(feature = "serde", serde(default = "unchanged"))]
    pub speed_percent: u32,
    pub ability: PhaseAbility,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: String,
}

#[cfg(feature = "serde")]
fn unchanged() -> u32 {
    100
}

impl PhaseDefinition {
    pub fn new(threshold_percent: u32, ability: PhaseAbility) -> Self {
        Self {
            threshold_percent,
            attack_percent: 100,
            defense_percent: 100,
            speed_percent: 100,
            ability,
            message: String::new(),
        }
    }

    pub fn with_multipliers(mut self, attack: u32, defense: u32, speed: u32) -> Self {
        self.attack_percent = attack;
        self.defense_percent = defense;
        self.speed_percent = speed;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Boss data attached to a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossProfile {
    pub tier: u32,
    pub phases: Vec<PhaseDefinition>,
}

impl BossProfile {
    pub fn new(tier: u32) -> Self {
        Self {
            tier,
            phases: Vec::new(),
        }
    }

    pub fn with_phase(mut self, phase: PhaseDefinition) -> Self {
        self.phases.push(phase);
        self
    }

    /// Thresholds must lie in `1..=99` and strictly descend.
    pub fn has_valid_thresholds(&self) -> bool {
        let in_range = self
            .phases
            .iter()
            .all(|phase| (1..=99).contains(&phase.threshold_percent));
        let descending = self
            .phases
            .windows(2)
            .all(|pair| pair[0].threshold_percent > pair[1].threshold_percent);
        in_range && descending
    }
}

/// One opponent hit by an area-damage ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaHit {
    pub target: CombatantId,
    pub damage: u32,
    pub hp_after: u32,
}

/// A triggered phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTransition {
    pub boss: CombatantId,
    /// Index into the boss's phase list.
    pub phase: usize,
    pub threshold_percent: u32,
    pub ability: PhaseAbility,
    pub message: String,
    pub summon: Option<SpeciesId>,
    pub area_hits: Vec<AreaHit>,
    /// HP restored by a regenerate ability.
    pub healed: u32,
}

fn crossed(hp: u32, max_hp: u32, threshold_percent: u32) -> bool {
    hp as u64 * 100 <= max_hp as u64 * threshold_percent as u64
}

/// Triggers every phase the boss at `slot` has crossed.
///
/// Returns the transitions in threshold order; empty when the combatant is
/// not a boss, has fainted, or crossed nothing new.
pub fn check_phases(
    env: &BattleEnv<'_>,
    params: &CombatParams,
    slot: Slot,
    teams: &mut Teams,
    state: &mut CombatState,
) -> Vec<PhaseTransition> {
    let mut transitions = Vec::new();

    loop {
        let Some(boss) = teams.get(slot) else {
            break;
        };
        let Some(profile) = boss.boss.as_ref() else {
            break;
        };
        if !boss.is_alive() {
            break;
        }
        let id = boss.id;
        let index = state.get(id).phase.next_phase;
        let Some(phase) = profile.phases.get(index).cloned() else {
            break;
        };
        if !crossed(boss.hp, boss.max_hp, phase.threshold_percent) {
            break;
        }

        let entry = state.get_mut(id);
        entry.phase.next_phase = index + 1;
        entry.phase.attack_percent = compound(entry.phase.attack_percent, phase.attack_percent);
        entry.phase.defense_percent = compound(entry.phase.defense_percent, phase.defense_percent);
        entry.phase.speed_percent = compound(entry.phase.speed_percent, phase.speed_percent);
        entry.phase.just_transitioned = true;

        let mut transition = PhaseTransition {
            boss: id,
            phase: index,
            threshold_percent: phase.threshold_percent,
            ability: phase.ability,
            message: phase.message.clone(),
            summon: None,
            area_hits: Vec::new(),
            healed: 0,
        };
        run_ability(env, params, slot, &phase, teams, state, &mut transition);
        transitions.push(transition);
    }

    transitions
}

/// Applies a phase percent on top of the current one, saturating at `u32::MAX`.
fn compound(current: u32, percent: u32) -> u32 {
    let scaled = (current as u64).saturating_mul(percent as u64) / 100;
    scaled.min(u32::MAX as u64) as u32
}

fn run_ability(
    env: &BattleEnv<'_>,
    params: &CombatParams,
    slot: Slot,
    phase: &PhaseDefinition,
    teams: &mut Teams,
    state: &mut CombatState,
    transition: &mut PhaseTransition,
) {
    let id = transition.boss;
    match phase.ability {
        PhaseAbility::Enrage => {}
        PhaseAbility::Shield { percent, turns } => {
            state.add_effect(id, TemporaryEffectKind::Shield { percent }, turns);
        }
        PhaseAbility::Regenerate { percent } => {
            if let Some(boss) = teams.get_mut(slot) {
                let amount = boss.percent_of_max(percent);
                transition.healed = boss.heal(amount);
            }
        }
        PhaseAbility::AreaDamage { percent } => {
            let Some(boss) = teams.get(slot) else {
                return;
            };
            let traits = env.traits_of(boss);
            let attack = effective_stat(boss, state.get(id), &traits, params, StatKind::Attack);
            let damage = ((attack as u64 * percent as u64 / 100) as u32).max(1);

            let opponents: Vec<usize> = teams
                .living(slot.side.opposite())
                .map(|(index, _)| index)
                .collect();
            for index in opponents {
                if let Some(target) = teams.get_mut(Slot::new(slot.side.opposite(), index)) {
                    let dealt = target.take_damage(damage);
                    transition.area_hits.push(AreaHit {
                        target: target.id,
                        damage: dealt,
                        hp_after: target.hp,
                    });
                }
            }
        }
        PhaseAbility::SpeedBoost { stages } => {
            state.modify_stat_stage(id, StatAxis::Speed, stages);
        }
        PhaseAbility::SummonMinion { species } => {
            transition.summon = Some(species);
        }
        PhaseAbility::ElementalShift { element } => {
            state.get_mut(id).phase.element_override = Some(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Combatant, Side, Stats};

    fn boss(hp: u32, profile: BossProfile) -> Combatant {
        Combatant::new(
            CombatantId(10),
            "Warden",
            SpeciesId(3),
            40,
            200,
            Stats::new(100, 80, 80, 80, 60),
            Element::Metal,
        )
        .with_hp(hp)
        .with_boss(profile)
    }

    fn hero() -> Combatant {
        Combatant::new(
            CombatantId(1),
            "Hero",
            SpeciesId(1),
            40,
            150,
            Stats::new(80, 80, 80, 80, 80),
            Element::Fire,
        )
    }

    fn boss_slot() -> Slot {
        Slot::new(Side::Opponent, 0)
    }

    #[test]
    fn enrage_compounds_attack() {
        let profile = BossProfile::new(1)
            .with_phase(PhaseDefinition::new(50, PhaseAbility::Enrage).with_multipliers(130, 100, 100));
        let mut teams = Teams::new(vec![hero()], vec![boss(100, profile)]);
        let mut state = CombatState::new();

        let fired = check_phases(
            &BattleEnv::empty(),
            &CombatParams::default(),
            boss_slot(),
            &mut teams,
            &mut state,
        );

        assert_eq!(fired.len(), 1);
        let entry = state.get(CombatantId(10));
        assert_eq!(entry.phase.attack_percent, 130);
        assert!(entry.phase.just_transitioned);
    }

    #[test]
    fn stacked_multipliers_saturate() {
        let profile = BossProfile::new(3)
            .with_phase(PhaseDefinition::new(75, PhaseAbility::Enrage).with_multipliers(1000, 100, 100))
            .with_phase(PhaseDefinition::new(50, PhaseAbility::Enrage).with_multipliers(1000, 100, 100))
            .with_phase(
                PhaseDefinition::new(25, PhaseAbility::Enrage)
                    .with_multipliers(u32::MAX, 100, u32::MAX),
            );
        let mut teams = Teams::new(vec![hero()], vec![boss(10, profile)]);
        let mut state = CombatState::new();

        let fired = check_phases(
            &BattleEnv::empty(),
            &CombatParams::default(),
            boss_slot(),
            &mut teams,
            &mut state,
        );

        assert_eq!(fired.len(), 3);
        let entry = state.get(CombatantId(10));
        assert_eq!(entry.phase.attack_percent, u32::MAX);
        assert_eq!(entry.phase.defense_percent, 100);
        assert_eq!(entry.phase.speed_percent, u32::MAX);
    }

    #[test]
    fn phases_fire_once_in_order() {
        let profile = BossProfile::new(2)
            .with_phase(PhaseDefinition::new(75, PhaseAbility::SpeedBoost { stages: 1 }))
            .with_phase(
                PhaseDefinition::new(50, PhaseAbility::SummonMinion { species: SpeciesId(7) }),
            )
            .with_phase(PhaseDefinition::new(25, PhaseAbility::Enrage));
        let mut teams = Teams::new(vec![hero()], vec![boss(190, profile)]);
        let mut state = CombatState::new();
        let env = BattleEnv::empty();
        let params = CombatParams::default();

        assert!(check_phases(&env, &params, boss_slot(), &mut teams, &mut state).is_empty());

        if let Some(b) = teams.get_mut(boss_slot()) {
            b.hp = 80;
        }
        let fired = check_phases(&env, &params, boss_slot(), &mut teams, &mut state);
        let indices: Vec<usize> = fired.iter().map(|t| t.phase).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(fired[1].summon, Some(SpeciesId(7)));

        assert!(check_phases(&env, &params, boss_slot(), &mut teams, &mut state).is_empty());
        assert_eq!(state.stat_stage(CombatantId(10), StatAxis::Speed), 1);
    }

    #[test]
    fn area_damage_hits_every_living_opponent() {
        let profile = BossProfile::new(1)
            .with_phase(PhaseDefinition::new(50, PhaseAbility::AreaDamage { percent: 20 }));
        let second = Combatant {
            id: CombatantId(2),
            ..hero()
        };
        let fainted = Combatant {
            id: CombatantId(3),
            ..hero()
        }
        .with_hp(0);
        let mut teams = Teams::new(vec![hero(), second, fainted], vec![boss(60, profile)]);
        let mut state = CombatState::new();

        let fired = check_phases(
            &BattleEnv::empty(),
            &CombatParams::default(),
            boss_slot(),
            &mut teams,
            &mut state,
        );

        let hits = &fired[0].area_hits;
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|hit| hit.damage == 20 && hit.hp_after == 130));
    }

    #[test]
    fn thresholds_must_descend_within_range() {
        let good = BossProfile::new(1)
            .with_phase(PhaseDefinition::new(60, PhaseAbility::Enrage))
            .with_phase(PhaseDefinition::new(30, PhaseAbility::Enrage));
        let unordered = BossProfile::new(1)
            .with_phase(PhaseDefinition::new(30, PhaseAbility::Enrage))
            .with_phase(PhaseDefinition::new(60, PhaseAbility::Enrage));
        let out_of_range = BossProfile::new(1).with_phase(PhaseDefinition::new(100, PhaseAbility::Enrage));
        assert!(good.has_valid_thresholds());
        assert!(!unordered.has_valid_thresholds());
        assert!(!out_of_range.has_valid_thresholds());
    }
}
