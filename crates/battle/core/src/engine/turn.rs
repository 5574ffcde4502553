//! Turn resolution: gathering, execution, knockouts and upkeep.

use crate::boss::check_phases;
use crate::combat::{
    self, EffectScope, Participant, apply_move_effects, calculate_damage, check_can_act,
    effective_speed, roll_hit,
};
use crate::config::CombatParams;
use crate::env::{
    BattleEnv, EffectTarget, Effectiveness, MoveDefinition, MoveId, SwitchOutHook, TraitDefinition,
};
use crate::selector::{Decision, SelectionContext, usable_moves};
use crate::state::{CombatantId, Expired, Side, Slot, StatusKind, TemporaryEffectKind};

use super::order::{Planned, QueuedAction, sort_queue};
use super::{Battle, BattleOutcome, RecordFlags, RecordKind, TurnRecord};

/// Voluntary swaps made earlier this turn, per side: `(from, to)`.
type Swaps = [Option<(usize, usize)>; 2];

impl<'a> Battle<'a> {
    /// Resolves the current turn and returns its records.
    pub(super) fn resolve_turn(&mut self, input: Option<Decision>) -> Vec<TurnRecord> {
        let env = self.env;
        let params = self.config.combat.clone();
        let turn = self.state.turn();
        let mut records = Vec::new();

        let mut queue = self.gather(&env, &params, input);
        sort_queue(&mut queue);

        let mut swaps: Swaps = [None, None];
        for action in &queue {
            self.execute(action, &mut swaps, &env, &params, &mut records);
            self.replace_fainted(turn, &mut records);
            if self.check_outcome(Some(action.actor.side)) {
                self.turns_resolved = turn;
                return records;
            }
        }

        self.upkeep(turn, &env, &params, &mut records);
        self.replace_fainted(turn, &mut records);
        self.turns_resolved = turn;
        if self.check_outcome(None) {
            return records;
        }

        self.expire(turn, &mut records);
        if self.state.turn() > self.config.turn_cap {
            self.outcome = Some(BattleOutcome::Timeout);
        }
        records
    }

    // ===== gathering =====

    /// Participants in gather order, each with its default target.
    fn participants(&self) -> Vec<(Slot, Slot)> {
        let mut participants = Vec::new();
        for side in Side::BOTH {
            let foe = side.opposite();
            if self.topology.has_active(side) {
                let actor = Slot::new(side, self.state.active(side));
                let target = if self.topology.has_active(foe) {
                    Some(self.state.active(foe))
                } else {
                    self.teams.first_living(foe)
                };
                if let Some(index) = target
                    && self.teams.is_alive(actor)
                {
                    participants.push((actor, Slot::new(foe, index)));
                }
            } else {
                let target = Slot::new(foe, self.state.active(foe));
                for (index, _) in self.teams.living(side) {
                    participants.push((Slot::new(side, index), target));
                }
            }
        }
        participants
    }

    fn gather(
        &mut self,
        env: &BattleEnv<'_>,
        params: &CombatParams,
        mut input: Option<Decision>,
    ) -> Vec<QueuedAction> {
        let mut queue = Vec::new();

        for (gather, (actor, default_target)) in self.participants().into_iter().enumerate() {
            let decision = if self.manual == Some(actor.side) {
                input.take()
            } else {
                self.select(actor, default_target, env, params)
            };
            let planned = match decision {
                Some(decision) => self.plan(actor, default_target, decision, env, params),
                None => continue,
            };

            let Some(combatant) = self.teams.get(actor) else {
                continue;
            };
            let traits = env.traits_of(combatant);
            let speed = effective_speed(combatant, self.state.get(combatant.id), &traits, params);
            let priority = match &planned {
                Planned::Move { mv, .. } => mv.priority,
                Planned::Swap { .. } => params.swap_priority,
            };
            let draw = self.rng.next_u32();

            queue.push(QueuedAction {
                gather,
                actor,
                priority,
                speed,
                draw,
                planned,
            });
        }
        queue
    }

    fn select(
        &mut self,
        actor: Slot,
        default_target: Slot,
        env: &BattleEnv<'_>,
        params: &CombatParams,
    ) -> Option<Decision> {
        let selector = self.selector(actor.side);
        let ctx = SelectionContext {
            actor: self.teams.get(actor)?,
            side: actor.side,
            target: self.teams.get(default_target)?,
            team: self.teams.side(actor.side),
            opponents: self.teams.side(actor.side.opposite()),
            state: &self.state,
            env,
            params,
        };
        Some(selector.select(&ctx, &mut self.rng))
    }

    /// Turns a decision into a queued plan. Invalid swaps from a selector fall
    /// back to the first usable move; unknown or spent moves become the
    /// desperation move.
    fn plan(
        &self,
        actor: Slot,
        default_target: Slot,
        decision: Decision,
        env: &BattleEnv<'_>,
        params: &CombatParams,
    ) -> Planned {
        match decision {
            Decision::Swap { to } if self.can_swap(actor.side, to) => Planned::Swap { to },
            Decision::Swap { .. } => {
                let move_id = self
                    .teams
                    .get(actor)
                    .and_then(|c| usable_moves(c, &self.state, env).first().map(|mv| mv.id))
                    .unwrap_or(MoveId::DESPERATION);
                self.plan_move(actor, default_target, move_id, None, env, params)
            }
            Decision::UseMove { move_id, target } => {
                self.plan_move(actor, default_target, move_id, target, env, params)
            }
        }
    }

    fn plan_move(
        &self,
        actor: Slot,
        default_target: Slot,
        move_id: MoveId,
        requested_target: Option<CombatantId>,
        env: &BattleEnv<'_>,
        params: &CombatParams,
    ) -> Planned {
        let known = self.teams.get(actor).and_then(|combatant| {
            let entry = self.state.get(combatant.id);
            combatant
                .moves
                .iter()
                .find(|slot| slot.move_id == move_id && entry.remaining_uses(slot) > 0)
                .and_then(|slot| env.move_definition(slot.move_id))
        });

        // Explicit targets only matter when several opponents are on the field.
        let foe = actor.side.opposite();
        let target = requested_target
            .filter(|_| !self.topology.has_active(foe))
            .and_then(|id| self.teams.find(id))
            .filter(|slot| slot.side == foe && self.teams.is_alive(*slot))
            .unwrap_or(default_target);

        match known {
            Some(mv) => Planned::Move {
                mv,
                target,
                fallback: false,
            },
            None => Planned::Move {
                mv: MoveDefinition::desperation(params),
                target,
                fallback: true,
            },
        }
    }

    // ===== execution =====

    fn execute(
        &mut self,
        action: &QueuedAction,
        swaps: &mut Swaps,
        env: &BattleEnv<'_>,
        params: &CombatParams,
        records: &mut Vec<TurnRecord>,
    ) {
        if !self.teams.is_alive(action.actor) {
            return;
        }
        match &action.planned {
            Planned::Swap { to } => {
                self.execute_swap(action.actor, *to, env, params, records);
                swaps[action.actor.side.index()] = Some((action.actor.index, *to));
            }
            Planned::Move {
                mv,
                target,
                fallback,
            } => {
                // A voluntary swap moves the target; a knockout replacement does not.
                let mut target = *target;
                if let Some((from, to)) = swaps[target.side.index()]
                    && target.index == from
                {
                    target = Slot::new(target.side, to);
                }
                if !self.teams.is_alive(target) {
                    return;
                }
                self.execute_move(action.actor, mv, target, *fallback, env, params, records);
            }
        }
    }

    fn execute_swap(
        &mut self,
        actor: Slot,
        to: usize,
        env: &BattleEnv<'_>,
        params: &CombatParams,
        records: &mut Vec<TurnRecord>,
    ) {
        let turn = self.state.turn();
        let Some(outgoing) = self.teams.get(actor) else {
            return;
        };
        let id = outgoing.id;
        let name = outgoing.name.clone();
        let traits = env.traits_of(outgoing);
        let ctx = combat::TraitContext::of(outgoing, self.state.get(id), None);
        let hooks = combat::traits::switch_out_hooks(&traits, &ctx, params);

        let mut record = TurnRecord::new(turn, RecordKind::Swap, id)
            .with_flags(RecordFlags::SWAP)
            .with_message(format!("{name}, come back!"));
        for hook in hooks {
            match hook {
                SwitchOutHook::Heal { percent } => {
                    if let Some(outgoing) = self.teams.get_mut(actor) {
                        let amount = outgoing.percent_of_max(percent);
                        let gained = outgoing.heal(amount);
                        if gained > 0 {
                            record.messages.push(format!("{name} restored {gained} HP."));
                        }
                    }
                }
                SwitchOutHook::CureStatus => {
                    if !self.state.get_mut(id).statuses.clear().is_empty() {
                        record.messages.push(format!("{name}'s status was cured."));
                    }
                }
            }
        }

        let entry = self.state.get_mut(id);
        entry.consecutive_guards = 0;
        self.state.mark_acted(id);
        self.state.set_active(actor.side, to);

        if let Some(incoming) = self.teams.get(Slot::new(actor.side, to)) {
            record = record
                .with_target(incoming.id, incoming.hp)
                .with_message(format!("Go, {}!", incoming.name));
        }
        records.push(record);
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_move(
        &mut self,
        actor: Slot,
        mv: &MoveDefinition,
        target: Slot,
        fallback: bool,
        env: &BattleEnv<'_>,
        params: &CombatParams,
        records: &mut Vec<TurnRecord>,
    ) {
        let turn = self.state.turn();
        let (Some(attacker), Some(defender)) = (self.teams.get(actor), self.teams.get(target))
        else {
            return;
        };
        let actor_id = attacker.id;
        let actor_name = attacker.name.clone();
        let target_id = defender.id;
        let target_name = defender.name.clone();
        let attacker_traits = env.traits_of(attacker);
        let defender_traits = env.traits_of(defender);

        let gate = check_can_act(
            attacker,
            self.state.get_mut(actor_id),
            &attacker_traits,
            params,
            &mut self.rng,
        );
        self.state.mark_acted(actor_id);

        let mut record = TurnRecord::new(turn, RecordKind::Move, actor_id).with_move(mv);
        record.messages = gate.messages;

        if gate.blocked.is_some() {
            record = record.with_flags(RecordFlags::BLOCKED);
            if gate.self_damage > 0 {
                let (lost, hp) = self
                    .teams
                    .get_mut(actor)
                    .map(|c| (c.take_damage(gate.self_damage), c.hp))
                    .unwrap_or_default();
                record = record.with_target(actor_id, hp);
                record.damage = lost;
                if hp == 0 {
                    record = record
                        .with_flags(RecordFlags::KNOCKOUT)
                        .with_message(format!("{actor_name} fainted!"));
                }
                records.push(record);
                self.check_boss(actor, env, params, records);
            } else {
                let hp = self.teams.get(target).map(|c| c.hp).unwrap_or(0);
                records.push(record.with_target(target_id, hp));
            }
            return;
        }

        {
            let entry = self.state.get_mut(actor_id);
            entry.last_move = Some(mv.id);
            if !fallback {
                entry.spend_use(mv.id);
            }
            if !mv.is_guard() {
                entry.consecutive_guards = 0;
            }
        }
        record.messages.push(format!("{actor_name} used {}!", mv.name));
        if fallback {
            record = record.with_flags(RecordFlags::FALLBACK);
        }

        let resolved = self.resolve_move(
            actor,
            target,
            mv,
            (attacker_traits.as_slice(), defender_traits.as_slice()),
            env,
            params,
            &mut record,
        );

        let target_hp = self.teams.get(target).map(|c| c.hp).unwrap_or(0);
        record = record.with_target(target_id, target_hp);
        if resolved && target_hp == 0 && target != actor {
            self.state.get_mut(actor_id).knockouts += 1;
            record = record
                .with_flags(RecordFlags::KNOCKOUT)
                .with_message(format!("{target_name} fainted!"));
        }
        if !self.teams.is_alive(actor) {
            record.messages.push(format!("{actor_name} fainted!"));
        }
        records.push(record);

        self.check_boss(target, env, params, records);
        if actor != target {
            self.check_boss(actor, env, params, records);
        }
    }

    /// Guard, accuracy, damage and effects. Returns false when the move was
    /// negated before dealing damage (guarded or missed).
    #[allow(clippy::too_many_arguments)]
    fn resolve_move(
        &mut self,
        actor: Slot,
        target: Slot,
        mv: &MoveDefinition,
        traits: (&[TraitDefinition], &[TraitDefinition]),
        env: &BattleEnv<'_>,
        params: &CombatParams,
        record: &mut TurnRecord,
    ) -> bool {
        let (attacker_traits, defender_traits) = traits;
        let (Some(attacker), Some(defender)) = (self.teams.get(actor), self.teams.get(target))
        else {
            return false;
        };
        let target_id = defender.id;
        let target_name = defender.name.clone();
        let actor_name = attacker.name.clone();

        if mv.is_damaging() && self.state.get_mut(target_id).effects.take_guard() {
            record.flags |= RecordFlags::GUARDED;
            record.messages.push(format!("{target_name} protected itself!"));
            return false;
        }

        let aimed = mv.is_damaging()
            || mv
                .effects
                .iter()
                .any(|effect| effect.target == EffectTarget::Opponent);
        let (Some(attacker), Some(defender)) = (self.teams.get(actor), self.teams.get(target))
        else {
            return false;
        };
        let a = Participant::new(attacker, self.state.get(attacker.id), actor.side, attacker_traits);
        let d = Participant::new(defender, self.state.get(target_id), target.side, defender_traits);

        if aimed && !roll_hit(params, &a, &d, mv, &mut self.rng) {
            record.flags |= RecordFlags::MISS;
            record.messages.push(format!("{actor_name}'s attack missed!"));
            return false;
        }

        let mut dealt = 0;
        if mv.is_damaging() {
            let outcome = calculate_damage(env, params, &a, &d, mv, &mut self.rng);
            let Some(defender) = self.teams.get_mut(target) else {
                return false;
            };
            match outcome.effectiveness {
                Effectiveness::Immune => {
                    record.flags |= RecordFlags::IMMUNE;
                    record
                        .messages
                        .push(format!("It doesn't affect {target_name}..."));
                    return true;
                }
                Effectiveness::Absorb => {
                    let gained = defender.heal(outcome.heal);
                    record.flags |= RecordFlags::ABSORBED;
                    record
                        .messages
                        .push(format!("{target_name} absorbed the attack! (+{gained})"));
                    return true;
                }
                effectiveness => {
                    dealt = defender.take_damage(outcome.damage);
                    record.damage = dealt;
                    if outcome.critical {
                        record.flags |= RecordFlags::CRITICAL;
                        record.messages.push("A critical hit!".to_string());
                    }
                    match effectiveness {
                        Effectiveness::Super => {
                            record.flags |= RecordFlags::SUPER_EFFECTIVE;
                            record.messages.push("It's super effective!".to_string());
                        }
                        Effectiveness::Resisted => {
                            record.flags |= RecordFlags::RESISTED;
                            record.messages.push("It's not very effective...".to_string());
                        }
                        _ => {}
                    }
                }
            }
        }

        apply_move_effects(
            env,
            params,
            mv,
            EffectScope {
                user: actor,
                target,
                damage_dealt: dealt,
            },
            &mut self.teams,
            &mut self.state,
            &mut self.rng,
            &mut record.messages,
        );
        true
    }

    /// Runs the boss controller for the combatant at `slot` and records any
    /// transitions.
    fn check_boss(
        &mut self,
        slot: Slot,
        env: &BattleEnv<'_>,
        params: &CombatParams,
        records: &mut Vec<TurnRecord>,
    ) {
        let turn = self.state.turn();
        for transition in check_phases(env, params, slot, &mut self.teams, &mut self.state) {
            let boss_name = self.name_of(transition.boss);
            let mut record = TurnRecord::new(turn, RecordKind::Phase, transition.boss)
                .with_flags(RecordFlags::PHASE);
            if transition.message.is_empty() {
                record
                    .messages
                    .push(format!("{boss_name} entered phase {}!", transition.phase + 1));
            } else {
                record.messages.push(transition.message.clone());
            }
            if transition.healed > 0 {
                record
                    .messages
                    .push(format!("{boss_name} restored {} HP.", transition.healed));
            }
            if let Some(species) = transition.summon {
                record
                    .messages
                    .push(format!("{boss_name} called for help! (species {})", species.0));
            }
            for hit in &transition.area_hits {
                let name = self.name_of(hit.target);
                record.damage += hit.damage;
                record
                    .messages
                    .push(format!("{name} was caught in the blast! (-{})", hit.damage));
                if hit.hp_after == 0 && hit.damage > 0 {
                    self.state.get_mut(transition.boss).knockouts += 1;
                    record.messages.push(format!("{name} fainted!"));
                }
            }
            record.phase = Some(transition);
            records.push(record);
        }
    }

    // ===== knockouts and outcome =====

    /// Replaces every fainted active with the first living teammate.
    fn replace_fainted(&mut self, turn: u32, records: &mut Vec<TurnRecord>) {
        for side in Side::BOTH {
            if !self.topology.has_active(side) {
                continue;
            }
            if self.teams.is_alive(Slot::new(side, self.state.active(side))) {
                continue;
            }
            let Some(index) = self.teams.first_living(side) else {
                continue;
            };
            self.state.set_active(side, index);
            if let Some(incoming) = self.teams.get(Slot::new(side, index)) {
                records.push(
                    TurnRecord::new(turn, RecordKind::Replacement, incoming.id)
                        .with_target(incoming.id, incoming.hp)
                        .with_message(format!("{} was sent out!", incoming.name)),
                );
            }
        }
    }

    /// Ends the battle when a side has no living members. If both sides are
    /// wiped at once, the side that acted wins; upkeep has no actor and counts
    /// as a defeat.
    fn check_outcome(&mut self, acting: Option<Side>) -> bool {
        let outcome = match (
            self.teams.is_wiped(Side::Player),
            self.teams.is_wiped(Side::Opponent),
        ) {
            (false, false) => return false,
            (true, false) => BattleOutcome::Defeat,
            (false, true) => BattleOutcome::Victory,
            (true, true) => match acting {
                Some(Side::Player) => BattleOutcome::Victory,
                Some(Side::Opponent) | None => BattleOutcome::Defeat,
            },
        };
        self.outcome = Some(outcome);
        true
    }

    // ===== upkeep =====

    /// Burn and poison damage for every living combatant.
    fn upkeep(
        &mut self,
        turn: u32,
        env: &BattleEnv<'_>,
        params: &CombatParams,
        records: &mut Vec<TurnRecord>,
    ) {
        let living: Vec<Slot> = self
            .teams
            .iter()
            .filter(|(_, c)| c.is_alive())
            .map(|(slot, _)| slot)
            .collect();

        for slot in living {
            let Some(combatant) = self.teams.get(slot) else {
                continue;
            };
            let id = combatant.id;
            let entry = self.state.get(id);
            let (divisor, cause) = if entry.statuses.has(StatusKind::Burn) {
                (params.burn_tick_divisor, "its burn")
            } else if entry.statuses.has(StatusKind::Poison) {
                (params.poison_tick_divisor, "poison")
            } else {
                continue;
            };

            let Some(combatant) = self.teams.get_mut(slot) else {
                continue;
            };
            let amount = (combatant.max_hp / divisor.max(1)).max(1);
            let lost = combatant.take_damage(amount);
            let mut record = TurnRecord::new(turn, RecordKind::Upkeep, id)
                .with_target(id, combatant.hp)
                .with_message(format!("{} is hurt by {cause}! (-{lost})", combatant.name));
            record.damage = lost;
            if combatant.hp == 0 {
                record = record
                    .with_flags(RecordFlags::KNOCKOUT)
                    .with_message(format!("{} fainted!", combatant.name));
            }
            records.push(record);
            self.check_boss(slot, env, params, records);
        }
    }

    /// Ticks the tracker and reports what wore off on living combatants.
    fn expire(&mut self, turn: u32, records: &mut Vec<TurnRecord>) {
        for expiration in self.state.tick() {
            let Some(combatant) = self
                .teams
                .find(expiration.combatant)
                .and_then(|slot| self.teams.get(slot))
                .filter(|c| c.is_alive())
            else {
                continue;
            };
            let message = match expiration.expired {
                Expired::Status(kind) => format!("{} {}.", combatant.name, kind.cured_phrase()),
                Expired::Effect(TemporaryEffectKind::Shield { .. }) => {
                    format!("{}'s shield faded.", combatant.name)
                }
                Expired::Effect(_) => continue,
            };
            records.push(
                TurnRecord::new(turn, RecordKind::Upkeep, combatant.id)
                    .with_target(combatant.id, combatant.hp)
                    .with_message(message),
            );
        }
    }

    fn name_of(&self, id: CombatantId) -> String {
        self.teams
            .find(id)
            .and_then(|slot| self.teams.get(slot))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
