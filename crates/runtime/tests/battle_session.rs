use std::path::Path;

use battle_content::ContentFactory;
use battle_core::{
    BattleOutcome, Decision, RecordKind, SetupError, Side, TurnError,
};
use runtime::{
    BattleSession, OracleManager, RuntimeError, SelectorKind, verify_replay, verify_reports,
};
use tempfile::TempDir;

fn data_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../battle/content/data"))
}

fn oracles() -> (OracleManager, ContentFactory) {
    let factory = ContentFactory::new(data_dir());
    let oracles = OracleManager::from_factory(&factory).unwrap();
    (oracles, factory)
}

#[test]
fn instant_and_paced_runs_agree_for_every_selector() {
    let (oracles, factory) = oracles();
    let env = oracles.as_battle_env();

    for kind in [
        SelectorKind::FirstUsable,
        SelectorKind::Greedy,
        SelectorKind::Random,
    ] {
        for roster in ["skirmish", "warden"] {
            let encounter = factory.load_roster(roster, oracles.catalog()).unwrap();
            let digest = verify_replay(env, || {
                oracles
                    .setup(encounter.clone())
                    .with_selector(Side::Player, kind.selector())
                    .with_selector(Side::Opponent, kind.selector())
            })
            .unwrap();
            assert!(digest.records > 0, "{kind} {roster}");
        }
    }
}

#[test]
fn boss_encounter_reports_phase_transitions() {
    let (oracles, factory) = oracles();
    let encounter = factory.load_roster("warden", oracles.catalog()).unwrap();

    let report = BattleSession::start(
        oracles
            .setup(encounter)
            .with_selector(Side::Player, SelectorKind::Greedy.selector()),
        oracles.as_battle_env(),
    )
    .unwrap()
    .run_to_end()
    .unwrap();

    let phases: Vec<usize> = report
        .records
        .iter()
        .filter(|r| r.kind == RecordKind::Phase)
        .filter_map(|r| r.phase.as_ref().map(|p| p.phase))
        .collect();
    let mut sorted = phases.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(phases, sorted, "each phase fires once, in order");
}

#[test]
fn manual_side_is_driven_through_run_with() {
    let (oracles, factory) = oracles();
    let encounter = factory.load_roster("skirmish", oracles.catalog()).unwrap();
    let tackle = oracles.catalog().moves.find_by_name("Tackle").unwrap().id;

    let mut asked = 0;
    let report = BattleSession::start(
        oracles.setup(encounter).with_manual(Side::Player),
        oracles.as_battle_env(),
    )
    .unwrap()
    .run_with(|battle| {
        asked += 1;
        let active = battle.active(Side::Player).unwrap();
        let id = active
            .moves
            .iter()
            .map(|slot| slot.move_id)
            .find(|id| *id == tackle)
            .unwrap_or(active.moves[0].move_id);
        Decision::use_move(id)
    })
    .unwrap();

    assert_eq!(asked, report.summary.turns);
    assert_ne!(report.summary.outcome, BattleOutcome::Timeout);
}

#[test]
fn manual_session_requires_input() {
    let (oracles, factory) = oracles();
    let encounter = factory.load_roster("skirmish", oracles.catalog()).unwrap();
    let mut session = BattleSession::start(
        oracles.setup(encounter).with_manual(Side::Player),
        oracles.as_battle_env(),
    )
    .unwrap();

    let err = session.step(None).unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        RuntimeError::Turn(TurnError::InputRequired { side: Side::Player })
    ));
    assert!(session.battle().records().is_empty());
}

#[test]
fn invalid_rosters_surface_setup_errors() {
    let (oracles, factory) = oracles();
    let mut encounter = factory.load_roster("skirmish", oracles.catalog()).unwrap();
    encounter.opponent.clear();

    let err = BattleSession::start(oracles.setup(encounter), oracles.as_battle_env())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        RuntimeError::Setup(SetupError::EmptyTeam {
            side: Side::Opponent
        })
    ));
}

#[test]
fn tampered_stream_is_rejected_at_the_first_changed_record() {
    let (oracles, factory) = oracles();
    let encounter = factory.load_roster("skirmish", oracles.catalog()).unwrap();
    let run = || {
        BattleSession::start(oracles.setup(encounter.clone()), oracles.as_battle_env())
            .unwrap()
            .run_to_end()
            .unwrap()
    };

    let honest = run();
    let mut forged = run();
    assert_eq!(
        verify_reports(&honest, &forged).unwrap().root_hex().len(),
        64
    );

    forged.records[2].damage += 1;
    match verify_reports(&honest, &forged) {
        Err(RuntimeError::ReplayDiverged { index, .. }) => assert_eq!(index, 2),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_data_dir_is_a_content_error() {
    let dir = TempDir::new().unwrap();
    let err = OracleManager::from_factory(&ContentFactory::new(dir.path())).unwrap_err();
    assert!(matches!(err, RuntimeError::Content(_)));
    assert!(err.to_string().contains("moves.ron"), "{err}");
}

#[test]
fn builtin_oracles_match_the_bundled_data() {
    let (from_disk, _) = oracles();
    let builtin = OracleManager::builtin().unwrap();
    assert_eq!(builtin.catalog().moves, from_disk.catalog().moves);
    assert_eq!(builtin.config(), from_disk.config());
}
