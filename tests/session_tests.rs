//! Integration tests for scene routing over a shared timer registry

use std::time::Duration;

use chem_dash::core::{
    ColumnGame, LabMap, LabState, LabTiming, ManualClock, Player, Session, SessionConfig, Timer,
    TimerManager,
};
use chem_dash::types::{Action, Direction, Scene};

const STEP: Duration = Duration::from_millis(350);

fn session() -> (Session<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (Session::with_clock(SessionConfig::default(), clock.clone()), clock)
}

/// Walk from spawn (9, 12) up to (15, 12), just below the column bench.
fn walk_to_column_bench(session: &mut Session<ManualClock>) {
    session.apply(Action::PressMove(Direction::Up)).unwrap();
    for _ in 0..8 {
        session.tick(STEP);
    }
    session.apply(Action::ReleaseMove(Direction::Up)).unwrap();
}

#[test]
fn test_session_starts_in_lab_with_idle_columns() {
    let (session, _) = session();
    assert_eq!(session.scene(), Scene::Lab);
    assert!(!session.should_quit());
    assert_eq!(session.timers().names(), vec!["col1", "col2", "col3"]);

    let snapshot = session.snapshot().unwrap();
    assert_eq!((snapshot.player.row, snapshot.player.col), (9, 12));
    assert!(snapshot.prompt.is_none());
    for column in &snapshot.columns {
        assert_eq!(column.display, "30.0s");
        assert!(!column.running);
    }
}

#[test]
fn test_walk_to_bench_stops_at_bench() {
    let (mut session, _) = session();
    walk_to_column_bench(&mut session);

    let snapshot = session.snapshot().unwrap();
    assert_eq!((snapshot.player.row, snapshot.player.col), (15, 12));
    assert!(!snapshot.player.moving);
    assert_eq!(snapshot.near_bench, Some("bench_col_1"));
    assert_eq!(
        snapshot.prompt.as_deref(),
        Some("Press SPACE to view your columns")
    );
}

#[test]
fn test_interact_away_from_bench_does_nothing() {
    let (mut session, _) = session();
    session.apply(Action::Interact).unwrap();
    assert_eq!(session.scene(), Scene::Lab);
}

#[test]
fn test_columns_round_trip() {
    let (mut session, clock) = session();
    walk_to_column_bench(&mut session);

    session.apply(Action::Interact).unwrap();
    assert_eq!(session.scene(), Scene::Columns);

    session.apply(Action::StartColumn(1)).unwrap();
    session.apply(Action::StartColumn(2)).unwrap();
    clock.advance(Duration::from_secs(5));
    session.apply(Action::StopColumn(2)).unwrap();

    // Back in the lab the timers keep going.
    session.apply(Action::Escape).unwrap();
    assert_eq!(session.scene(), Scene::Lab);
    assert!(!session.should_quit());
    clock.advance(Duration::from_secs(10));

    let snapshot = session.snapshot().unwrap();
    assert_eq!(snapshot.column(1).unwrap().display, "15.0s");
    assert_eq!(snapshot.column(2).unwrap().display, "25.0s");
    assert_eq!(snapshot.column(3).unwrap().display, "30.0s");

    clock.advance(Duration::from_secs(15));
    let snapshot = session.snapshot().unwrap();
    assert!(snapshot.column(1).unwrap().finished);
    assert_eq!(snapshot.column(1).unwrap().remaining_secs, 0.0);
    assert!(!snapshot.all_finished());
}

#[test]
fn test_actions_outside_their_scene_are_ignored() {
    let (mut session, clock) = session();

    // Column control does nothing in the lab.
    session.apply(Action::StartColumn(1)).unwrap();
    clock.advance(Duration::from_secs(3));
    assert_eq!(session.readouts().unwrap()[0].display, "30.0s");

    walk_to_column_bench(&mut session);
    session.apply(Action::Interact).unwrap();

    // Movement does nothing in the columns, and the lab is frozen.
    session.apply(Action::PressMove(Direction::Down)).unwrap();
    session.tick(Duration::from_secs(2));
    assert_eq!(session.lab().player().row(), 15);

    // Unknown columns are ignored rather than fatal.
    session.apply(Action::StartColumn(7)).unwrap();
}

#[test]
fn test_leaving_lab_forgets_held_directions() {
    let (mut session, _) = session();
    walk_to_column_bench(&mut session);
    session.apply(Action::PressMove(Direction::Down)).unwrap();
    session.apply(Action::Interact).unwrap();
    session.apply(Action::Escape).unwrap();

    session.tick(STEP);
    assert_eq!(session.lab().player().row(), 15);
}

#[test]
fn test_escape_in_lab_quits() {
    let (mut session, _) = session();
    session.apply(Action::Escape).unwrap();
    assert!(session.should_quit());
    assert!(session.snapshot().unwrap().quit);

    // Nothing applies after quitting.
    session.apply(Action::PressMove(Direction::Up)).unwrap();
    session.tick(Duration::from_secs(1));
    assert_eq!(session.lab().player().row(), 9);
}

#[test]
fn test_custom_parts_surface_missing_timer() {
    let clock = ManualClock::new();
    let mut timers = TimerManager::new();
    timers.add_timer("col1", Timer::with_clock(Duration::from_secs(10), clock.clone()));

    let lab = LabState::with_player(
        LabMap::starter(),
        Player::new(15, 12),
        LabTiming::default(),
    );
    let mut session = Session::from_parts(timers, lab, ColumnGame::with_count(2));

    session.apply(Action::Interact).unwrap();
    session.apply(Action::StartColumn(1)).unwrap();
    assert!(session.apply(Action::StartColumn(2)).is_err());
    assert!(session.snapshot().is_err());
}

#[test]
fn test_configured_column_length() {
    let clock = ManualClock::new();
    let config = SessionConfig {
        column_secs: 12.5,
        ..SessionConfig::default()
    };
    let session = Session::with_clock(config, clock);
    assert_eq!(session.readouts().unwrap()[2].display, "12.5s");
}

#[test]
fn test_oversized_column_length_falls_back_to_default() {
    let config = SessionConfig::from_lookup(|key| {
        (key == "CHEM_DASH_COLUMN_SECS").then(|| "1e20".to_string())
    });
    let session = Session::with_clock(config, ManualClock::new());
    let readouts = session.readouts().unwrap();
    let column = &readouts[0];
    assert_eq!(column.display, "30.0s");
    assert!(!column.finished);
}
