//! End-to-end game scenarios driven through `Session` and the engine.
//!
//! Each test edits a program, runs it to completion with pauses skipped and
//! checks the verdict and the final state the session exposes.

use gridbot::catalog::LevelCatalog;
use gridbot::core::command::{Action, CommandKind};
use gridbot::core::geometry::{Direction, Position};
use gridbot::core::goal::checkpoints;
use gridbot::core::state::RunState;
use gridbot::core::types::{LossReason, Outcome, Phase, RunSummary};
use gridbot::engine::{NoPause, StepEvent, execute};
use gridbot::io::config::TimingConfig;
use gridbot::session::{RunHandle, Session};
use gridbot::test_support::go_to_all;

const SPECIAL_TASK: usize = 4;

fn session_on(index: usize) -> Session {
    let mut session = Session::new(LevelCatalog::builtin()).expect("session");
    session.select_level(index).expect("select");
    session
}

fn play(session: &mut Session, actions: &[Action]) -> RunSummary {
    for action in actions {
        session.append(*action).expect("append");
    }
    let RunHandle { id, run } = session.start_run().expect("start");
    let mut snapshots = Vec::new();
    let summary = execute(run, &NoPause, &TimingConfig::default(), |event| {
        if let StepEvent::Advanced(snapshot) = event {
            snapshots.push(snapshot.clone());
        }
    });
    for snapshot in &snapshots {
        session.record_snapshot(id, snapshot);
    }
    assert!(session.finish_run(id, &summary));
    summary
}

#[test]
fn level_one_four_moves_wins() {
    let mut session = session_on(0);
    let summary = play(&mut session, &[Action::Move; 4]);

    assert_eq!(summary.outcome, Outcome::Won);
    assert_eq!(session.phase(), Phase::Won);
    assert_eq!(session.state().position, Position::new(4, 2));
    assert_eq!(session.state().direction, Direction::East);
    assert_eq!(session.state().current_step, None);
    assert!(session.has_next_level());
}

#[test]
fn level_one_two_moves_falls_short() {
    let mut session = session_on(0);
    let summary = play(&mut session, &[Action::Move; 2]);

    assert_eq!(
        summary.outcome,
        Outcome::lost(LossReason::GoalNotReached {
            final_position: Position::new(2, 2)
        })
    );
    assert_eq!(session.phase(), Phase::Lost);
    assert_eq!(session.state().position, Position::new(2, 2));
}

#[test]
fn level_two_route_around_obstacles_wins() {
    // Start (1,3) facing east, goal (3,1), obstacles at (3,3) and (1,1).
    let mut session = session_on(1);
    let summary = play(
        &mut session,
        &[
            Action::Move,
            Action::TurnLeft,
            Action::Move,
            Action::Move,
            Action::TurnRight,
            Action::Move,
        ],
    );
    assert_eq!(summary.outcome, Outcome::Won);
    assert_eq!(summary.snapshot.position, Position::new(3, 1));
}

#[test]
fn level_two_straight_line_hits_obstacle() {
    let mut session = session_on(1);
    let summary = play(&mut session, &[Action::Move, Action::Move, Action::Move]);
    assert_eq!(
        summary.outcome,
        Outcome::lost(LossReason::Obstacle {
            at: Position::new(3, 3)
        })
    );
    assert_eq!(summary.steps_executed, 2);
    assert_eq!(session.state().position, Position::new(3, 3));
}

#[test]
fn special_task_wins_in_any_visiting_order() {
    let targets = checkpoints(5);
    let orders: [[usize; 5]; 4] = [
        [0, 1, 2, 3, 4],
        [4, 3, 2, 1, 0],
        [2, 0, 4, 1, 3],
        [1, 3, 0, 4, 2],
    ];
    for order in orders {
        let mut session = session_on(SPECIAL_TASK);
        let route: Vec<Position> = order.iter().map(|&i| targets[i]).collect();
        let summary = play(&mut session, &go_to_all(&route));
        assert_eq!(summary.outcome, Outcome::Won, "order {order:?}");
        assert!(session.checkpoints().iter().all(|row| row.visited));
    }
}

#[test]
fn special_task_omitting_any_checkpoint_loses() {
    let targets = checkpoints(5);
    for skipped in 0..targets.len() {
        let mut session = session_on(SPECIAL_TASK);
        let route: Vec<Position> = targets
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skipped)
            .map(|(_, cell)| *cell)
            .collect();
        let summary = play(&mut session, &go_to_all(&route));
        assert_eq!(
            summary.outcome,
            Outcome::lost(LossReason::CheckpointsMissed {
                missing: vec![targets[skipped]]
            }),
            "skipped {}",
            targets[skipped]
        );
    }
}

#[test]
fn special_task_accepts_glide_and_extra_cells() {
    let mut session = session_on(SPECIAL_TASK);
    let summary = play(
        &mut session,
        &[
            Action::GoTo(Position::new(1, 1)),
            Action::Glide(Position::new(0, 0)),
            Action::GoTo(Position::new(4, 0)),
            Action::Glide(Position::new(4, 4)),
            Action::GoTo(Position::new(3, 3)),
            Action::GoTo(Position::new(0, 4)),
            Action::Glide(Position::new(2, 2)),
        ],
    );
    assert_eq!(summary.outcome, Outcome::Won);
}

#[test]
fn go_to_ignores_obstacles_and_bounds() {
    // Level one with an obstacle on the straight path; GoTo lands on it and
    // on an off-board cell without losing.
    let mut level = LevelCatalog::builtin().get(0).expect("level one").clone();
    level.allowed_commands.push(CommandKind::GoTo);
    level.obstacles = vec![Position::new(2, 2)];
    let catalog = LevelCatalog::from_levels(vec![level]).expect("catalog");
    let mut session = Session::new(catalog).expect("session");

    let summary = play(
        &mut session,
        &[
            Action::GoTo(Position::new(2, 2)),
            Action::GoTo(Position::new(9, 9)),
            Action::GoTo(Position::new(4, 2)),
        ],
    );
    assert_eq!(summary.outcome, Outcome::Won);
    assert_eq!(summary.steps_executed, 3);
}

#[test]
fn stop_during_first_step_aborts_to_idle() {
    let mut session = session_on(0);
    for _ in 0..4 {
        session.append(Action::Move).expect("append");
    }
    let RunHandle { id, mut run } = session.start_run().expect("start");
    assert_eq!(session.phase(), Phase::Running);

    // Stop arrives while the first pause is pending.
    assert!(session.stop());
    assert!(run.next_pause(&TimingConfig::default()).is_none());
    let Some(StepEvent::Finished(summary)) = run.next() else {
        panic!("expected finish");
    };
    assert_eq!(summary.outcome, Outcome::Aborted);
    assert_eq!(summary.steps_executed, 0);
    assert!(!session.finish_run(id, &summary));

    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.state(), &RunState::idle(session.level()));
    assert_eq!(session.program().len(), 4);
}

#[test]
fn editing_after_a_verdict_clears_it() {
    let mut session = session_on(0);
    play(&mut session, &[Action::Move; 4]);
    assert_eq!(session.phase(), Phase::Won);

    session.clear().expect("clear");
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.last_outcome(), None);
    assert!(session.program().is_empty());
    assert_eq!(session.state().position, Position::new(0, 2));
}

#[test]
fn rerun_starts_from_the_start_pose() {
    let mut session = session_on(0);
    let first = play(&mut session, &[Action::Move; 2]);
    assert_eq!(first.snapshot.position, Position::new(2, 2));

    session.append(Action::Move).expect("append");
    session.append(Action::Move).expect("append");
    let RunHandle { run, .. } = session.start_run().expect("start");
    let summary = execute(run, &NoPause, &TimingConfig::default(), |_| {});
    assert_eq!(summary.outcome, Outcome::Won);
}
