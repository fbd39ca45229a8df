use proptest::prelude::*;

use super::*;
use crate::foundation::core::GridPos;
use crate::model::maze::CellCode;

fn maze() -> Maze {
    Maze::open(10, 10, GridPos::new(0, 0), GridPos::new(9, 9)).unwrap()
}

fn speed(v: u8) -> Speed {
    Speed::new(v).unwrap()
}

// `n` steps each marking one frontier cell in rows 1..=8, last one finishing with success.
fn steps(n: usize) -> Vec<Step> {
    (0..n)
        .map(|i| {
            let updates = vec![GridUpdate::new(1 + (i / 10) % 8, i % 10, CellCode::Frontier)];
            if i + 1 == n {
                Step::finish(updates, (i + 1) as u64, true, 7)
            } else {
                Step::progress(updates, (i + 1) as u64)
            }
        })
        .collect()
}

fn armed(n: usize) -> Playback {
    let mut p = Playback::new();
    p.arm();
    p.load(steps(n));
    p
}

fn no_redraw(_: &[GridUpdate], _: &Maze) -> MazeResult<()> {
    Ok(())
}

#[test]
fn fast_speed_consumes_fifty_steps_per_tick() {
    let mut m = maze();
    let mut p = armed(120);

    let r = p.advance(speed(100), &mut m, no_redraw).unwrap();
    assert_eq!(r.applied, 50);
    assert_eq!(r.outcome, TickOutcome::NextFrame);
    assert_eq!(p.cursor(), 50);

    p.advance(speed(100), &mut m, no_redraw).unwrap();
    let r = p.advance(speed(100), &mut m, no_redraw).unwrap();
    assert_eq!(r.applied, 20);
    assert_eq!(r.outcome, TickOutcome::Done(PlaybackState::Finished));
    assert_eq!(p.cursor(), 120);
    assert!(p.accepts_start());
}

#[test]
fn slow_speed_applies_one_step_then_waits() {
    let mut m = maze();
    let mut p = armed(3);
    let r = p.advance(speed(10), &mut m, no_redraw).unwrap();
    assert_eq!(r.applied, 1);
    assert_eq!(r.outcome, TickOutcome::After(Duration::from_millis(200)));
    assert_eq!(r.published.map(|s| s.nodes_expanded), Some(1));
}

#[test]
fn speed_is_reread_every_tick() {
    let mut m = maze();
    let mut p = armed(30);
    assert_eq!(p.advance(speed(60), &mut m, no_redraw).unwrap().applied, 2);
    assert_eq!(p.advance(speed(80), &mut m, no_redraw).unwrap().applied, 10);
    assert_eq!(p.advance(speed(20), &mut m, no_redraw).unwrap().applied, 1);
    assert_eq!(p.cursor(), 13);
}

#[test]
fn stats_publish_every_tenth_step_and_on_the_last() {
    let mut m = maze();
    let mut p = armed(25);
    let mut published = Vec::new();
    loop {
        let r = p.advance(speed(40), &mut m, no_redraw).unwrap();
        if let Some(s) = r.published {
            published.push(s.nodes_expanded);
        }
        if matches!(r.outcome, TickOutcome::Done(_)) {
            break;
        }
    }
    assert_eq!(published, vec![1, 11, 21, 25]);
    let last = p.stats();
    assert_eq!(last.success, Some(true));
    assert_eq!(last.path_length, Some(7));
}

#[test]
fn failed_search_reports_no_path_length() {
    let mut m = maze();
    let mut p = Playback::new();
    p.arm();
    p.load(vec![Step::finish(vec![], 4, false, 99)]);
    let r = p.advance(speed(100), &mut m, no_redraw).unwrap();
    let s = r.published.unwrap();
    assert_eq!(s.success, Some(false));
    assert_eq!(s.path_length, None);
}

#[test]
fn deltas_are_applied_to_the_maze_and_redrawn_in_order() {
    let mut m = maze();
    let mut p = armed(4);
    let mut seen = Vec::new();
    while !matches!(
        p.advance(speed(100), &mut m, |u, maze| {
            assert_eq!(maze.get(u[0].pos), Some(u[0].code));
            seen.push(u[0].pos);
            Ok(())
        })
        .unwrap()
        .outcome,
        TickOutcome::Done(_)
    ) {}
    assert_eq!(
        seen,
        (0..4).map(|c| GridPos::new(1, c)).collect::<Vec<_>>()
    );
    assert_eq!(m.get(GridPos::new(1, 3)), Some(CellCode::Frontier));
}

#[test]
fn cancel_stops_work_on_next_tick() {
    let mut m = maze();
    let mut p = armed(10);
    p.advance(speed(1), &mut m, no_redraw).unwrap();

    assert!(p.cancel());
    assert!(!p.cancel());
    assert!(!p.accepts_start());

    let mut redraws = 0;
    let r = p
        .advance(speed(100), &mut m, |_, _| {
            redraws += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(r.outcome, TickOutcome::Done(PlaybackState::Cancelled));
    assert_eq!(r.applied, 0);
    assert_eq!(redraws, 0);
    assert_eq!(p.cursor(), 1);
    assert!(p.accepts_start());

    // Further ticks stay inert.
    let r = p.advance(speed(100), &mut m, no_redraw).unwrap();
    assert_eq!(r.applied, 0);
}

#[test]
fn cancel_outside_a_run_is_a_no_op() {
    let mut p = Playback::new();
    assert!(!p.cancel());
    assert_eq!(p.state(), PlaybackState::Idle);
}

#[test]
fn arm_takes_the_run_lock_and_disarm_releases_it() {
    let mut p = Playback::new();
    assert!(p.accepts_start());
    p.arm();
    assert_eq!(p.state(), PlaybackState::Running);
    assert!(!p.accepts_start());
    p.disarm();
    assert_eq!(p.state(), PlaybackState::Idle);
    assert!(p.accepts_start());
    assert!(p.is_empty());
}

#[test]
fn redraw_failure_ends_the_run() {
    let mut m = maze();
    let mut p = armed(5);
    let err = p
        .advance(speed(100), &mut m, |_, _| {
            Err(crate::foundation::error::MazeError::render("boom"))
        })
        .unwrap_err();
    assert!(err.to_string().contains("boom"));
    assert_eq!(p.state(), PlaybackState::Idle);
    assert!(p.accepts_start());
}

proptest! {
    #[test]
    fn cursor_is_monotonic_and_each_step_applied_once(
        n in 1usize..80,
        speeds in prop::collection::vec(1u8..=100, 1..64),
    ) {
        let mut m = maze();
        let mut p = armed(n);
        let mut applied_total = 0usize;
        let mut last_cursor = 0usize;
        for (i, v) in speeds.iter().cycle().enumerate() {
            let r = p.advance(speed(*v), &mut m, no_redraw).unwrap();
            prop_assert!(p.cursor() >= last_cursor);
            prop_assert!(p.cursor() <= n);
            last_cursor = p.cursor();
            applied_total += r.applied;
            if matches!(r.outcome, TickOutcome::Done(_)) || i > 200 {
                break;
            }
        }
        prop_assert_eq!(applied_total, n);
        prop_assert_eq!(p.state(), PlaybackState::Finished);
    }
}
