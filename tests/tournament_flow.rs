//! End-to-end: register, schedule, play every match with CPU paddles, tabulate

use pong_tournament::game::{MatchController, MatchPhase, WinPolicy};
use pong_tournament::renderer::{RenderSink, VertexRecorder};
use pong_tournament::sim::{Arena, Autopilot, Side};
use pong_tournament::tournament::{MatchStatus, Tournament, TournamentEvent, records};
use pong_tournament::{MatchId, TournamentError};

#[test]
fn three_player_scenario() {
    let mut t = Tournament::new();
    for alias in ["A", "B", "C"] {
        t.add_player(alias, None).unwrap();
    }
    t.start().unwrap();

    let expected = [
        ("0-1", (5, 3), Some("0-2")),
        ("0-2", (2, 5), Some("1-2")),
        ("1-2", (5, 1), None),
    ];
    for (id, (s1, s2), next) in expected {
        assert_eq!(t.current_match().unwrap().id.as_str(), id);
        let event = t.complete_match(&MatchId::from(id), s1, s2).unwrap();
        let TournamentEvent::MatchCompleted { next: got, finished, .. } = event else {
            panic!("expected MatchCompleted");
        };
        assert_eq!(got.as_ref().map(MatchId::as_str), next);
        assert_eq!(finished, next.is_none());
    }
    assert!(t.current_match().is_none());
    assert!(t.is_complete());

    let order: Vec<String> = t
        .standings()
        .entries
        .iter()
        .map(|e| e.player.alias.clone())
        .collect();
    assert_eq!(order, ["B", "A", "C"]);

    assert!(matches!(
        t.complete_match(&MatchId::from("0-1"), 1, 1),
        Err(TournamentError::MatchNotFound(_))
    ));
}

#[test]
fn headless_tournament_with_autopilots() {
    let arena = Arena::default();
    let mut t = Tournament::new();
    for alias in ["Ada", "Bob", "Cy", "Di"] {
        t.add_player(alias, None).unwrap();
    }
    t.start().unwrap();
    assert_eq!(t.matches().len(), 6);

    let mut sink = VertexRecorder::new();
    while let Some(m) = t.current_match().cloned() {
        t.begin_match(&m.id).unwrap();

        // Strong left paddle against a weak right one
        let left = Autopilot::new(Side::Left, 9);
        let right = Autopilot::new(Side::Right, 5);
        let mut controller = MatchController::new(arena, WinPolicy::FirstTo(3));
        controller.start(0.0).unwrap();

        let mut frames = 0;
        while controller.phase() == MatchPhase::Running && frames < 100_000 {
            controller.advance_with(1.0 / 60.0, |state| {
                left.drive(state, &arena).merge(right.drive(state, &arena))
            });
            frames += 1;
        }
        sink.draw(controller.state(), &arena);

        let outcome = controller.result().cloned().unwrap();
        assert_eq!(outcome.winner, Some(Side::Left));
        t.complete_match(&m.id, outcome.score1, outcome.score2).unwrap();
    }

    assert!(t.is_complete());
    assert_eq!(sink.frames, 6);
    assert!(t.matches().iter().all(|m| m.status == MatchStatus::Completed));

    // Player 1 of every pairing won, so roster order decides the table
    let standings = t.standings();
    let wins: Vec<u32> = standings.entries.iter().map(|e| e.wins).collect();
    assert_eq!(wins, [3, 2, 1, 0]);
    assert_eq!(standings.leader().unwrap().player.alias, "Ada");

    let rows = t.records(9);
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.winner_id.as_ref() == Some(&r.player1_id)));
    let json = records::to_json(&rows).unwrap();
    assert!(json.contains("\"tournament_id\": 9"));
}

#[test]
fn reset_returns_to_fresh_session() {
    let mut t = Tournament::new();
    t.add_player("A", None).unwrap();
    t.add_player("B", None).unwrap();
    t.start().unwrap();
    t.declare_winner(&MatchId::from("0-1"), Side::Left).unwrap();

    t.reset();
    assert_eq!(t, Tournament::new());
}
