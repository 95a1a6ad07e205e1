//! Integration tests for result entry: winner derivation and bracket propagation.

mod common;

use common::setup;
use tourney_fixtures::{
    Fixture, FixtureError, FixtureStatus, FixtureUpdate, GenerateRequest, TournamentId,
};

fn knockout(teams: usize) -> (common::Setup, Vec<Fixture>) {
    let s = setup(teams);
    let fixtures = s
        .service
        .generate(s.tournament_id, GenerateRequest::default())
        .unwrap();
    (s, fixtures)
}

fn at(fixtures: &[Fixture], round: u32, match_index: u32) -> Fixture {
    fixtures
        .iter()
        .find(|f| f.round == round && f.match_index == match_index)
        .cloned()
        .unwrap()
}

fn stored(s: &common::Setup, tournament_id: TournamentId, round: u32, match_index: u32) -> Fixture {
    at(&s.service.fixtures(tournament_id, None).unwrap(), round, match_index)
}

#[test]
fn score_derives_winner_and_fills_parent_slot() {
    let (s, fixtures) = knockout(8);
    let source = at(&fixtures, 0, 3);

    let updated = s
        .service
        .update_fixture(source.id, FixtureUpdate::score(0, 2))
        .unwrap();
    assert_eq!(updated.winner, source.team_b);
    assert_eq!(updated.status, FixtureStatus::Completed);

    let parent = stored(&s, s.tournament_id, 1, 1);
    assert_eq!(parent.team_b, source.team_b);
    assert_eq!(parent.team_a, None);
}

#[test]
fn even_index_fills_team_a() {
    let (s, fixtures) = knockout(4);
    let source = at(&fixtures, 0, 0);
    s.service
        .update_fixture(source.id, FixtureUpdate::score(5, 4))
        .unwrap();
    let final_ = stored(&s, s.tournament_id, 1, 0);
    assert_eq!(final_.team_a, source.team_a);
    assert_eq!(final_.team_b, None);
}

#[test]
fn split_score_updates_still_settle_winner() {
    let (s, fixtures) = knockout(4);
    let source = at(&fixtures, 0, 1);
    let first = s
        .service
        .update_fixture(
            source.id,
            FixtureUpdate {
                score_a: Some(Some(1)),
                ..FixtureUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(first.winner, None);

    let second = s
        .service
        .update_fixture(
            source.id,
            FixtureUpdate {
                score_b: Some(Some(3)),
                ..FixtureUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(second.winner, source.team_b);
    assert_eq!(stored(&s, s.tournament_id, 1, 0).team_b, source.team_b);

    // Saving the same result again leaves everything as it was.
    let again = s
        .service
        .update_fixture(source.id, FixtureUpdate::default())
        .unwrap();
    assert_eq!(again.winner, source.team_b);
}

#[test]
fn tie_keeps_explicit_winner() {
    let (s, fixtures) = knockout(2);
    let source = at(&fixtures, 0, 0);
    let updated = s
        .service
        .update_fixture(
            source.id,
            FixtureUpdate {
                winner: Some(source.team_b),
                ..FixtureUpdate::score(1, 1)
            },
        )
        .unwrap();
    assert_eq!(updated.winner, source.team_b);
}

#[test]
fn bye_advances_when_marked_completed() {
    let (s, fixtures) = knockout(3);
    // 3 teams pad to 4: match 1 pairs the third team with a bye.
    let bye_match = at(&fixtures, 0, 1);
    assert!(bye_match.team_a.is_some());
    assert_eq!(bye_match.team_b, None);
    assert_eq!(stored(&s, s.tournament_id, 1, 0).team_b, None);

    let updated = s
        .service
        .update_fixture(
            bye_match.id,
            FixtureUpdate {
                status: Some(FixtureStatus::Completed),
                ..FixtureUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.winner, bye_match.team_a);
    assert_eq!(stored(&s, s.tournament_id, 1, 0).team_b, bye_match.team_a);
}

#[test]
fn final_result_has_nowhere_to_go() {
    let (s, fixtures) = knockout(2);
    let final_ = at(&fixtures, 0, 0);
    let updated = s
        .service
        .update_fixture(final_.id, FixtureUpdate::score(2, 1))
        .unwrap();
    assert_eq!(updated.winner, final_.team_a);
    assert_eq!(s.service.fixtures(s.tournament_id, None).unwrap().len(), 1);
}

#[test]
fn propagation_is_single_hop() {
    let (s, fixtures) = knockout(4);
    let semi = at(&fixtures, 0, 0);
    let other_semi = at(&fixtures, 0, 1);
    s.service.update_fixture(semi.id, FixtureUpdate::score(1, 0)).unwrap();
    s.service
        .update_fixture(other_semi.id, FixtureUpdate::score(1, 0))
        .unwrap();
    let final_ = stored(&s, s.tournament_id, 1, 0);
    s.service.update_fixture(final_.id, FixtureUpdate::score(2, 0)).unwrap();

    // Correcting a semi-final moves the new winner up but leaves the final's result alone.
    s.service.update_fixture(semi.id, FixtureUpdate::score(0, 1)).unwrap();
    let final_ = stored(&s, s.tournament_id, 1, 0);
    assert_eq!(final_.team_a, semi.team_b);
    assert_eq!(final_.winner, semi.team_a);
}

#[test]
fn round_robin_results_do_not_propagate() {
    let s = setup(0);
    let (event_id, _) = s.event("Round-Robin", 4);
    let fixtures = s
        .service
        .generate(
            s.tournament_id,
            GenerateRequest {
                event_id: Some(event_id),
                force: false,
            },
        )
        .unwrap();
    let source = at(&fixtures, 0, 1);
    s.service
        .update_fixture(source.id, FixtureUpdate::score(3, 0))
        .unwrap();

    let after = s.service.fixtures(s.tournament_id, Some(event_id)).unwrap();
    for f in after.iter().filter(|f| f.id != source.id) {
        let before = fixtures.iter().find(|b| b.id == f.id).unwrap();
        assert_eq!((f.team_a, f.team_b), (before.team_a, before.team_b));
    }
}

#[test]
fn only_result_fields_change() {
    let (s, fixtures) = knockout(4);
    let source = at(&fixtures, 0, 0);
    let updated = s
        .service
        .update_fixture(
            source.id,
            FixtureUpdate {
                status: Some(FixtureStatus::Ongoing),
                notes: Some(Some("Court 2".to_string())),
                ..FixtureUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.status, FixtureStatus::Ongoing);
    assert_eq!(updated.notes.as_deref(), Some("Court 2"));
    assert_eq!(
        (updated.round, updated.match_index, updated.team_a, updated.team_b),
        (source.round, source.match_index, source.team_a, source.team_b)
    );
    assert_eq!(updated.winner, None);
}

#[test]
fn retracted_result_drops_out_of_standings() {
    let s = setup(0);
    let (event_id, players) = s.event("Round-Robin", 2);
    let request = GenerateRequest {
        event_id: Some(event_id),
        force: false,
    };
    let fixtures = s.service.generate(s.tournament_id, request).unwrap();
    let source = &fixtures[0];
    s.service
        .update_fixture(source.id, FixtureUpdate::score(3, 1))
        .unwrap();
    let table = s.service.standings(s.tournament_id, Some(event_id)).unwrap();
    assert_eq!(table.len(), 2);
    assert!(players.contains(&table[0].team_id));
    assert_eq!(table[0].points, 3);

    // Explicit nulls clear the result; absent fields stay as they were.
    let retract: FixtureUpdate = serde_json::from_value(serde_json::json!({
        "score_a": null,
        "score_b": null,
        "winner": null,
        "status": "scheduled",
    }))
    .unwrap();
    assert_eq!(retract, FixtureUpdate::retract());
    let retracted = s.service.update_fixture(source.id, retract).unwrap();
    assert_eq!(retracted.status, FixtureStatus::Scheduled);
    assert_eq!((retracted.score_a, retracted.score_b), (None, None));
    assert_eq!(retracted.winner, None);
    assert!(s
        .service
        .standings(s.tournament_id, Some(event_id))
        .unwrap()
        .is_empty());
}

#[test]
fn null_notes_clear_them() {
    let (s, fixtures) = knockout(2);
    let source = at(&fixtures, 0, 0);
    let noted = FixtureUpdate {
        notes: Some(Some("Court 2".to_string())),
        ..FixtureUpdate::default()
    };
    s.service.update_fixture(source.id, noted).unwrap();
    let cleared = FixtureUpdate {
        notes: Some(None),
        ..FixtureUpdate::default()
    };
    assert_eq!(s.service.update_fixture(source.id, cleared).unwrap().notes, None);
}

#[test]
fn unknown_fixture_is_not_found() {
    let (s, _) = knockout(2);
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        s.service.update_fixture(missing, FixtureUpdate::score(1, 0)),
        Err(FixtureError::FixtureNotFound(missing))
    );
}
