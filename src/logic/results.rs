//! Result entry: winner derivation and one-hop bracket propagation.

use crate::models::{
    Fixture, FixtureError, FixtureId, FixtureStatus, FixtureUpdate, ParticipantId, Phase, Side,
};
use chrono::Utc;
use std::cmp::Ordering;

/// Side with the higher score, if both scores are in and differ.
pub fn winning_side(score_a: Option<u32>, score_b: Option<u32>) -> Option<Side> {
    match score_a?.cmp(&score_b?) {
        Ordering::Greater => Some(Side::A),
        Ordering::Less => Some(Side::B),
        Ordering::Equal => None,
    }
}

/// Winner implied by the fixture's scores.
pub fn derive_winner(fixture: &Fixture) -> Option<ParticipantId> {
    winning_side(fixture.score_a, fixture.score_b).and_then(|side| fixture.team(side))
}

/// The only participant in a fixture whose other side is a bye.
pub fn lone_participant(fixture: &Fixture) -> Option<ParticipantId> {
    match (fixture.team_a, fixture.team_b) {
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        _ => None,
    }
}

/// Apply a partial update, returning the new fixture state.
///
/// Scores that differ after the update decide the winner, overriding any explicit one. An
/// explicit winner stands only while scores are missing or tied. A `null` field clears it.
pub fn apply_update(fixture: &Fixture, update: &FixtureUpdate) -> Fixture {
    let mut next = fixture.clone();
    if let Some(status) = update.status {
        next.status = status;
    }
    if let Some(score) = update.score_a {
        next.score_a = score;
    }
    if let Some(score) = update.score_b {
        next.score_b = score;
    }
    if let Some(at) = update.scheduled_at {
        next.scheduled_at = at;
    }
    if let Some(notes) = &update.notes {
        next.notes = notes.clone();
    }

    let explicit = update.winner.unwrap_or(next.winner);
    next.winner = derive_winner(&next).or(explicit);

    next.updated_at = Utc::now();
    next
}

/// Fill a missing winner from the stored fixture. Returns true if it changed.
///
/// Scores that differ give the higher side. A completed fixture against a bye gives the
/// present participant. Running it again on the result is a no-op.
pub fn settle_winner(fixture: &mut Fixture) -> bool {
    if fixture.winner.is_some() {
        return false;
    }
    let derived = derive_winner(fixture).or_else(|| {
        if fixture.status == FixtureStatus::Completed {
            lone_participant(fixture)
        } else {
            None
        }
    });
    match derived {
        Some(winner) => {
            fixture.winner = Some(winner);
            true
        }
        None => false,
    }
}

/// Where a bracket fixture's winner goes: `(round + 1, match_index / 2)`, side by parity.
pub fn next_slot(round: u32, match_index: u32) -> (u32, u32, Side) {
    let side = if match_index % 2 == 0 { Side::A } else { Side::B };
    (round + 1, match_index / 2, side)
}

/// Whether a fixture's winner moves on to a later round.
pub fn propagates(fixture: &Fixture) -> bool {
    fixture.effective_phase() == Phase::Knockout
}

/// Set a winner on one bracket fixture and carry it one round forward.
///
/// Returns a new fixture list; the input is untouched. Only knockout fixtures of the same
/// scope are considered for the next slot, and a missing next fixture (the Final) is fine.
pub fn apply_winner(
    bracket: &[Fixture],
    fixture_id: FixtureId,
    winner: ParticipantId,
) -> Result<Vec<Fixture>, FixtureError> {
    let source = bracket
        .iter()
        .find(|f| f.id == fixture_id)
        .ok_or(FixtureError::FixtureNotFound(fixture_id))?;
    let scope = source.scope();
    let do_propagate = propagates(source);
    let (round, match_index, side) = next_slot(source.round, source.match_index);

    let mut next = bracket.to_vec();
    for f in &mut next {
        if f.id == fixture_id {
            f.winner = Some(winner);
        } else if do_propagate
            && scope.contains(f)
            && f.effective_phase() == Phase::Knockout
            && f.round == round
            && f.match_index == match_index
        {
            f.set_team(side, Some(winner));
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::generate_knockout;
    use crate::models::Scope;
    use uuid::Uuid;

    fn fixture(a: Option<ParticipantId>, b: Option<ParticipantId>) -> Fixture {
        Fixture::new(Scope::new(Uuid::new_v4(), None), Phase::Knockout, 0, "Final", 0, a, b)
    }

    #[test]
    fn scores_in_update_derive_winner() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let f = fixture(Some(a), Some(b));
        let updated = apply_update(&f, &FixtureUpdate::score(1, 3));
        assert_eq!(updated.winner, Some(b));
        assert_eq!(updated.status, FixtureStatus::Completed);
    }

    #[test]
    fn explicit_winner_is_kept_on_tie() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let f = fixture(Some(a), Some(b));
        let update = FixtureUpdate {
            winner: Some(Some(a)),
            ..FixtureUpdate::score(2, 2)
        };
        let mut updated = apply_update(&f, &update);
        assert_eq!(updated.winner, Some(a));
        assert!(!settle_winner(&mut updated));
    }

    #[test]
    fn scores_split_across_updates_still_decide() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut f = fixture(Some(a), Some(b));
        f = apply_update(
            &f,
            &FixtureUpdate {
                score_a: Some(Some(4)),
                ..FixtureUpdate::default()
            },
        );
        assert_eq!(f.winner, None);
        f = apply_update(
            &f,
            &FixtureUpdate {
                score_b: Some(Some(1)),
                ..FixtureUpdate::default()
            },
        );
        assert_eq!(f.winner, Some(a));
    }

    #[test]
    fn scores_override_contradicting_winner() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let f = fixture(Some(a), Some(b));
        let update = FixtureUpdate {
            winner: Some(Some(b)),
            ..FixtureUpdate::score(3, 0)
        };
        assert_eq!(apply_update(&f, &update).winner, Some(a));
    }

    #[test]
    fn settling_is_idempotent() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut f = fixture(Some(a), Some(b));
        f.score_a = Some(0);
        f.score_b = Some(2);
        assert!(settle_winner(&mut f));
        assert_eq!(f.winner, Some(b));
        assert!(!settle_winner(&mut f));
        assert_eq!(f.winner, Some(b));
    }

    #[test]
    fn retraction_clears_result() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let scored = apply_update(&fixture(Some(a), Some(b)), &FixtureUpdate::score(3, 1));
        assert_eq!(scored.winner, Some(a));

        let mut retracted = apply_update(&scored, &FixtureUpdate::retract());
        assert_eq!((retracted.score_a, retracted.score_b), (None, None));
        assert_eq!(retracted.winner, None);
        assert_eq!(retracted.status, FixtureStatus::Scheduled);
        assert!(!settle_winner(&mut retracted));
    }

    #[test]
    fn bye_advances_only_when_completed() {
        let a = Uuid::new_v4();
        let mut f = fixture(Some(a), None);
        assert!(!settle_winner(&mut f));
        f.status = FixtureStatus::Completed;
        assert!(settle_winner(&mut f));
        assert_eq!(f.winner, Some(a));
    }

    #[test]
    fn odd_index_feeds_team_b_of_parent() {
        assert_eq!(next_slot(0, 3), (1, 1, Side::B));
        assert_eq!(next_slot(0, 2), (1, 1, Side::A));
        assert_eq!(next_slot(2, 0), (3, 0, Side::A));
    }

    #[test]
    fn apply_winner_propagates_one_hop() {
        let players: Vec<_> = (0..8).map(|_| Uuid::new_v4()).collect();
        let scope = Scope::new(Uuid::new_v4(), Some(Uuid::new_v4()));
        let bracket = generate_knockout(scope, &players, 0).unwrap();
        let source = bracket
            .iter()
            .find(|f| f.round == 0 && f.match_index == 3)
            .unwrap();

        let next = apply_winner(&bracket, source.id, players[7]).unwrap();
        let parent = next
            .iter()
            .find(|f| f.round == 1 && f.match_index == 1)
            .unwrap();
        assert_eq!(parent.team_b, Some(players[7]));
        assert_eq!(parent.team_a, None);
        let final_ = next.iter().find(|f| f.round == 2).unwrap();
        assert_eq!((final_.team_a, final_.team_b), (None, None));
        // Input bracket unchanged.
        assert!(bracket.iter().all(|f| f.winner.is_none()));
    }

    #[test]
    fn final_winner_goes_nowhere() {
        let players: Vec<_> = (0..2).map(|_| Uuid::new_v4()).collect();
        let scope = Scope::new(Uuid::new_v4(), None);
        let bracket = generate_knockout(scope, &players, 0).unwrap();
        let next = apply_winner(&bracket, bracket[0].id, players[0]).unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].winner, Some(players[0]));
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let id = Uuid::new_v4();
        assert_eq!(
            apply_winner(&[], id, Uuid::new_v4()),
            Err(FixtureError::FixtureNotFound(id))
        );
    }
}
