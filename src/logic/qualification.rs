//! Round-robin to knockout cutover: pick qualifiers from standings and seed the bracket.

use crate::logic::knockout::generate_knockout;
use crate::logic::standings::{compute_standings, Standing};
use crate::models::{Fixture, FixtureError, ParticipantId, Phase, Scope};

/// Qualifiers taken from the table when the caller does not say.
pub const DEFAULT_QUALIFIERS: usize = 4;

/// Order ranked participants so the best meet the worst: `[1st, Kth, 2nd, (K-1)th, ...]`.
pub fn seed_bracket(ranked: &[ParticipantId]) -> Vec<ParticipantId> {
    let mut seeded = Vec::with_capacity(ranked.len());
    let mut front = ranked.iter();
    loop {
        match (front.next(), front.next_back()) {
            (Some(&high), Some(&low)) => {
                seeded.push(high);
                seeded.push(low);
            }
            (Some(&middle), None) => {
                seeded.push(middle);
                break;
            }
            _ => break,
        }
    }
    seeded
}

/// Top `qualifiers` participants by rank. Errors if fewer than 2 qualify.
pub fn select_qualifiers(
    standings: &[Standing],
    qualifiers: usize,
) -> Result<Vec<ParticipantId>, FixtureError> {
    let qualified: Vec<ParticipantId> = standings
        .iter()
        .take(qualifiers)
        .map(|s| s.team_id)
        .collect();
    if qualified.len() < 2 {
        return Err(FixtureError::NotEnoughQualifiers {
            found: qualified.len(),
        });
    }
    Ok(qualified)
}

/// First knockout round: one past the last round-robin round, or 0 with no round-robin.
pub fn knockout_start_round<'a, I>(round_robin: I) -> u32
where
    I: IntoIterator<Item = &'a Fixture>,
{
    round_robin
        .into_iter()
        .filter(|f| f.effective_phase() == Phase::RoundRobin)
        .map(|f| f.round + 1)
        .max()
        .unwrap_or(0)
}

/// Build the knockout stage that follows a round-robin phase.
///
/// `round_robin` is the scope's round-robin (and legacy) fixture set. Requires at least one
/// entered result. Returned fixtures start at [`knockout_start_round`].
pub fn bracket_from_standings(
    scope: Scope,
    round_robin: &[Fixture],
    qualifiers: usize,
) -> Result<Vec<Fixture>, FixtureError> {
    if round_robin.is_empty() {
        return Err(FixtureError::NoRoundRobinFixtures);
    }
    if !round_robin.iter().any(Fixture::has_result) {
        return Err(FixtureError::NoResultsEntered);
    }

    let standings = compute_standings(round_robin);
    let qualified = select_qualifiers(&standings, qualifiers)?;
    let seeded = seed_bracket(&qualified);
    generate_knockout(scope, &seeded, knockout_start_round(round_robin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::generate_round_robin;
    use uuid::Uuid;

    #[test]
    fn seeds_best_against_worst() {
        let ranked: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
        let seeded = seed_bracket(&ranked);
        assert_eq!(seeded, vec![ranked[0], ranked[3], ranked[1], ranked[2]]);
    }

    #[test]
    fn odd_field_puts_middle_seed_last() {
        let ranked: Vec<_> = (0..5).map(|_| Uuid::new_v4()).collect();
        let seeded = seed_bracket(&ranked);
        assert_eq!(
            seeded,
            vec![ranked[0], ranked[4], ranked[1], ranked[3], ranked[2]]
        );
    }

    #[test]
    fn one_qualifier_is_not_enough() {
        let standings = vec![Standing::new(Uuid::new_v4())];
        assert_eq!(
            select_qualifiers(&standings, 4),
            Err(FixtureError::NotEnoughQualifiers { found: 1 })
        );
    }

    #[test]
    fn bracket_continues_after_last_matchday() {
        let scope = Scope::new(Uuid::new_v4(), Some(Uuid::new_v4()));
        let players: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut rr = generate_round_robin(scope, &players).unwrap();
        // players[k] beats everyone listed after it.
        for f in &mut rr {
            let a = players.iter().position(|p| Some(*p) == f.team_a).unwrap();
            let b = players.iter().position(|p| Some(*p) == f.team_b).unwrap();
            let (sa, sb) = if a < b { (2, 0) } else { (0, 2) };
            f.score_a = Some(sa);
            f.score_b = Some(sb);
        }

        let ko = bracket_from_standings(scope, &rr, 4).unwrap();
        assert_eq!(ko.len(), 3);
        assert_eq!(ko[0].round, 3);
        assert_eq!(ko[0].round_name, "Semi-Final");
        assert_eq!((ko[0].team_a, ko[0].team_b), (Some(players[0]), Some(players[3])));
        assert_eq!((ko[1].team_a, ko[1].team_b), (Some(players[1]), Some(players[2])));
        assert_eq!((ko[2].round, ko[2].round_name.as_str()), (4, "Final"));
    }

    #[test]
    fn requires_some_results() {
        let scope = Scope::new(Uuid::new_v4(), Some(Uuid::new_v4()));
        let players: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
        let rr = generate_round_robin(scope, &players).unwrap();
        assert_eq!(
            bracket_from_standings(scope, &rr, 4),
            Err(FixtureError::NoResultsEntered)
        );
        assert_eq!(
            bracket_from_standings(scope, &[], 4),
            Err(FixtureError::NoRoundRobinFixtures)
        );
    }
}
