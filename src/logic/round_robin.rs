//! Round-robin schedule generation (circle method).

use crate::models::{Fixture, FixtureError, ParticipantId, Phase, Scope};

/// Label for a round-robin round.
pub fn matchday_name(round: u32) -> String {
    format!("Matchday {}", round + 1)
}

/// Build a schedule in which every pair of participants meets exactly once.
///
/// 1. Odd count: append one bye slot.
/// 2. For each of the `n - 1` rounds pair `slots[i]` with `slots[n - 1 - i]`, skipping byes.
///    `match_index` is the pairing position `i`, so a round with a bye has a gap.
/// 3. Rotate: the last slot moves to index 1, index 0 stays fixed.
pub fn generate_round_robin(
    scope: Scope,
    participants: &[ParticipantId],
) -> Result<Vec<Fixture>, FixtureError> {
    if participants.len() < 2 {
        return Err(FixtureError::NotEnoughParticipants {
            found: participants.len(),
        });
    }

    let mut slots: Vec<Option<ParticipantId>> = participants.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let total_rounds = n - 1;
    let matches_per_round = n / 2;
    let mut fixtures = Vec::with_capacity(total_rounds * matches_per_round);

    for round in 0..total_rounds as u32 {
        for i in 0..matches_per_round {
            let (team_a, team_b) = match (slots[i], slots[n - 1 - i]) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            fixtures.push(Fixture::new(
                scope,
                Phase::RoundRobin,
                round,
                matchday_name(round),
                i as u32,
                Some(team_a),
                Some(team_b),
            ));
        }
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }

    Ok(fixtures)
}
