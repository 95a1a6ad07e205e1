//! Single-elimination bracket generation and round naming.

use crate::models::{Fixture, FixtureError, ParticipantId, Phase, Scope};

/// Name a knockout round by its distance from the final.
///
/// `round` is relative to the bracket's first round, not the event's absolute round number.
pub fn round_name(round: u32, total_rounds: u32) -> String {
    let rounds_from_end = total_rounds.saturating_sub(1).saturating_sub(round);
    match rounds_from_end {
        0 => "Final".to_string(),
        1 => "Semi-Final".to_string(),
        2 => "Quarter-Final".to_string(),
        3 => "Round of 16".to_string(),
        _ => format!("Round {}", round + 1),
    }
}

/// Number of rounds in a bracket for `participants` entrants (after power-of-two padding).
pub fn total_rounds(participants: usize) -> u32 {
    participants.max(1).next_power_of_two().trailing_zeros()
}

/// Build a bracket from an ordered participant list. Order is the draw: callers seed or
/// shuffle first.
///
/// Pads with byes to the next power of two. Round 0 pairs `(2j, 2j + 1)`; every later
/// round is emitted with empty slots, filled in as winners propagate. Byes are not
/// auto-advanced here.
pub fn generate_knockout(
    scope: Scope,
    participants: &[ParticipantId],
    start_round: u32,
) -> Result<Vec<Fixture>, FixtureError> {
    if participants.len() < 2 {
        return Err(FixtureError::NotEnoughParticipants {
            found: participants.len(),
        });
    }

    let size = participants.len().next_power_of_two();
    let total = total_rounds(size);
    let mut current: Vec<Option<ParticipantId>> = participants.iter().copied().map(Some).collect();
    current.resize(size, None);

    let mut fixtures = Vec::with_capacity(size - 1);
    let mut rel_round = 0;
    while current.len() > 1 {
        for (j, pair) in current.chunks_exact(2).enumerate() {
            fixtures.push(Fixture::new(
                scope,
                Phase::Knockout,
                start_round + rel_round,
                round_name(rel_round, total),
                j as u32,
                pair[0],
                pair[1],
            ));
        }
        current = vec![None; current.len() / 2];
        rel_round += 1;
    }

    Ok(fixtures)
}
