//! Fixture engine algorithms: schedules, brackets, standings, qualification, results.

mod knockout;
mod qualification;
mod results;
mod round_robin;
mod standings;

pub use knockout::{generate_knockout, round_name, total_rounds};
pub use qualification::{
    bracket_from_standings, knockout_start_round, seed_bracket, select_qualifiers,
    DEFAULT_QUALIFIERS,
};
pub use results::{
    apply_update, apply_winner, derive_winner, lone_participant, next_slot, propagates,
    settle_winner, winning_side,
};
pub use round_robin::{generate_round_robin, matchday_name};
pub use standings::{compare_standings, compute_standings, Standing, POINTS_FOR_DRAW, POINTS_FOR_WIN};
