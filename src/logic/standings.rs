//! League table: per-participant records from scored fixtures.

use crate::models::{Fixture, ParticipantId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// One row of the standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: ParticipantId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl Standing {
    pub fn new(team_id: ParticipantId) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += POINTS_FOR_WIN;
            }
            Ordering::Equal => {
                self.drawn += 1;
                self.points += POINTS_FOR_DRAW;
            }
            Ordering::Less => self.lost += 1,
        }
    }
}

/// Ranking order: points, then goal difference, both descending.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
}

/// Compute ranked standings from fixtures. Callers filter by phase first.
///
/// Only fixtures with both scores count. A scored fixture with a missing side registers
/// the present participant but records nothing. Ties on points and goal difference keep
/// first-appearance order.
pub fn compute_standings<'a, I>(fixtures: I) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a Fixture>,
{
    let mut table: Vec<Standing> = Vec::new();
    let mut index: HashMap<ParticipantId, usize> = HashMap::new();
    let mut slot = |id: ParticipantId, table: &mut Vec<Standing>| -> usize {
        *index.entry(id).or_insert_with(|| {
            table.push(Standing::new(id));
            table.len() - 1
        })
    };

    for fx in fixtures {
        let (Some(score_a), Some(score_b)) = (fx.score_a, fx.score_b) else {
            continue;
        };
        let a = fx.team_a.map(|id| slot(id, &mut table));
        let b = fx.team_b.map(|id| slot(id, &mut table));
        let (Some(a), Some(b)) = (a, b) else {
            continue;
        };
        table[a].record(score_a, score_b);
        table[b].record(score_b, score_a);
    }

    table.sort_by(compare_standings);
    table
}
