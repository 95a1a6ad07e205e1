//! Shared setup for the service integration tests.

#![allow(dead_code)]

use tourney_fixtures::{
    AppConfig, Directory, Event, EventId, EventKind, FixtureService, MemoryStore, Participant,
    ParticipantId, Tournament, TournamentId,
};

pub struct Setup {
    pub service: FixtureService<MemoryStore>,
    pub tournament_id: TournamentId,
}

/// Service with one tournament carrying `teams` tournament-level teams.
pub fn setup(teams: usize) -> Setup {
    let service = FixtureService::new(MemoryStore::new(), Directory::new(), &AppConfig::default());
    let names: Vec<String> = (0..teams).map(|i| format!("Team {i}")).collect();
    let tournament = service
        .register_tournament(Tournament::with_teams("Spring Cup", names))
        .unwrap();
    Setup {
        service,
        tournament_id: tournament.id,
    }
}

impl Setup {
    /// Register an individual event with `players` entrants, returning its id and the
    /// entrants in registration order.
    pub fn event(&self, match_type: &str, players: usize) -> (EventId, Vec<ParticipantId>) {
        let event = self
            .service
            .register_event(Event::new(
                self.tournament_id,
                "Singles",
                match_type,
                EventKind::Individual,
            ))
            .unwrap();
        let ids = (0..players)
            .map(|i| {
                self.service
                    .register_participant(
                        self.tournament_id,
                        event.id,
                        Participant::individual(format!("P{i}")),
                    )
                    .unwrap()
                    .id
            })
            .collect();
        (event.id, ids)
    }
}
