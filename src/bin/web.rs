//! Single binary web server exposing the fixtures engine as a JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DEFAULT_QUALIFIERS.
//! Log level via RUST_LOG (default info).

use actix_web::{
    error::InternalError,
    get, post, put,
    web::{Bytes, Data, Json, JsonConfig, Path, Query, QueryConfig, ServiceConfig},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use tourney_fixtures::{
    parse_id, AppConfig, Directory, Event, EventId, EventKind, FixtureError, FixtureService,
    FixtureUpdate, GenerateRequest, KnockoutRequest, MemoryStore, Participant, ParticipantEntry,
    Tournament,
};

/// Shared engine: the service serializes writers internally.
type AppState = Data<FixtureService<MemoryStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    teams: Vec<String>,
}

#[derive(Deserialize)]
struct CreateEventBody {
    name: String,
    match_type: String,
    #[serde(default)]
    kind: EventKind,
}

#[derive(Default, Deserialize)]
struct GenerateBody {
    #[serde(default)]
    event_id: Option<String>,
    #[serde(default)]
    force: bool,
}

#[derive(Deserialize)]
struct KnockoutBody {
    #[serde(default)]
    event_id: Option<String>,
    #[serde(default)]
    qualifiers: Option<usize>,
}

/// Optional `?event_id=` on listing endpoints.
#[derive(Deserialize)]
struct EventQuery {
    event_id: Option<String>,
}

fn status_for(e: &FixtureError) -> actix_web::http::StatusCode {
    use actix_web::http::StatusCode;
    match e {
        FixtureError::InvalidId(_) | FixtureError::InvalidBody(_) | FixtureError::EventRequired => {
            StatusCode::BAD_REQUEST
        }
        FixtureError::TournamentNotFound(_)
        | FixtureError::EventNotFound(_)
        | FixtureError::FixtureNotFound(_) => StatusCode::NOT_FOUND,
        FixtureError::AlreadyGenerated | FixtureError::DuplicateSlot { .. } => StatusCode::CONFLICT,
        FixtureError::NotEnoughParticipants { .. }
        | FixtureError::NotEnoughQualifiers { .. }
        | FixtureError::NotHybridEvent
        | FixtureError::NoRoundRobinFixtures
        | FixtureError::NoResultsEntered => StatusCode::UNPROCESSABLE_ENTITY,
        FixtureError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(e: FixtureError) -> HttpResponse {
    if matches!(e, FixtureError::Storage(_)) {
        log::error!("{}", e);
    }
    HttpResponse::build(status_for(&e))
        .json(serde_json::json!({ "success": false, "message": e.to_string() }))
}

/// `{ "success": true, <key>: <value> }`
fn success<T: Serialize>(key: &str, value: T) -> HttpResponse {
    let value = match serde_json::to_value(value) {
        Ok(v) => v,
        Err(e) => return failure(FixtureError::Storage(e.to_string())),
    };
    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), serde_json::Value::Bool(true));
    body.insert(key.to_string(), value);
    HttpResponse::Ok().json(body)
}

fn optional_id(raw: Option<&str>) -> Result<Option<EventId>, FixtureError> {
    raw.filter(|s| !s.trim().is_empty()).map(parse_id).transpose()
}

/// Rejected JSON bodies and query strings answer with the same `{success, message}` shape.
fn rejected<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = failure(FixtureError::InvalidBody(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Generate takes an optional body: empty means "no event, no force", anything else must parse.
fn generate_body(raw: &[u8]) -> Result<GenerateBody, FixtureError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateBody::default());
    }
    serde_json::from_slice(raw).map_err(|e| FixtureError::InvalidBody(e.to_string()))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tourney-fixtures",
    })
}

/// Register a tournament with its teams.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let teams = body.teams.iter().map(|t| t.trim()).filter(|t| !t.is_empty());
    match state.register_tournament(Tournament::with_teams(body.name.trim(), teams)) {
        Ok(t) => success("tournament", t),
        Err(e) => failure(e),
    }
}

/// Register an event under a tournament.
#[post("/api/tournaments/{tournament_id}/events")]
async fn api_create_event(state: AppState, path: Path<String>, body: Json<CreateEventBody>) -> HttpResponse {
    let tournament_id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return failure(e),
    };
    let body = body.into_inner();
    match state.register_event(Event::new(tournament_id, body.name, body.match_type, body.kind)) {
        Ok(event) => success("event", event),
        Err(e) => failure(e),
    }
}

/// Enter a participant (individual or pair) into an event.
#[post("/api/tournaments/{tournament_id}/events/{event_id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<(String, String)>,
    body: Json<ParticipantEntry>,
) -> HttpResponse {
    let (tournament_id, event_id) = match (parse_id(&path.0), parse_id(&path.1)) {
        (Ok(t), Ok(e)) => (t, e),
        (Err(e), _) | (_, Err(e)) => return failure(e),
    };
    match state.register_participant(tournament_id, event_id, Participant::new(body.into_inner())) {
        Ok(p) => success("participant", p),
        Err(e) => failure(e),
    }
}

/// Participants of a tournament, or of one event with `?event_id=`.
#[get("/api/fixtures/{tournament_id}/teams")]
async fn api_get_teams(state: AppState, path: Path<String>, query: Query<EventQuery>) -> HttpResponse {
    let result = parse_id(&path)
        .and_then(|t| Ok((t, optional_id(query.event_id.as_deref())?)))
        .and_then(|(t, e)| state.teams(t, e));
    match result {
        Ok(teams) => success("teams", teams),
        Err(e) => failure(e),
    }
}

/// Raw fixture listing.
#[get("/api/fixtures/{tournament_id}")]
async fn api_get_fixtures(state: AppState, path: Path<String>, query: Query<EventQuery>) -> HttpResponse {
    let result = parse_id(&path)
        .and_then(|t| Ok((t, optional_id(query.event_id.as_deref())?)))
        .and_then(|(t, e)| state.fixtures(t, e));
    match result {
        Ok(fixtures) => success("fixtures", fixtures),
        Err(e) => failure(e),
    }
}

/// Generate fixtures by the event's match format.
#[post("/api/fixtures/{tournament_id}/generate")]
async fn api_generate(state: AppState, path: Path<String>, body: Bytes) -> HttpResponse {
    let result = parse_id(&path)
        .and_then(|t| Ok((t, generate_body(&body)?)))
        .and_then(|(t, body)| Ok((t, optional_id(body.event_id.as_deref())?, body.force)))
        .and_then(|(t, event_id, force)| state.generate(t, GenerateRequest { event_id, force }));
    match result {
        Ok(fixtures) => success("fixtures", fixtures),
        Err(e) => failure(e),
    }
}

/// Build the knockout stage of a round-robin + knockout event from its standings.
#[post("/api/fixtures/{tournament_id}/generate-knockout")]
async fn api_generate_knockout(state: AppState, path: Path<String>, body: Json<KnockoutBody>) -> HttpResponse {
    let result = parse_id(&path)
        .and_then(|t| Ok((t, optional_id(body.event_id.as_deref())?)))
        .and_then(|(t, event_id)| {
            state.generate_knockout_from_standings(
                t,
                KnockoutRequest {
                    event_id,
                    qualifiers: body.qualifiers,
                },
            )
        });
    match result {
        Ok(fixtures) => success("fixtures", fixtures),
        Err(e) => failure(e),
    }
}

/// Standings table, sorted by points then goal difference.
#[get("/api/fixtures/{tournament_id}/standings")]
async fn api_get_standings(state: AppState, path: Path<String>, query: Query<EventQuery>) -> HttpResponse {
    let result = parse_id(&path)
        .and_then(|t| Ok((t, optional_id(query.event_id.as_deref())?)))
        .and_then(|(t, e)| state.standings(t, e));
    match result {
        Ok(standings) => success("standings", standings),
        Err(e) => failure(e),
    }
}

/// Update status/scores/winner/schedule/notes of one fixture.
#[put("/api/fixtures/fixture/{fixture_id}")]
async fn api_update_fixture(state: AppState, path: Path<String>, body: Json<FixtureUpdate>) -> HttpResponse {
    let result = parse_id(&path).and_then(|id| state.update_fixture(id, body.into_inner()));
    match result {
        Ok(fixture) => success("fixture", fixture),
        Err(e) => failure(e),
    }
}

fn routes(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(rejected))
        .app_data(QueryConfig::default().error_handler(rejected))
        .service(api_health)
        .service(api_create_tournament)
        .service(api_create_event)
        .service(api_add_participant)
        .service(api_get_teams)
        .service(api_get_standings)
        .service(api_generate)
        .service(api_generate_knockout)
        .service(api_update_fixture)
        .service(api_get_fixtures);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(FixtureService::new(MemoryStore::new(), Directory::new(), &config));

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
