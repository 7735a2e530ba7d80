//! Single binary web server for the bracket: REST API over the engine, JSON snapshots on disk.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `ServerConfig::from_env` for the environment variables.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::config::ServerConfig;
use bracket_tournament_web::{
    complete_round, generate_ranking, initialize, record_winner, JsonFileStore, PairingId,
    RankingEntry, Roster, Side, SnapshotWriter, StateStore, Tournament, TournamentError,
    TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared server state: live tournaments by id, the snapshot writer, and config.
struct Server {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
    snapshots: SnapshotWriter,
    config: ServerConfig,
}

type AppState = Data<Server>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// What the presentation layer renders after every request.
#[derive(Serialize)]
struct TournamentView<'a> {
    tournament: &'a Tournament,
    round_label: Option<String>,
    /// Present once the tournament is completed.
    ranking: Option<Vec<RankingEntry>>,
}

impl<'a> TournamentView<'a> {
    fn of(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            round_label: tournament.current_label(),
            ranking: generate_ranking(tournament).ok(),
        }
    }
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    players: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    pairing_id: PairingId,
    side: Side,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn error_response(e: &TournamentError) -> HttpResponse {
    match e {
        TournamentError::RosterInvalid {
            found,
            required,
            missing,
        } => HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string(),
            "found": found,
            "required": required,
            "missing": missing,
        })),
        _ => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Draw a new bracket from the posted players, or from the configured roster CSV.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let players = body.and_then(|b| b.into_inner().players);
    let roster = match (players, &state.config.roster_csv) {
        (Some(names), _) => Roster::new(names),
        (None, Some(path)) => Roster::from_csv_path(path, state.config.roster_name_column),
        (None, None) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "No players given and no roster file configured"
            }))
        }
    };
    let roster = match roster {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Rejected roster: {}", e);
            return error_response(&e);
        }
    };
    let tournament = initialize(roster.draw(&mut rand::thread_rng()));
    let id = tournament.id;
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    state.snapshots.save(&tournament);
    let t = g.entry(id).or_insert(tournament);
    HttpResponse::Ok().json(TournamentView::of(t))
}

/// Current round, or the ranking once completed (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.tournaments.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(TournamentView::of(t)),
        None => not_found(),
    }
}

/// Record one winner. Once every pairing of the round has a winner the round is completed.
#[put("/api/tournaments/{id}/winner")]
async fn api_record_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RecordWinnerBody>,
) -> HttpResponse {
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    if let Err(e) = record_winner(t, body.pairing_id, body.side) {
        return error_response(&e);
    }
    let round_done = t.current_round.as_ref().is_some_and(|r| r.is_complete());
    let result = if round_done {
        complete_round(t).map(|_| ())
    } else {
        Ok(())
    };
    state.snapshots.save(t);
    match result {
        Ok(()) => HttpResponse::Ok().json(TournamentView::of(t)),
        Err(e) => error_response(&e),
    }
}

/// Complete the current round explicitly (all pairings must have a winner).
#[post("/api/tournaments/{id}/complete-round")]
async fn api_complete_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match complete_round(t) {
        Ok(_) => {
            state.snapshots.save(t);
            HttpResponse::Ok().json(TournamentView::of(t))
        }
        Err(e) => error_response(&e),
    }
}

/// Final ranking (400 until the final is decided).
#[get("/api/tournaments/{id}/ranking")]
async fn api_ranking(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.tournaments.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match generate_ranking(t) {
        Ok(ranking) => HttpResponse::Ok().json(ranking),
        Err(e) => error_response(&e),
    }
}

/// Reset: back to round 1 with the same draw, every result discarded.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    t.reset();
    log::info!("Tournament {} reset", t.id);
    state.snapshots.save(t);
    HttpResponse::Ok().json(TournamentView::of(t))
}

/// Drop a tournament and, after any save still queued for it, its snapshot.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let removed = match state.tournaments.write() {
        Ok(mut guard) => guard.remove(&path.id),
        Err(_) => return lock_error(),
    };
    state.snapshots.clear(path.id);
    match removed {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = JsonFileStore::new(&config.state_dir);
    let mut tournaments = HashMap::new();
    match store.load_all() {
        Ok(snapshots) => {
            for snapshot in snapshots {
                log::info!(
                    "Restored tournament {} (saved {})",
                    snapshot.tournament.id,
                    snapshot.saved_at
                );
                tournaments.insert(snapshot.tournament.id, snapshot.tournament);
            }
        }
        Err(e) => log::error!(
            "Could not restore tournaments from {}: {}",
            store.dir().display(),
            e
        ),
    }

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let static_dir = config.static_dir.clone();
    let (snapshots, _writer_task) = SnapshotWriter::spawn(Arc::new(store));
    let state = Data::new(Server {
        tournaments: RwLock::new(tournaments),
        snapshots,
        config,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api_routes)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}

fn api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(api_health)
        .service(favicon)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_record_winner)
        .service(api_complete_round)
        .service(api_ranking)
        .service(api_reset_tournament)
        .service(api_delete_tournament);
}
