//! Single binary web server: the league REST API under /api.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:5005 by default. Override with env: HOST, PORT.
//! Writes need a session from POST /api/users/login (ADMIN_USERNAME / ADMIN_PASSWORD).

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get,
    middleware::Logger,
    patch, post,
    web::{self, Data, Json, Path, ServiceConfig},
    App, HttpResponse, HttpServer, Responder,
};
use pool_league_web::{
    create_match, create_player, delete_match, delete_player, get_match, head_to_head,
    list_matches, list_players, next_event, player_profile, replace_next_event, update_match,
    update_player, Config, ErrorKind, LeagueError, MatchDetails, MatchId, MemoryStore,
    NextEventDraft, PlayerDraft, PlayerId, PlayerIdentity,
};
use serde::Deserialize;
use serde_json::json;

/// Shared store; every handler works against it through the library's async operations.
type AppState = Data<MemoryStore>;
type AppConfig = Data<Config>;

/// Session key holding the logged-in user name.
const SESSION_USER: &str = "user";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

/// Path segment: match id (e.g. /api/matches/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

/// Path segments: both players of a head-to-head lookup.
#[derive(Deserialize)]
struct HeadToHeadPath {
    player1_id: PlayerId,
    player2_id: PlayerId,
}

fn error_response(e: &LeagueError) -> HttpResponse {
    let body = json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::ValidationFailed => HttpResponse::UnprocessableEntity().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::PersistenceFailed => {
            log::error!("Request failed in the store: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Writes are reserved for a logged-in admin.
fn require_login(session: &Session) -> Result<(), HttpResponse> {
    match session.get::<String>(SESSION_USER) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::Unauthorized().json(json!({ "error": "Authentication failed" }))),
        Err(e) => {
            log::warn!("Unreadable session: {}", e);
            Err(HttpResponse::Unauthorized().json(json!({ "error": "Authentication failed" })))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pool-league-web",
    })
}

#[post("/api/users/login")]
async fn api_login(config: AppConfig, session: Session, body: Json<LoginBody>) -> HttpResponse {
    if !config.accepts_login(body.username.trim(), &body.password) {
        log::warn!("Rejected login for {:?}", body.username);
        return HttpResponse::Unauthorized().json(json!({ "error": "Invalid credentials, could not log you in." }));
    }
    session.renew();
    match session.insert(SESSION_USER, body.username.trim()) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Logged in." })),
        Err(e) => {
            log::error!("Could not store session: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Logging in failed, please try again." }))
        }
    }
}

#[post("/api/users/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({ "message": "Logged out." }))
}

/// All players, sorted by last name then first name.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match list_players(state.get_ref()).await {
        Ok(players) => HttpResponse::Ok().json(json!({ "players": players })),
        Err(e) => error_response(&e),
    }
}

/// One player and their matches (404 if not found).
#[get("/api/players/{player_id}")]
async fn api_get_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    match player_profile(state.get_ref(), path.player_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => error_response(&e),
    }
}

#[post("/api/players")]
async fn api_create_player(state: AppState, session: Session, body: Json<PlayerDraft>) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match create_player(state.get_ref(), body.into_inner()).await {
        Ok(player) => HttpResponse::Created().json(json!({ "player": player })),
        Err(e) => error_response(&e),
    }
}

/// Rename a player or change their sex; every match they played is rewritten too.
#[patch("/api/players/{player_id}")]
async fn api_update_player(
    state: AppState,
    session: Session,
    path: Path<PlayerPath>,
    body: Json<PlayerIdentity>,
) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match update_player(state.get_ref(), path.player_id, body.into_inner()).await {
        Ok(player) => HttpResponse::Ok().json(json!({ "player": player })),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/players/{player_id}")]
async fn api_delete_player(state: AppState, session: Session, path: Path<PlayerPath>) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match delete_player(state.get_ref(), path.player_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "player deleted." })),
        Err(e) => error_response(&e),
    }
}

/// All matches, newest first.
#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    match list_matches(state.get_ref()).await {
        Ok(matches) => HttpResponse::Ok().json(json!({ "matches": matches })),
        Err(e) => error_response(&e),
    }
}

/// Matches between two players, in either orientation.
#[get("/api/matches/players/{player1_id}/{player2_id}")]
async fn api_head_to_head(state: AppState, path: Path<HeadToHeadPath>) -> HttpResponse {
    match head_to_head(state.get_ref(), path.player1_id, path.player2_id).await {
        Ok(matches) => HttpResponse::Ok().json(json!({ "matches": matches })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/matches/{match_id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    match get_match(state.get_ref(), path.match_id).await {
        Ok(m) => HttpResponse::Ok().json(json!({ "match": m })),
        Err(e) => error_response(&e),
    }
}

/// Record a match; both players' statistics are updated with it.
#[post("/api/matches")]
async fn api_create_match(state: AppState, session: Session, body: Json<MatchDetails>) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match create_match(state.get_ref(), body.into_inner()).await {
        Ok(m) => HttpResponse::Created().json(json!({ "match": m })),
        Err(e) => error_response(&e),
    }
}

/// Replace a match; the old result is reverted from the statistics and the new one applied.
#[patch("/api/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<MatchDetails>,
) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match update_match(state.get_ref(), path.match_id, body.into_inner()).await {
        Ok(m) => HttpResponse::Ok().json(json!({ "match": m })),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/matches/{match_id}")]
async fn api_delete_match(state: AppState, session: Session, path: Path<MatchPath>) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match delete_match(state.get_ref(), path.match_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "match deleted." })),
        Err(e) => error_response(&e),
    }
}

/// The upcoming event, or null.
#[get("/api/next_event")]
async fn api_get_next_event(state: AppState) -> HttpResponse {
    match next_event(state.get_ref()).await {
        Ok(event) => HttpResponse::Ok().json(json!({ "nextEvent": event })),
        Err(e) => error_response(&e),
    }
}

/// Announce the next event, replacing the current one.
#[post("/api/next_event")]
async fn api_create_next_event(
    state: AppState,
    session: Session,
    body: Json<NextEventDraft>,
) -> HttpResponse {
    if let Err(resp) = require_login(&session) {
        return resp;
    }
    match replace_next_event(state.get_ref(), body.into_inner()).await {
        Ok(event) => HttpResponse::Created().json(json!({ "nextEvent": event })),
        Err(e) => error_response(&e),
    }
}

/// Anything outside the API answers with the same JSON error shape.
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Could not find this route." }))
}

fn routes(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_login)
        .service(api_logout)
        .service(api_list_players)
        .service(api_get_player)
        .service(api_create_player)
        .service(api_update_player)
        .service(api_delete_player)
        .service(api_list_matches)
        .service(api_head_to_head)
        .service(api_get_match)
        .service(api_create_match)
        .service(api_update_match)
        .service(api_delete_match)
        .service(api_get_next_event)
        .service(api_create_next_event);
}

fn session_key(config: &Config) -> Key {
    match config.session_secret.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            log::warn!("SESSION_SECRET must be at least 64 bytes; using a random key instead");
            Key::generate()
        }
        None => {
            log::info!("No SESSION_SECRET set; sessions end when the server restarts");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.admin_password.is_none() {
        log::warn!("ADMIN_PASSWORD is not set: every login is rejected and the API is read-only");
    }
    let key = session_key(&config);
    let host = config.host.clone();
    let port = config.port;
    log::info!("Starting server at http://{}:{}", host, port);

    let state = Data::new(MemoryStore::new());
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(config.clone())
            .configure(routes)
            .default_service(web::to(not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
