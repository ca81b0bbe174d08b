// bases/control_server/src/server.rs
use crate::config::Config;
use crate::error::AppError;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use player_client::{
    Album, AlbumRef, Artist, ArtistRef, Item, Player, Song, State as Snapshot,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Player shared by all handlers
pub type SharedPlayer = Arc<dyn Player>;

const OK: &str = "OK";

#[derive(Debug, Serialize)]
struct StatusBody {
    status: &'static str,
}

impl StatusBody {
    fn ok() -> Json<Self> {
        Json(Self { status: OK })
    }
}

#[derive(Debug, Serialize)]
struct StateBody {
    status: &'static str,
    state: StateView,
}

/// Snapshot as served over HTTP, progress included
#[derive(Debug, Serialize)]
struct StateView {
    playing: bool,
    current: Option<Song>,
    position: usize,
    next_position: usize,
    elapsed: f64,
    progress: f64,
    random: bool,
    consume: bool,
}

impl From<Snapshot> for StateView {
    fn from(state: Snapshot) -> Self {
        Self {
            playing: state.is_playing(),
            current: state.current().cloned(),
            position: state.position(),
            next_position: state.next_position(),
            elapsed: state.elapsed(),
            progress: state.progress(),
            random: state.random(),
            consume: state.consume(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SongsBody {
    status: &'static str,
    songs: Vec<Song>,
}

#[derive(Debug, Serialize)]
struct ItemsBody {
    status: &'static str,
    items: Vec<Item>,
}

#[derive(Debug, Serialize)]
struct AlbumBody {
    status: &'static str,
    album: Album,
}

#[derive(Debug, Serialize)]
struct ArtistBody {
    status: &'static str,
    artist: Artist,
}

/// Query parameters; a missing or unparsable one answers 400 in the error envelope
type Params<T> = Result<Query<T>, QueryRejection>;

#[derive(Debug, Deserialize)]
struct UriQuery {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct MoveQuery {
    from: usize,
    to: usize,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    term: String,
}

#[derive(Debug, Deserialize)]
struct NameQuery {
    name: String,
}

/// Routes for every player operation; each accepts GET and POST
pub fn router(player: SharedPlayer) -> Router {
    Router::new()
        .route("/play", get(play).post(play))
        .route("/stop", get(stop).post(stop))
        .route("/skip", get(skip).post(skip))
        .route("/clear", get(clear).post(clear))
        .route("/add", get(add).post(add))
        .route("/add-next", get(add_next).post(add_next))
        .route("/move", get(move_item).post(move_item))
        .route("/state", get(state).post(state))
        .route("/list", get(list).post(list))
        .route("/search", get(search).post(search))
        .route("/album", get(album).post(album))
        .route("/artist", get(artist).post(artist))
        .layer(TraceLayer::new_for_http())
        .with_state(player)
}

/// Run the control HTTP server
pub async fn run(player: SharedPlayer, config: &Config) -> color_eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
    info!(
        "Control server listening on http://{} (player at {})",
        listener.local_addr()?,
        config.client.address()
    );

    axum::serve(listener, router(player)).await?;

    Ok(())
}

async fn play(State(player): State<SharedPlayer>) -> Result<Json<StatusBody>, AppError> {
    player.play().await?;
    Ok(StatusBody::ok())
}

async fn stop(State(player): State<SharedPlayer>) -> Result<Json<StatusBody>, AppError> {
    player.stop().await?;
    Ok(StatusBody::ok())
}

async fn skip(State(player): State<SharedPlayer>) -> Result<Json<StatusBody>, AppError> {
    player.skip().await?;
    Ok(StatusBody::ok())
}

async fn clear(State(player): State<SharedPlayer>) -> Result<Json<StatusBody>, AppError> {
    player.clear().await?;
    Ok(StatusBody::ok())
}

async fn add(
    State(player): State<SharedPlayer>,
    query: Params<UriQuery>,
) -> Result<Json<StatusBody>, AppError> {
    let Query(query) = query?;
    let item = Item::from(player.item_by_uri(&query.uri));
    player.add(&item).await?;
    Ok(StatusBody::ok())
}

async fn add_next(
    State(player): State<SharedPlayer>,
    query: Params<UriQuery>,
) -> Result<Json<StatusBody>, AppError> {
    let Query(query) = query?;
    let item = Item::from(player.item_by_uri(&query.uri));
    player.add_next(&item).await?;
    Ok(StatusBody::ok())
}

async fn move_item(
    State(player): State<SharedPlayer>,
    query: Params<MoveQuery>,
) -> Result<Json<StatusBody>, AppError> {
    let Query(query) = query?;
    player.move_item(query.from, query.to).await?;
    Ok(StatusBody::ok())
}

async fn state(State(player): State<SharedPlayer>) -> Result<Json<StateBody>, AppError> {
    let state = player.state().await?;
    Ok(Json(StateBody {
        status: OK,
        state: state.into(),
    }))
}

async fn list(State(player): State<SharedPlayer>) -> Result<Json<SongsBody>, AppError> {
    let songs = player.list().await?;
    Ok(Json(SongsBody { status: OK, songs }))
}

async fn search(
    State(player): State<SharedPlayer>,
    query: Params<SearchQuery>,
) -> Result<Json<ItemsBody>, AppError> {
    let Query(query) = query?;
    let items = player.search(&query.term).await?;
    Ok(Json(ItemsBody { status: OK, items }))
}

async fn album(
    State(player): State<SharedPlayer>,
    query: Params<NameQuery>,
) -> Result<Json<AlbumBody>, AppError> {
    let Query(query) = query?;
    let album = player.album(&AlbumRef::named(query.name)).await?;
    Ok(Json(AlbumBody { status: OK, album }))
}

async fn artist(
    State(player): State<SharedPlayer>,
    query: Params<NameQuery>,
) -> Result<Json<ArtistBody>, AppError> {
    let Query(query) = query?;
    let artist = player.artist(&ArtistRef::new(query.name)).await?;
    Ok(Json(ArtistBody { status: OK, artist }))
}
