use crate::error::ClientError;
use async_trait::async_trait;
use player_primitives::{Album, AlbumRef, Artist, ArtistRef, Item, ItemRef, Song, State};

/// Playback control over a remote audio server
#[async_trait]
pub trait Player: Send + Sync {
    /// Resume or start playback at the current queue position
    async fn play(&self) -> Result<(), ClientError>;

    async fn stop(&self) -> Result<(), ClientError>;

    /// Advance to the next queue entry
    async fn skip(&self) -> Result<(), ClientError>;

    /// Append to the end of the queue. Albums and artists queue every
    /// library song carrying their name.
    async fn add(&self, item: &Item) -> Result<(), ClientError>;

    /// Queue so it plays right after the current song
    async fn add_next(&self, item: &Item) -> Result<(), ClientError>;

    /// Move the queue entry at `from` to index `to`
    async fn move_item(&self, from: usize, to: usize) -> Result<(), ClientError>;

    async fn clear(&self) -> Result<(), ClientError>;

    async fn state(&self) -> Result<State, ClientError>;

    /// Free-text library search
    async fn search(&self, term: &str) -> Result<Vec<Item>, ClientError>;

    /// Current queue, in play order
    async fn list(&self) -> Result<Vec<Song>, ClientError>;

    /// Resolves an album lookup key into its songs and artist
    async fn album(&self, album: &AlbumRef) -> Result<Album, ClientError>;

    /// Resolves an artist lookup key into albums and top tracks
    async fn artist(&self, artist: &ArtistRef) -> Result<Artist, ClientError>;

    /// Unresolved reference, built without asking the server
    fn item_by_uri(&self, uri: &str) -> ItemRef {
        ItemRef::new(uri)
    }
}
