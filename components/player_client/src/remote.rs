use crate::config::{ClientConfig, ErrorMode};
use crate::dialer::{Dialer, TcpDialer};
use crate::error::ClientError;
use crate::player::Player;
use crate::session::Session;
use async_trait::async_trait;
use player_primitives::{
    Album, AlbumRef, Artist, ArtistRef, Identified, Item, ItemKind, Song, State,
};
use player_protocol::{Command, ProtocolError, Tag};
use tracing::{debug, warn};

/// Number of songs reported as an artist's top tracks
const TOP_TRACKS: usize = 10;

/// Player backed by an MPD-style server over one shared session
pub struct RemotePlayer<D: Dialer = TcpDialer> {
    session: Session<D>,
    mode: ErrorMode,
}

impl RemotePlayer<TcpDialer> {
    pub async fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        Self::connect_with(ClientConfig::new(host, port)).await
    }

    pub async fn connect_with(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_dialer(TcpDialer::new(config.address()), &config).await
    }
}

impl<D: Dialer> RemotePlayer<D> {
    pub async fn with_dialer(dialer: D, config: &ClientConfig) -> Result<Self, ClientError> {
        let session = Session::open(dialer, config.timeout).await?;
        Ok(Self {
            session,
            mode: config.mode,
        })
    }

    pub fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Ends the session politely. Later operations re-dial.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.session.close().await
    }

    async fn execute(&self, command: Command) -> Result<(), ClientError> {
        let mut session = self.session.acquire().await?;
        session.run(command).await?;
        Ok(())
    }

    async fn songs(&self, command: Command) -> Result<Vec<Song>, ClientError> {
        let mut session = self.session.acquire().await?;
        let reply = session.run(command).await?;
        Ok(reply
            .split_on("file")
            .iter()
            .map(Song::from_attributes)
            .collect())
    }

    // Both round trips run under one guard; the server can still change
    // between them, which the snapshot accepts.
    async fn fetch_state(&self) -> Result<State, ClientError> {
        let mut session = self.session.acquire().await?;
        let current = session.run(Command::CurrentSong).await?;
        let status = session.run(Command::Status).await?;
        Ok(State::from_attributes(&status, &current))
    }

    async fn insert_after_current(&self, item: &Item) -> Result<(), ClientError> {
        let mut session = self.session.acquire().await?;
        let uris = match Selection::of(item) {
            Selection::Uri(uri) => vec![uri.to_owned()],
            Selection::Matching(tag, value) => session
                .run(Command::Find {
                    tag,
                    value: value.to_owned(),
                })
                .await?
                .split_on("file")
                .iter()
                .filter_map(|entry| entry.get("file").map(str::to_owned))
                .collect(),
        };
        let status = session.run(Command::Status).await?;
        let position = status
            .get("song")
            .and_then(|song| song.parse::<usize>().ok())
            .map_or(0, |song| song + 1);

        for (offset, uri) in uris.into_iter().enumerate() {
            debug!(%uri, position = position + offset, "inserting into queue");
            session
                .run(Command::AddId {
                    uri,
                    position: position + offset,
                })
                .await?;
        }
        Ok(())
    }

    fn degrade<T>(
        &self,
        operation: &'static str,
        result: Result<T, ClientError>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, ClientError> {
        match (result, self.mode) {
            (Ok(value), _) => Ok(value),
            (Err(err), ErrorMode::Strict) => Err(err),
            // Never sent, so there is no player failure to tolerate
            (Err(err @ ClientError::Protocol(ProtocolError::InvalidArgument(_))), _) => Err(err),
            (Err(err), ErrorMode::BestEffort) => {
                warn!(operation, error = %err, "player operation failed, continuing");
                Ok(fallback())
            }
        }
    }

    fn settle(&self, operation: &'static str, result: Result<(), ClientError>) -> Result<(), ClientError> {
        self.degrade(operation, result, || ())
    }
}

/// What an item puts into the queue
enum Selection<'a> {
    /// One song by URI
    Uri(&'a str),
    /// Every library song with this exact tag value
    Matching(Tag, &'a str),
}

impl<'a> Selection<'a> {
    // Albums and artists are addressed by name; everything else is taken
    // to be a song URI.
    fn of(item: &'a Item) -> Self {
        match item {
            Item::Song(song) => Selection::Uri(song.identifier()),
            Item::Album(album) => Selection::Matching(Tag::Album, album.name()),
            Item::Artist(artist) => Selection::Matching(Tag::Artist, artist.name()),
            Item::Reference(reference) => match reference.kind() {
                ItemKind::Album => Selection::Matching(Tag::Album, reference.identifier()),
                ItemKind::Artist => Selection::Matching(Tag::Artist, reference.identifier()),
                ItemKind::Song | ItemKind::Undefined => Selection::Uri(reference.identifier()),
            },
        }
    }
}

/// Groups an artist's songs into albums, in first-seen order
fn albums_of(artist: &ArtistRef, songs: &[Song]) -> Vec<Album> {
    let mut groups: Vec<(&AlbumRef, Vec<Song>)> = Vec::new();
    for song in songs.iter().filter(|song| !song.album().name().is_empty()) {
        match groups.iter_mut().find(|(album, _)| *album == song.album()) {
            Some((_, tracks)) => tracks.push(song.clone()),
            None => groups.push((song.album(), vec![song.clone()])),
        }
    }
    groups
        .into_iter()
        .map(|(album, tracks)| Album::new(album, Some(artist.clone()), tracks))
        .collect()
}

#[async_trait]
impl<D: Dialer> Player for RemotePlayer<D> {
    async fn play(&self) -> Result<(), ClientError> {
        let result = self.execute(Command::Play).await;
        self.settle("play", result)
    }

    async fn stop(&self) -> Result<(), ClientError> {
        let result = self.execute(Command::Stop).await;
        self.settle("stop", result)
    }

    async fn skip(&self) -> Result<(), ClientError> {
        let result = self.execute(Command::Next).await;
        self.settle("skip", result)
    }

    async fn add(&self, item: &Item) -> Result<(), ClientError> {
        let command = match Selection::of(item) {
            Selection::Uri(uri) => Command::Add {
                uri: uri.to_owned(),
            },
            Selection::Matching(tag, value) => Command::FindAdd {
                tag,
                value: value.to_owned(),
            },
        };
        let result = self.execute(command).await;
        self.settle("add", result)
    }

    async fn add_next(&self, item: &Item) -> Result<(), ClientError> {
        let result = self.insert_after_current(item).await;
        self.settle("add_next", result)
    }

    async fn move_item(&self, from: usize, to: usize) -> Result<(), ClientError> {
        let result = self.execute(Command::Move { from, to }).await;
        self.settle("move", result)
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let result = self.execute(Command::Clear).await;
        self.settle("clear", result)
    }

    async fn state(&self) -> Result<State, ClientError> {
        let result = self.fetch_state().await;
        self.degrade("state", result, State::default)
    }

    async fn search(&self, term: &str) -> Result<Vec<Item>, ClientError> {
        let result = self
            .songs(Command::Search {
                tag: Tag::Any,
                term: term.to_owned(),
            })
            .await
            .map(|songs| songs.into_iter().map(Item::from).collect());
        self.degrade("search", result, Vec::new)
    }

    async fn list(&self) -> Result<Vec<Song>, ClientError> {
        let result = self.songs(Command::PlaylistInfo).await;
        self.degrade("list", result, Vec::new)
    }

    async fn album(&self, album: &AlbumRef) -> Result<Album, ClientError> {
        let result = self
            .songs(Command::Find {
                tag: Tag::Album,
                value: album.name().to_owned(),
            })
            .await
            .map(|songs| Album::from_songs(album, songs));
        self.degrade("album", result, || Album::new(album, None, Vec::new()))
    }

    async fn artist(&self, artist: &ArtistRef) -> Result<Artist, ClientError> {
        let result = self
            .songs(Command::Find {
                tag: Tag::Artist,
                value: artist.as_str().to_owned(),
            })
            .await
            .map(|songs| {
                let albums = albums_of(artist, &songs);
                let top_tracks = songs.into_iter().take(TOP_TRACKS).collect();
                Artist::new(artist, albums, top_tracks)
            });
        self.degrade("artist", result, || Artist::new(artist, Vec::new(), Vec::new()))
    }
}
