use crate::Attributes;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Identity
// ============================================================================

/// Tag for anything the remote player can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Song,
    Artist,
    Album,
    /// Client-built reference that has not been resolved against the server
    Undefined,
}

/// Identity contract shared by every item type
pub trait Identified {
    /// Stable handle usable to re-request the item from the server
    fn identifier(&self) -> &str;
    fn kind(&self) -> ItemKind;
}

/// Unresolved handle to an item on the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItemRef {
    identifier: String,
    kind: ItemKind,
}

impl ItemRef {
    /// Reference of unknown kind, e.g. a URI typed in by a user
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: ItemKind::Undefined,
        }
    }

    pub fn album(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: ItemKind::Album,
        }
    }

    pub fn artist(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: ItemKind::Artist,
        }
    }
}

impl Identified for ItemRef {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn kind(&self) -> ItemKind {
        self.kind
    }
}

// ============================================================================
// Lookup keys (lazy cross-references)
// ============================================================================

/// Artist lookup key; the server addresses artists by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ArtistRef(String);

impl ArtistRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_item_ref(&self) -> ItemRef {
        ItemRef::artist(self.0.clone())
    }
}

impl fmt::Display for ArtistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Album lookup key.
///
/// Servers that expose album URIs (`X-AlbumUri`) identify albums by URI;
/// everything else falls back to the album name. Lookups always go by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AlbumRef {
    identifier: String,
    name: String,
}

impl AlbumRef {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            name,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn to_item_ref(&self) -> ItemRef {
        ItemRef::album(self.identifier.clone())
    }
}

// ============================================================================
// Songs, albums, artists
// ============================================================================

/// A piece of music in the server's library or queue
#[derive(Debug, Clone, Serialize)]
pub struct Song {
    identifier: String,
    name: String,
    artist: ArtistRef,
    album: AlbumRef,
    /// Seconds; 0.0 means the length is unknown
    length: f64,
}

impl Song {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        artist: ArtistRef,
        album: AlbumRef,
        length: f64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            artist,
            album,
            length: sanitize_length(length),
        }
    }

    /// Builds a song from one entity of a reply.
    ///
    /// `duration` carries sub-second precision on newer servers and wins
    /// over the integral `Time`.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let album_name = attrs.get("Album").unwrap_or_default();
        let album = match attrs.get("X-AlbumUri") {
            Some(uri) if !uri.is_empty() => AlbumRef::new(uri, album_name),
            _ => AlbumRef::named(album_name),
        };
        let length = if attrs.contains_key("duration") {
            attrs.parse_or_default::<f64>("duration")
        } else {
            attrs.parse_or_default::<f64>("Time")
        };

        Self::new(
            attrs.get("file").unwrap_or_default(),
            attrs.get("Title").unwrap_or_default(),
            ArtistRef::new(attrs.get("Artist").unwrap_or_default()),
            album,
            length,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &ArtistRef {
        &self.artist
    }

    pub fn album(&self) -> &AlbumRef {
        &self.album
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

fn sanitize_length(length: f64) -> f64 {
    if length.is_finite() && length > 0.0 {
        length
    } else {
        0.0
    }
}

impl Identified for Song {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Song
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

/// A collection of songs
#[derive(Debug, Clone, Serialize)]
pub struct Album {
    identifier: String,
    name: String,
    artist: Option<ArtistRef>,
    songs: Vec<Song>,
}

impl Album {
    pub fn new(reference: &AlbumRef, artist: Option<ArtistRef>, songs: Vec<Song>) -> Self {
        Self {
            identifier: reference.identifier().to_owned(),
            name: reference.name().to_owned(),
            artist,
            songs,
        }
    }

    /// Album whose artist is taken from its first song
    pub fn from_songs(reference: &AlbumRef, songs: Vec<Song>) -> Self {
        let artist = songs
            .first()
            .map(|song| song.artist().clone())
            .filter(|artist| !artist.as_str().is_empty());
        Self::new(reference, artist, songs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> Option<&ArtistRef> {
        self.artist.as_ref()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }
}

impl Identified for Album {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Album
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

/// A creator or interpreter of songs
#[derive(Debug, Clone, Serialize)]
pub struct Artist {
    name: String,
    albums: Vec<Album>,
    top_tracks: Vec<Song>,
}

impl Artist {
    /// Albums are kept as a set: later duplicates of an identifier are dropped.
    pub fn new(reference: &ArtistRef, albums: Vec<Album>, top_tracks: Vec<Song>) -> Self {
        let mut unique: Vec<Album> = Vec::with_capacity(albums.len());
        for album in albums {
            if !unique.contains(&album) {
                unique.push(album);
            }
        }
        Self {
            name: reference.as_str().to_owned(),
            albums: unique,
            top_tracks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn top_tracks(&self) -> &[Song] {
        &self.top_tracks
    }
}

impl Identified for Artist {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ItemKind {
        ItemKind::Artist
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

// ============================================================================
// Item sum type
// ============================================================================

/// Anything playable or referenceable
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Song(Song),
    Album(Album),
    Artist(Artist),
    Reference(ItemRef),
}

impl Identified for Item {
    fn identifier(&self) -> &str {
        match self {
            Item::Song(song) => song.identifier(),
            Item::Album(album) => album.identifier(),
            Item::Artist(artist) => artist.identifier(),
            Item::Reference(reference) => reference.identifier(),
        }
    }

    fn kind(&self) -> ItemKind {
        match self {
            Item::Song(song) => song.kind(),
            Item::Album(album) => album.kind(),
            Item::Artist(artist) => artist.kind(),
            Item::Reference(reference) => reference.kind(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier() && self.kind() == other.kind()
    }
}

impl From<Song> for Item {
    fn from(song: Song) -> Self {
        Item::Song(song)
    }
}

impl From<Album> for Item {
    fn from(album: Album) -> Self {
        Item::Album(album)
    }
}

impl From<Artist> for Item {
    fn from(artist: Artist) -> Self {
        Item::Artist(artist)
    }
}

impl From<ItemRef> for Item {
    fn from(reference: ItemRef) -> Self {
        Item::Reference(reference)
    }
}
