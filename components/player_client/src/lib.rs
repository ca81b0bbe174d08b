mod config;
mod connection;
mod dialer;
mod error;
mod player;
mod remote;
mod session;

#[cfg(test)]
mod mock;

pub use config::{ClientConfig, ErrorMode};
pub use dialer::{Dialer, TcpDialer};
pub use error::ClientError;
pub use player::Player;
pub use remote::RemotePlayer;

pub use player_primitives::{
    Album, AlbumRef, Artist, ArtistRef, Identified, Item, ItemKind, ItemRef, Song, State,
};
pub use player_protocol::ProtocolError;
