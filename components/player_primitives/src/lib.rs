mod attributes;
mod item;
mod state;

pub use attributes::Attributes;
pub use item::{Album, AlbumRef, Artist, ArtistRef, Identified, Item, ItemKind, ItemRef, Song};
pub use state::State;
