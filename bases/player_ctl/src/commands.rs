use clap::Subcommand;
use player_client::{Identified, Item, Song, State};

#[derive(Subcommand)]
pub enum Commands {
    /// Start or resume playback
    Play,

    /// Stop playback
    Stop,

    /// Skip to the next song in the queue
    Skip,

    /// Empty the queue
    Clear,

    /// Queue a song by URI
    Add {
        /// Song URI as known to the player
        uri: String,

        /// Play it right after the current song instead of at the end
        #[arg(long)]
        next: bool,
    },

    /// Move a queue entry
    Move {
        /// Current queue index
        from: usize,

        /// New queue index
        to: usize,
    },

    /// Show what is playing
    State,

    /// Show the queue
    List,

    /// Search the library
    Search {
        /// Free text matched against any tag
        term: String,

        /// Replace the queue with the first hit and play it. Clearing the
        /// queue stops whatever was playing.
        #[arg(long)]
        play_first: bool,
    },

    /// Show the songs of an album
    Album {
        /// Album name
        name: String,
    },

    /// Show an artist's albums and top tracks
    Artist {
        /// Artist name
        name: String,
    },
}

/// `m:ss`, or `--:--` for unknown lengths
pub fn format_length(seconds: f64) -> String {
    if seconds <= 0.0 {
        return "--:--".to_owned();
    }
    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn describe_song(song: &Song) -> String {
    let artist = song.artist().as_str();
    let name = if song.name().is_empty() {
        song.identifier()
    } else {
        song.name()
    };
    if artist.is_empty() {
        format!("{} [{}]", name, format_length(song.length()))
    } else {
        format!("{} by {} [{}]", name, artist, format_length(song.length()))
    }
}

pub fn describe_item(item: &Item) -> String {
    match item {
        Item::Song(song) => describe_song(song),
        other => format!("{} ({:?})", other.identifier(), other.kind()),
    }
}

pub fn describe_state(state: &State) -> String {
    match state.current() {
        None => "Nothing queued".to_owned(),
        Some(song) => format!(
            "{} #{}: {} ({:.0}%)",
            if state.is_playing() { "Playing" } else { "Stopped at" },
            state.position(),
            describe_song(song),
            state.progress() * 100.0
        ),
    }
}
