use clap::Parser;
use color_eyre::Result;
use player_client::{AlbumRef, ArtistRef, ClientConfig, Item, Player, RemotePlayer};
use std::time::Duration;
mod commands;

use commands::Commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Player daemon host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Player daemon port
    #[arg(long, default_value_t = ClientConfig::DEFAULT_PORT)]
    port: u16,

    /// Round-trip timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
    let cli = Cli::parse();

    let config = ClientConfig::new(cli.host, cli.port)
        .with_timeout(Duration::from_millis(cli.timeout_ms.max(1)));
    let player = RemotePlayer::connect_with(config).await?;

    match cli.command {
        Commands::Play => {
            player.play().await?;
            println!("Playing");
        }

        Commands::Stop => {
            player.stop().await?;
            println!("Stopped");
        }

        Commands::Skip => {
            player.skip().await?;
            println!("{}", commands::describe_state(&player.state().await?));
        }

        Commands::Clear => {
            player.clear().await?;
            println!("Queue cleared");
        }

        Commands::Add { uri, next } => {
            let item = Item::from(player.item_by_uri(&uri));
            if next {
                player.add_next(&item).await?;
                println!("Queued {} to play next", uri);
            } else {
                player.add(&item).await?;
                println!("Queued {}", uri);
            }
        }

        Commands::Move { from, to } => {
            player.move_item(from, to).await?;
            println!("Moved #{} to #{}", from, to);
        }

        Commands::State => {
            println!("{}", commands::describe_state(&player.state().await?));
        }

        Commands::List => {
            let songs = player.list().await?;
            if songs.is_empty() {
                println!("Queue is empty");
            }
            for (position, song) in songs.iter().enumerate() {
                println!("{:>3}. {}", position, commands::describe_song(song));
            }
        }

        Commands::Search { term, play_first } => {
            let hits = player.search(&term).await?;
            if play_first {
                let first = hits
                    .first()
                    .ok_or_else(|| color_eyre::eyre::eyre!("No match for {:?}", term))?;
                player.clear().await?;
                player.add(first).await?;
                player.play().await?;
                println!("Now playing {}", commands::describe_item(first));
            } else {
                for item in &hits {
                    println!("{}", commands::describe_item(item));
                }
                println!("{} result(s)", hits.len());
            }
        }

        Commands::Album { name } => {
            let album = player.album(&AlbumRef::named(name)).await?;
            match album.artist() {
                Some(artist) => println!("{} by {}", album.name(), artist),
                None => println!("{}", album.name()),
            }
            for song in album.songs() {
                println!("  {}", commands::describe_song(song));
            }
        }

        Commands::Artist { name } => {
            let artist = player.artist(&ArtistRef::new(name)).await?;
            println!("{}", artist.name());
            for album in artist.albums() {
                println!("  {} ({} songs)", album.name(), album.songs().len());
            }
            println!("Top tracks:");
            for song in artist.top_tracks() {
                println!("  {}", commands::describe_song(song));
            }
        }
    }

    player.close().await?;

    Ok(())
}
