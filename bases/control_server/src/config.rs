// bases/control_server/src/config.rs
use clap::Parser;
use player_client::{ClientConfig, ErrorMode};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Remote player connection
    pub client: ClientConfig,
}

/// Zither - HTTP control for a remote music player daemon
#[derive(Parser, Debug, Clone)]
#[command(name = "zitherd", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Listen for clients at host
    #[arg(short = 'H', long, default_value = "localhost")]
    pub host: String,

    /// Listen for clients at port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Host of the remote player daemon
    pub remote_host: String,

    /// Port of the remote player daemon
    pub remote_port: u16,

    /// Give up on a player round trip after this many milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Log player errors and answer OK anyway
    ///
    /// By default every failed player operation is reported to the HTTP
    /// client with an error status.
    #[arg(long)]
    pub best_effort: bool,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Self {
        let mode = if args.best_effort {
            ErrorMode::BestEffort
        } else {
            ErrorMode::Strict
        };

        let client = ClientConfig::new(args.remote_host, args.remote_port)
            .with_timeout(Duration::from_millis(args.timeout_ms.max(1)))
            .with_mode(mode);

        Self {
            host: args.host,
            port: args.port,
            client,
        }
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_best_effort(&self) -> bool {
        self.client.mode == ErrorMode::BestEffort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let args = CliArgs::try_parse_from(std::iter::once("zitherd").chain(args.iter().copied()))
            .unwrap();
        Config::from_args(args)
    }

    #[test]
    fn defaults_listen_locally() {
        let config = parse(&["music.local", "6600"]);
        assert_eq!(config.listen_address(), "localhost:8080");
        assert_eq!(config.client.address(), "music.local:6600");
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert!(!config.is_best_effort());
    }

    #[test]
    fn listen_and_remote_are_separate() {
        let config = parse(&["-H", "0.0.0.0", "-p", "9000", "music.local", "6601"]);
        assert_eq!(config.listen_address(), "0.0.0.0:9000");
        assert_eq!(config.client.address(), "music.local:6601");
    }

    #[test]
    fn best_effort_flag_switches_mode() {
        let config = parse(&["--best-effort", "--timeout-ms", "250", "localhost", "6600"]);
        assert!(config.is_best_effort());
        assert_eq!(config.client.timeout, Duration::from_millis(250));
    }

    #[test]
    fn remote_endpoint_is_required() {
        assert!(CliArgs::try_parse_from(["zitherd", "localhost"]).is_err());
        assert!(CliArgs::try_parse_from(["zitherd", "localhost", "not-a-port"]).is_err());
    }
}
