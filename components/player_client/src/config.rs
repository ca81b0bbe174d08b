use std::time::Duration;

/// What read and write operations do with failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Every failure is returned to the caller
    #[default]
    Strict,
    /// Failures are logged; writes report success and reads return empty values
    BestEffort,
}

/// Remote player connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for one round trip, and for dialing
    pub timeout: Duration,
    pub mode: ErrorMode,
}

impl ClientConfig {
    pub const DEFAULT_PORT: u16 = 6600;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: Self::DEFAULT_TIMEOUT,
            mode: ErrorMode::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("localhost", Self::DEFAULT_PORT)
    }
}
