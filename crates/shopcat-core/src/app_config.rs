use std::path::PathBuf;

/// How the engine paces interactions with the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingMode {
    /// Randomized sleeps after every interaction.
    Random,
    /// No sleeps at all.
    Off,
}

impl std::fmt::Display for PacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PacingMode::Random => write!(f, "random"),
            PacingMode::Off => write!(f, "off"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub webdriver_url: String,
    /// `host:port` of an already running Chrome to attach to. `None`
    /// launches a fresh browser session.
    pub debugger_address: Option<String>,
    pub store_url_prefix: String,
    pub output_path: PathBuf,
    pub initial_wait_secs: u64,
    pub control_wait_secs: u64,
    pub max_scroll_attempts: u32,
    pub max_load_more_clicks: u32,
    pub pacing: PacingMode,
}
