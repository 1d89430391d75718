use std::env;

use crate::services::plex::PlexConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub template_dir: String,

    // Media server
    pub plex: PlexConfig,

    // Misc
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            template_dir: env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()),

            // Media server
            plex: PlexConfig {
                origin: env::var("PLEX_HOST").unwrap_or_default(),
                token: env::var("PLEX_TOKEN").unwrap_or_default(),
                playlist_id: env::var("PLEX_PLAYLIST").unwrap_or_default(),
            },

            // Misc
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| format!("plex-shuffle/{}", env!("CARGO_PKG_VERSION"))),
        }
    }

    /// Names of the media server settings that were left empty
    pub fn missing_plex_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.plex.origin.is_empty() {
            missing.push("PLEX_HOST");
        }
        if self.plex.token.is_empty() {
            missing.push("PLEX_TOKEN");
        }
        if self.plex.playlist_id.is_empty() {
            missing.push("PLEX_PLAYLIST");
        }
        missing
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
