//! Plex API Client
//!
//! HTTP client for the handful of Plex endpoints the pages need.

use reqwest::Client;
use tracing::{debug, warn};

use super::parser::{parse_first_video, parse_videos};
use super::types::{PlexConfig, PlexError};
use crate::models::Video;
use crate::services::listing::VideoCatalog;

/// Plex API Client
#[derive(Clone)]
pub struct PlexClient {
    http: Client,
    config: PlexConfig,
}

impl PlexClient {
    /// Create a new Plex client
    ///
    /// # Arguments
    /// * `config` - Server origin, token and playlist
    /// * `user_agent` - User-Agent header sent upstream
    pub fn new(config: PlexConfig, user_agent: &str) -> Result<Self, PlexError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| PlexError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Fetch a response body as text.
    ///
    /// The status code is not interpreted: the body is handed to the XML
    /// parser either way.
    async fn fetch(&self, url: &str) -> Result<String, PlexError> {
        debug!("Plex request: {}", url.split('?').next().unwrap_or(url));

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PlexError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Plex responded with HTTP {}", status);
        }

        response
            .text()
            .await
            .map_err(|e| PlexError::Network(e.to_string()))
    }

    /// Get all videos from the configured playlist
    pub async fn playlist_videos(&self) -> Result<Vec<Video>, PlexError> {
        let body = self.fetch(&self.config.playlist_items_url()).await?;
        parse_videos(&body, &self.config)
    }

    /// Get every episode below a series key
    ///
    /// An empty key means "no series" and returns without a request.
    pub async fn series_videos(&self, series_key: &str) -> Result<Vec<Video>, PlexError> {
        if series_key.is_empty() {
            return Ok(Vec::new());
        }

        let body = self.fetch(&self.config.series_leaves_url(series_key)).await?;
        parse_videos(&body, &self.config)
    }

    /// Get a single video by its server key
    pub async fn video(&self, id: &str) -> Result<Option<Video>, PlexError> {
        let body = self.fetch(&self.config.metadata_url(id)).await?;
        parse_first_video(&body, &self.config)
    }
}

impl VideoCatalog for PlexClient {
    async fn playlist_videos(&self) -> Result<Vec<Video>, PlexError> {
        PlexClient::playlist_videos(self).await
    }

    async fn series_videos(&self, series_key: &str) -> Result<Vec<Video>, PlexError> {
        PlexClient::series_videos(self, series_key).await
    }

    async fn video(&self, id: &str) -> Result<Option<Video>, PlexError> {
        PlexClient::video(self, id).await
    }
}
