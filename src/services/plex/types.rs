//! Plex API Types
//!
//! Connection settings, URL builders and error type for the Plex client.

use url::form_urlencoded;

/// Query parameter carrying the access token on every request
pub const TOKEN_PARAM: &str = "X-Plex-Token";

/// Platform identifier sent to the transcoder endpoints
const PLATFORM: &str = "Chrome";

/// Thumbnail target size (16:9)
const THUMBNAIL_WIDTH: u32 = 512;
const THUMBNAIL_HEIGHT: u32 = 288;

/// Connection settings for a Plex server
#[derive(Debug, Clone)]
pub struct PlexConfig {
    /// Server origin (e.g., "http://plex.local:32400")
    pub origin: String,
    /// Access token appended to every request
    pub token: String,
    /// Playlist browsed by the index page
    pub playlist_id: String,
}

impl PlexConfig {
    /// Build `{origin}{path}?{query}` with the token injected exactly once.
    ///
    /// A caller-supplied token parameter is dropped in favour of the
    /// configured one. Values are form-urlencoded in the given order.
    pub fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (name, value) in params.iter().filter(|(name, _)| *name != TOKEN_PARAM) {
            query.append_pair(name, value);
        }
        query.append_pair(TOKEN_PARAM, &self.token);

        format!("{}{}?{}", self.origin, path, query.finish())
    }

    /// Playlist items endpoint
    pub fn playlist_items_url(&self) -> String {
        self.build_url(&format!("/playlists/{}/items", self.playlist_id), &[])
    }

    /// All episodes below a series key
    pub fn series_leaves_url(&self, series_key: &str) -> String {
        self.build_url(&format!("{}/allLeaves", series_key), &[])
    }

    /// Metadata endpoint for a single item key
    pub fn metadata_url(&self, key: &str) -> String {
        self.build_url(key, &[])
    }

    /// HLS transcode URL for a video key
    pub fn stream_url(&self, key: &str) -> String {
        let params = [
            ("path", key.to_string()),
            ("offset", "0".to_string()),
            ("copyts", "1".to_string()),
            ("protocol", "hls".to_string()),
            ("mediaIndex", "0".to_string()),
            ("directPlay", "0".to_string()),
            ("directStream", "1".to_string()),
            ("X-Plex-Platform", PLATFORM.to_string()),
        ];
        self.build_url("/video/:/transcode/universal/start.m3u8", &params)
    }

    /// Resized thumbnail URL for a partial thumbnail path
    pub fn thumbnail_url(&self, thumb: &str) -> String {
        let params = [
            ("url", thumb.to_string()),
            ("width", THUMBNAIL_WIDTH.to_string()),
            ("height", THUMBNAIL_HEIGHT.to_string()),
            ("minSize", "0".to_string()),
            ("upscale", "1".to_string()),
            ("X-Plex-Platform", PLATFORM.to_string()),
        ];
        self.build_url("/photo/:/transcode", &params)
    }
}

/// Plex client errors
#[derive(Debug, thiserror::Error)]
pub enum PlexError {
    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),
    /// Response body is not well-formed XML
    #[error("XML error: {0}")]
    Xml(String),
}
