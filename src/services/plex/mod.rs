//! Plex Media Server Integration
//!
//! Read-only access to a Plex server through its query-string API.
//!
//! # Endpoints
//!
//! ```text
//! GET {origin}/playlists/{playlist}/items?X-Plex-Token=...   playlist entries
//! GET {origin}{series_key}/allLeaves?X-Plex-Token=...        episodes of a series
//! GET {origin}{key}?X-Plex-Token=...                         single item metadata
//! ```
//!
//! All three answer with a `MediaContainer` document whose `<Video>` children
//! become [`crate::models::Video`] records. Stream and thumbnail URLs are only
//! built, never fetched:
//!
//! ```text
//! {origin}/video/:/transcode/universal/start.m3u8?path={key}&protocol=hls&...
//! {origin}/photo/:/transcode?url={thumb}&width=512&height=288&...
//! ```

pub mod client;
pub mod parser;
pub mod types;

// Re-exports for convenience
pub use client::PlexClient;
pub use types::{PlexConfig, PlexError};
