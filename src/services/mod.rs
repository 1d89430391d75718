pub mod listing;
pub mod plex;
