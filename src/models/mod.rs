pub mod video;

pub use video::{DetailResponse, ListingResponse, Video};
