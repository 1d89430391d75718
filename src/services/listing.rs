//! Page listings
//!
//! Mixes same-series suggestions with a random sample of the playlist.

use std::future::Future;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::models::Video;
use crate::services::plex::PlexError;

/// Siblings shown ahead of the catalog sample
pub const SIMILAR_LIMIT: usize = 5;
/// Catalog videos per page
pub const CATALOG_LIMIT: usize = 40;

/// Source of videos for the listings
pub trait VideoCatalog {
    /// Every video of the browsed playlist, in server order
    fn playlist_videos(&self) -> impl Future<Output = Result<Vec<Video>, PlexError>> + Send;

    /// Every video below a series key (empty key: no videos)
    fn series_videos(
        &self,
        series_key: &str,
    ) -> impl Future<Output = Result<Vec<Video>, PlexError>> + Send;

    /// A single video by server key
    fn video(&self, id: &str) -> impl Future<Output = Result<Option<Video>, PlexError>> + Send;
}

/// Ordering applied to each source before truncation
pub trait Shuffle {
    fn shuffle(&self, videos: &mut [Video]);
}

/// Uniform shuffle backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffle;

impl Shuffle for RandomShuffle {
    fn shuffle(&self, videos: &mut [Video]) {
        videos.shuffle(&mut rand::thread_rng());
    }
}

/// Build a page listing.
///
/// Up to [`SIMILAR_LIMIT`] shuffled siblings of `focus` followed by up to
/// [`CATALOG_LIMIT`] shuffled playlist videos. The two halves are not
/// deduplicated against each other.
pub async fn build_listing<C, S>(
    catalog: &C,
    shuffler: &S,
    focus: Option<&Video>,
) -> Result<Vec<Video>, PlexError>
where
    C: VideoCatalog + Sync,
    S: Shuffle + ?Sized,
{
    let series_key = focus.and_then(|video| video.series_key.as_deref());

    let siblings = async {
        match series_key {
            Some(key) => catalog.series_videos(key).await,
            None => Ok(Vec::new()),
        }
    };
    let (mut similar, mut all) = tokio::try_join!(siblings, catalog.playlist_videos())?;

    debug!(
        "Listing sources: {} siblings, {} playlist videos",
        similar.len(),
        all.len()
    );

    shuffler.shuffle(&mut similar);
    shuffler.shuffle(&mut all);

    similar.truncate(SIMILAR_LIMIT);
    all.truncate(CATALOG_LIMIT);
    similar.extend(all);

    Ok(similar)
}

/// Fetch a focus video by id and build its listing.
///
/// An unknown id is not an error: the listing is built without siblings.
pub async fn detail_listing<C, S>(
    catalog: &C,
    shuffler: &S,
    id: &str,
) -> Result<(Option<Video>, Vec<Video>), PlexError>
where
    C: VideoCatalog + Sync,
    S: Shuffle + ?Sized,
{
    let current = catalog.video(id).await?;
    if current.is_none() {
        debug!("No video found for {}", id);
    }

    let videos = build_listing(catalog, shuffler, current.as_ref()).await?;
    Ok((current, videos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog backed by in-memory vectors
    #[derive(Default)]
    struct FakeCatalog {
        playlist: Vec<Video>,
        series: HashMap<String, Vec<Video>>,
        series_calls: AtomicUsize,
    }

    impl VideoCatalog for FakeCatalog {
        async fn playlist_videos(&self) -> Result<Vec<Video>, PlexError> {
            Ok(self.playlist.clone())
        }

        async fn series_videos(&self, series_key: &str) -> Result<Vec<Video>, PlexError> {
            self.series_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.series.get(series_key).cloned().unwrap_or_default())
        }

        async fn video(&self, id: &str) -> Result<Option<Video>, PlexError> {
            Ok(self
                .playlist
                .iter()
                .chain(self.series.values().flatten())
                .find(|v| v.id == id)
                .cloned())
        }
    }

    /// Catalog whose playlist request always fails
    struct BrokenCatalog;

    impl VideoCatalog for BrokenCatalog {
        async fn playlist_videos(&self) -> Result<Vec<Video>, PlexError> {
            Err(PlexError::Network("connection refused".to_string()))
        }

        async fn series_videos(&self, _series_key: &str) -> Result<Vec<Video>, PlexError> {
            Ok(Vec::new())
        }

        async fn video(&self, _id: &str) -> Result<Option<Video>, PlexError> {
            Ok(None)
        }
    }

    struct KeepOrder;

    impl Shuffle for KeepOrder {
        fn shuffle(&self, _videos: &mut [Video]) {}
    }

    struct Reverse;

    impl Shuffle for Reverse {
        fn shuffle(&self, videos: &mut [Video]) {
            videos.reverse();
        }
    }

    fn video(id: &str, series_key: Option<&str>) -> Video {
        Video {
            id: id.to_string(),
            title: id.to_uppercase(),
            thumbnail_url: format!("http://plex/thumb{}", id),
            stream_url: format!("http://plex/stream{}", id),
            series_key: series_key.map(str::to_string),
        }
    }

    fn ids(videos: &[Video]) -> Vec<&str> {
        videos.iter().map(|v| v.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_listing_without_focus_keeps_short_playlist() {
        let catalog = FakeCatalog {
            playlist: vec![video("/a", None), video("/b", None), video("/c", None)],
            ..Default::default()
        };

        let listing = build_listing(&catalog, &RandomShuffle, None)
            .await
            .expect("listing");

        assert_eq!(listing.len(), 3);
        let unique: HashSet<_> = ids(&listing).into_iter().collect();
        assert_eq!(unique, HashSet::from(["/a", "/b", "/c"]));
        assert_eq!(catalog.series_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_listing_with_focus_is_capped() {
        let siblings: Vec<_> = (0..10)
            .map(|i| video(&format!("/s{}", i), Some("/show")))
            .collect();
        let playlist: Vec<_> = (0..100).map(|i| video(&format!("/p{}", i), None)).collect();
        let catalog = FakeCatalog {
            playlist: playlist.clone(),
            series: HashMap::from([("/show".to_string(), siblings.clone())]),
            ..Default::default()
        };
        let focus = siblings[0].clone();

        let listing = build_listing(&catalog, &RandomShuffle, Some(&focus))
            .await
            .expect("listing");

        assert_eq!(listing.len(), SIMILAR_LIMIT + CATALOG_LIMIT);
        let sibling_ids: HashSet<_> = ids(&siblings).into_iter().collect();
        let playlist_ids: HashSet<_> = ids(&playlist).into_iter().collect();
        assert!(listing[..SIMILAR_LIMIT]
            .iter()
            .all(|v| sibling_ids.contains(v.id.as_str())));
        assert!(listing[SIMILAR_LIMIT..]
            .iter()
            .all(|v| playlist_ids.contains(v.id.as_str())));

        let unique_catalog: HashSet<_> = ids(&listing[SIMILAR_LIMIT..]).into_iter().collect();
        assert_eq!(unique_catalog.len(), CATALOG_LIMIT);
    }

    #[tokio::test]
    async fn test_listing_applies_one_shuffle_per_source() {
        let catalog = FakeCatalog {
            playlist: vec![video("/a", None), video("/b", None), video("/c", None)],
            series: HashMap::from([(
                "/show".to_string(),
                vec![video("/x", Some("/show")), video("/y", Some("/show"))],
            )]),
            ..Default::default()
        };

        let kept = build_listing(&catalog, &KeepOrder, None).await.expect("listing");
        assert_eq!(ids(&kept), vec!["/a", "/b", "/c"]);

        let reversed = build_listing(&catalog, &Reverse, None).await.expect("listing");
        assert_eq!(ids(&reversed), vec!["/c", "/b", "/a"]);

        let focus = video("/x", Some("/show"));
        let with_focus = build_listing(&catalog, &Reverse, Some(&focus))
            .await
            .expect("listing");
        assert_eq!(ids(&with_focus), vec!["/y", "/x", "/c", "/b", "/a"]);
    }

    #[tokio::test]
    async fn test_listing_does_not_deduplicate() {
        let shared = video("/a", Some("/show"));
        let catalog = FakeCatalog {
            playlist: vec![shared.clone()],
            series: HashMap::from([("/show".to_string(), vec![shared.clone()])]),
            ..Default::default()
        };

        let listing = build_listing(&catalog, &KeepOrder, Some(&shared))
            .await
            .expect("listing");

        assert_eq!(ids(&listing), vec!["/a", "/a"]);
    }

    #[tokio::test]
    async fn test_focus_without_series_skips_series_lookup() {
        let standalone = video("/a", None);
        let catalog = FakeCatalog {
            playlist: vec![standalone.clone()],
            ..Default::default()
        };

        let listing = build_listing(&catalog, &KeepOrder, Some(&standalone))
            .await
            .expect("listing");

        assert_eq!(ids(&listing), vec!["/a"]);
        assert_eq!(catalog.series_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_detail_listing() {
        let catalog = FakeCatalog {
            playlist: vec![video("/a", None), video("/b", None)],
            series: HashMap::from([("/show".to_string(), vec![video("/x", Some("/show"))])]),
            ..Default::default()
        };

        let (current, videos) = detail_listing(&catalog, &KeepOrder, "/x")
            .await
            .expect("listing");
        assert_eq!(current.map(|v| v.id), Some("/x".to_string()));
        assert_eq!(ids(&videos), vec!["/x", "/a", "/b"]);

        let (missing, videos) = detail_listing(&catalog, &KeepOrder, "/nope")
            .await
            .expect("absent focus is not an error");
        assert!(missing.is_none());
        assert_eq!(ids(&videos), vec!["/a", "/b"]);
    }

    #[tokio::test]
    async fn test_listing_propagates_errors() {
        let result = build_listing(&BrokenCatalog, &RandomShuffle, None).await;

        assert!(matches!(result, Err(PlexError::Network(_))));
    }
}
