use serde::Serialize;

/// Single playable item projected from a media server `<Video>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Server-side key, e.g. `/library/metadata/42`
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub stream_url: String,
    /// Key of the parent series (`grandparentKey`), `None` for standalone items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_key: Option<String>,
}

/// JSON body for the index listing
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub videos: Vec<Video>,
}

/// JSON body for the detail listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    pub current_video: Option<Video>,
    pub videos: Vec<Video>,
}
