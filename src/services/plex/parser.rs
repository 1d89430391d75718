//! Plex XML Parser
//!
//! Converts `MediaContainer` responses into [`Video`] records. Only `<Video>`
//! elements that are direct children of the root element are considered.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::types::{PlexConfig, PlexError};
use crate::models::Video;

const VIDEO_TAG: &[u8] = b"Video";

/// Parse every top-level `<Video>` element, in document order
pub fn parse_videos(xml: &str, config: &PlexConfig) -> Result<Vec<Video>, PlexError> {
    let mut reader = Reader::from_str(xml);
    let mut videos = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            PlexError::Xml(format!("at position {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(element) => {
                if depth == 0 {
                    check_single_root(&mut seen_root)?;
                } else if depth == 1 && is_video(&element) {
                    videos.push(video_from_element(&element, config)?);
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 0 {
                    check_single_root(&mut seen_root)?;
                } else if depth == 1 && is_video(&element) {
                    videos.push(video_from_element(&element, config)?);
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Text(text) if depth == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(PlexError::Xml("text outside of root element".to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(PlexError::Xml("document has no root element".to_string()));
    }
    if depth != 0 {
        return Err(PlexError::Xml("unexpected end of document".to_string()));
    }

    Ok(videos)
}

/// Parse the first top-level `<Video>` element, if any
///
/// The whole document is still validated, a malformed tail is an error.
pub fn parse_first_video(xml: &str, config: &PlexConfig) -> Result<Option<Video>, PlexError> {
    Ok(parse_videos(xml, config)?.into_iter().next())
}

fn check_single_root(seen_root: &mut bool) -> Result<(), PlexError> {
    if *seen_root {
        return Err(PlexError::Xml("junk after document element".to_string()));
    }
    *seen_root = true;
    Ok(())
}

fn is_video(element: &BytesStart) -> bool {
    element.name().as_ref() == VIDEO_TAG
}

/// Build a record from the element attributes.
///
/// Missing `key`, `title` and `thumb` default to empty strings; a missing
/// or empty `grandparentKey` means the item has no series.
fn video_from_element(element: &BytesStart, config: &PlexConfig) -> Result<Video, PlexError> {
    let mut key = String::new();
    let mut title = String::new();
    let mut thumb = String::new();
    let mut grandparent_key = String::new();

    for attr in element.attributes() {
        let attr = attr.map_err(|e| PlexError::Xml(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| PlexError::Xml(e.to_string()))?
            .into_owned();

        match attr.key.as_ref() {
            b"key" => key = value,
            b"title" => title = value,
            b"thumb" => thumb = value,
            b"grandparentKey" => grandparent_key = value,
            _ => {}
        }
    }

    Ok(Video {
        thumbnail_url: config.thumbnail_url(&thumb),
        stream_url: config.stream_url(&key),
        id: key,
        title,
        series_key: Some(grandparent_key).filter(|k| !k.is_empty()),
    })
}
