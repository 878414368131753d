//! Manifest module assembling the scene list the DeoVR player consumes.
//!
//! Field names and enum string values follow the DeoVR multiple-videos
//! deeplink document and are an external contract; they must not change.

use crate::classify::{classify_screen_type, classify_stereo_mode, ScreenType, StereoMode};
use crate::probe::MediaMetrics;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder thumbnail shown for every scene.
pub const PLACEHOLDER_THUMBNAIL_URL: &str =
    "https://www.iconsdb.com/icons/preview/red/video-play-xxl.png";

/// Name of the single library every manifest contains.
pub const LIBRARY_NAME: &str = "Library";

/// Characters escaped inside a URL path segment.
///
/// Everything except ASCII alphanumerics and `- . _ ~` is percent-encoded;
/// the `/` separator is handled by encoding per segment.
const PATH_SEGMENT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// An alternate encoding of a scene video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    /// Encoding name (e.g. "h264", "h265").
    pub name: String,
    /// Video sources for this encoding, one per resolution.
    #[serde(rename = "videoSources")]
    pub video_sources: Vec<VideoSource>,
}

/// One playable source within an [`Encoding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSource {
    /// Vertical resolution in pixels.
    pub resolution: u32,
    /// Absolute URL of the source.
    pub url: String,
}

/// Lens correction parameters for fisheye projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corrections {
    pub x: f64,
    pub y: f64,
    pub br: f64,
    pub cont: f64,
    pub sat: f64,
}

/// A named timestamp marker within a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStamp {
    /// Offset from the start of the video in seconds.
    pub ts: u64,
    /// Marker label.
    pub name: String,
}

/// One manifest entry describing a single playable video.
///
/// The optional fields are part of the player's input contract but are
/// never populated by this generator; they are omitted from the
/// serialized form when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Filename without extension.
    pub title: String,
    /// Duration in seconds.
    #[serde(rename = "videoLength")]
    pub video_length: u64,
    /// Absolute playback URL.
    pub video_url: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
    /// Always true for this generator.
    #[serde(rename = "is3d")]
    pub is_3d: bool,
    #[serde(rename = "stereoMode")]
    pub stereo_mode: StereoMode,
    #[serde(rename = "screenType")]
    pub screen_type: ScreenType,
    /// Alternate encodings, usable instead of `video_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encodings: Option<Vec<Encoding>>,
    #[serde(rename = "videoThumbnail", skip_serializing_if = "Option::is_none")]
    pub video_thumbnail: Option<String>,
    #[serde(rename = "videoPreview", skip_serializing_if = "Option::is_none")]
    pub video_preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrections: Option<Corrections>,
    #[serde(rename = "timeStamps", skip_serializing_if = "Option::is_none")]
    pub time_stamps: Option<Vec<TimeStamp>>,
    /// Seconds of intro the player may skip.
    #[serde(rename = "skipIntro", skip_serializing_if = "Option::is_none")]
    pub skip_intro: Option<u64>,
    /// Only used in images mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A named, ordered group of scenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub list: Vec<Scene>,
}

/// The top-level document the player fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub scenes: Vec<Library>,
}

/// Builds the absolute playback URL for a file.
///
/// Each segment of the root-relative path is percent-encoded and the
/// segments are joined with `/` regardless of the platform's path
/// separator. The base URL is expected to carry no trailing slash.
pub fn encode_video_url(base_url: &str, relative_path: &Path) -> String {
    let encoded: Vec<String> = relative_path
        .components()
        .map(|c| {
            let segment = c.as_os_str().to_string_lossy();
            utf8_percent_encode(&segment, PATH_SEGMENT_ESCAPE).to_string()
        })
        .collect();

    format!("{}/{}", base_url, encoded.join("/"))
}

/// Builds one scene for a file that survived filtering.
///
/// The title is the file stem, the projection is classified from the
/// filename, and the URL is constructed from the root-relative path.
pub fn build_scene(relative_path: &Path, base_url: &str, metrics: &MediaMetrics) -> Scene {
    let file_name = relative_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = relative_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Scene {
        id: None,
        title,
        video_length: metrics.duration_secs,
        video_url: encode_video_url(base_url, relative_path),
        thumbnail_url: PLACEHOLDER_THUMBNAIL_URL.to_string(),
        is_3d: true,
        stereo_mode: classify_stereo_mode(&file_name),
        screen_type: classify_screen_type(&file_name),
        encodings: None,
        video_thumbnail: None,
        video_preview: None,
        corrections: None,
        time_stamps: None,
        skip_intro: None,
        path: None,
    }
}

/// Wraps the scene list in the single `"Library"` the player expects.
pub fn build_manifest(scenes: Vec<Scene>) -> Manifest {
    Manifest {
        scenes: vec![Library {
            name: LIBRARY_NAME.to_string(),
            list: scenes,
        }],
    }
}
