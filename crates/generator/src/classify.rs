//! Classifier module for inferring VR projection formats from filenames.
//!
//! This module analyzes video filenames to determine the stereo packing
//! and screen projection the DeoVR player should use, based on common
//! naming conventions. Both classifications use ordered keyword rules
//! evaluated top-to-bottom, where the first matching rule wins and a
//! final unconditional default applies when nothing matches.

use serde::{Deserialize, Serialize};

/// How left/right eye images are packed in the video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StereoMode {
    /// Monoscopic video, no eye packing.
    Off,
    /// Side-by-side packing.
    Sbs,
    /// Top-bottom packing.
    Tb,
    /// Custom UV mapping.
    Cuv,
}

impl std::fmt::Display for StereoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StereoMode::Off => write!(f, "off"),
            StereoMode::Sbs => write!(f, "sbs"),
            StereoMode::Tb => write!(f, "tb"),
            StereoMode::Cuv => write!(f, "cuv"),
        }
    }
}

/// The projection geometry used to map the video onto a virtual screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenType {
    /// Flat 2D screen.
    Flat,
    /// Equirectangular 180 degrees.
    Dome,
    /// Equirectangular 360 degrees.
    Sphere,
    /// Fisheye 180 degrees.
    Fisheye,
    /// Fisheye 190 degrees.
    Rf52,
    /// Fisheye 200 degrees.
    Mkx200,
}

impl std::fmt::Display for ScreenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenType::Flat => write!(f, "flat"),
            ScreenType::Dome => write!(f, "dome"),
            ScreenType::Sphere => write!(f, "sphere"),
            ScreenType::Fisheye => write!(f, "fisheye"),
            ScreenType::Rf52 => write!(f, "rf52"),
            ScreenType::Mkx200 => write!(f, "mkx200"),
        }
    }
}

/// Ordered stereo mode rules; the first rule whose keywords match wins.
const STEREO_RULES: &[(&[&str], StereoMode)] = &[
    (&["tb", "top-bottom", "over-under", "3dv"], StereoMode::Tb),
    (&["cuv", "custom_uv"], StereoMode::Cuv),
    (&["off", "2d", "mono", "single"], StereoMode::Off),
];

/// Stereo mode assumed when no rule matches.
const STEREO_DEFAULT: StereoMode = StereoMode::Sbs;

/// Ordered screen type rules; the first rule whose keywords match wins.
const SCREEN_RULES: &[(&[&str], ScreenType)] = &[
    (&["rf52", "190", "fisheye190"], ScreenType::Rf52),
    (&["mkx200", "200", "fisheye200"], ScreenType::Mkx200),
    (&["sphere", "360", "full"], ScreenType::Sphere),
    (&["fisheye"], ScreenType::Fisheye),
];

/// Screen type assumed when no rule matches.
const SCREEN_DEFAULT: ScreenType = ScreenType::Dome;

/// Checks if the filename contains any of the given keywords.
fn contains_any_keyword(file_name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| file_name.contains(kw))
}

/// Classifies the stereo packing from filename tokens.
///
/// Matching is case-insensitive substring containment on the full
/// filename, independent of file content.
pub fn classify_stereo_mode(file_name: &str) -> StereoMode {
    let name = file_name.to_lowercase();

    for (keywords, mode) in STEREO_RULES {
        if contains_any_keyword(&name, keywords) {
            return *mode;
        }
    }

    STEREO_DEFAULT
}

/// Classifies the screen projection from filename tokens.
///
/// Evaluated independently of [`classify_stereo_mode`] on the same
/// filename; a name can match a rule in each classification.
pub fn classify_screen_type(file_name: &str) -> ScreenType {
    let name = file_name.to_lowercase();

    for (keywords, screen) in SCREEN_RULES {
        if contains_any_keyword(&name, keywords) {
            return *screen;
        }
    }

    SCREEN_DEFAULT
}
