//! Asset classification and variant lookup.
//!
//! An asset `pic.png` may exist on disk as several variants: scaled
//! (`pic@2x.png`, `pic@1.5x.png`) and platform specific (`pic.ios.png`,
//! `pic@3x.native.png`). All of them belong to one resolution.

use regex_lite::Regex;
use std::path::Path;
use tracing::trace;

/// Extensions treated as assets when the project config does not say
/// otherwise.
pub const DEFAULT_ASSET_EXTS: &[&str] = &[
    "bmp", "gif", "jpg", "jpeg", "png", "psd", "svg", "webp", "ttf", "otf", "woff", "woff2",
    "m4v", "mov", "mp4", "mpeg", "mpg", "webm", "aac", "aiff", "caf", "m4a", "mp3", "wav",
    "html", "pdf", "zip",
];

/// Asset types that can be required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Image files (png, jpg, gif, svg, webp, ...).
    Image,
    /// Font files (ttf, otf, woff, woff2).
    Font,
    /// Video and audio files.
    Media,
    /// Other static assets.
    Other,
}

impl AssetType {
    /// Determine the asset type from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "bmp" | "gif" | "jpg" | "jpeg" | "png" | "psd" | "svg" | "webp" => Some(Self::Image),
            "ttf" | "otf" | "woff" | "woff2" => Some(Self::Font),
            "m4v" | "mov" | "mp4" | "mpeg" | "mpg" | "webm" | "aac" | "aiff" | "caf" | "m4a"
            | "mp3" | "wav" => Some(Self::Media),
            "html" | "pdf" | "zip" => Some(Self::Other),
            _ => None,
        }
    }

    #[must_use]
    pub fn of_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Font => "font",
            Self::Media => "media",
            Self::Other => "other",
        }
    }
}

/// Whether `path` has one of `asset_exts` (compared case-insensitively).
#[must_use]
pub fn is_asset_file(path: &Path, asset_exts: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| asset_exts.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// File names in `dir` that are variants of the asset `name`, sorted.
///
/// Returns `None` when the directory cannot be read or nothing matches.
#[must_use]
pub fn resolve_asset(dir: &Path, name: &str, platform: Option<&str>) -> Option<Vec<String>> {
    let pattern = variant_pattern(name, platform)?;
    let entries = std::fs::read_dir(dir).ok()?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ty| ty.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|file_name| pattern.is_match(file_name))
        .collect();

    if names.is_empty() {
        return None;
    }

    names.sort();
    trace!(dir = %dir.display(), name, variants = names.len(), "asset variants");
    Some(names)
}

/// `^<stem>(@<scale>x)?(.<platform>|.native)?<.ext>$`
fn variant_pattern(name: &str, platform: Option<&str>) -> Option<Regex> {
    let (stem, ext) = match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    };

    let platforms = match platform {
        Some(platform) => format!("{}|native", regex_lite::escape(platform)),
        None => "native".to_string(),
    };

    let pattern = format!(
        r"^{}(@\d+(\.\d+)?x)?(\.({platforms}))?{}$",
        regex_lite::escape(stem),
        regex_lite::escape(ext)
    );
    Regex::new(&pattern).ok()
}
