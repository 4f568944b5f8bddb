//! The map image collaborator.
//!
//! The core treats the campus map as an opaque asset fetched by URL.  Only
//! its intrinsic size is inspected, so pixel projections can be reported as
//! off-image.  Load failures are independent of GPS state and retryable.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{MapError, MapResult, PixelPoint};

/// A fetched map image.
#[derive(Clone, Debug)]
pub struct MapAsset {
    pub url:    String,
    /// Intrinsic width in image pixels, when the asset declares one.
    pub width:  Option<f64>,
    /// Intrinsic height in image pixels, when the asset declares one.
    pub height: Option<f64>,
    pub bytes:  Vec<u8>,
}

impl MapAsset {
    /// Wrap raw bytes, reading SVG `width`/`height` (or `viewBox`) if present.
    pub fn from_bytes(url: impl Into<String>, bytes: Vec<u8>) -> Self {
        let (width, height) = svg_dimensions(&String::from_utf8_lossy(&bytes))
            .map_or((None, None), |(w, h)| (Some(w), Some(h)));
        Self { url: url.into(), width, height, bytes }
    }

    /// `true` if `pixel` falls within `[0, width] × [0, height]`.  Unknown
    /// dimensions accept everything.
    pub fn contains_pixel(&self, pixel: PixelPoint) -> bool {
        let in_x = self.width.is_none_or(|w| (0.0..=w).contains(&pixel.x));
        let in_y = self.height.is_none_or(|h| (0.0..=h).contains(&pixel.y));
        in_x && in_y
    }
}

/// Fetches the map image for a URL.
///
/// Implement over HTTP, a bundled resource, or a test fixture.
pub trait MapAssetLoader {
    fn fetch(&mut self, url: &str) -> MapResult<MapAsset>;
}

/// Resolves a URL's final path segment against a local directory.
///
/// `https://host/repo/CampusMap.svg` → `<root>/CampusMap.svg`.
pub struct FileAssetLoader {
    root: PathBuf,
}

impl FileAssetLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let trimmed = url.strip_prefix("file://").unwrap_or(url);
        let name = trimmed.rsplit('/').next().filter(|s| !s.is_empty())?;
        Some(self.root.join(name))
    }
}

impl MapAssetLoader for FileAssetLoader {
    fn fetch(&mut self, url: &str) -> MapResult<MapAsset> {
        let path = self.resolve(url).ok_or_else(|| MapError::Load {
            url:    url.to_owned(),
            reason: "URL has no file name".into(),
        })?;
        match std::fs::read(&path) {
            Ok(bytes) => {
                let asset = MapAsset::from_bytes(url, bytes);
                debug!(url, path = %path.display(), bytes = asset.bytes.len(), "map asset read");
                Ok(asset)
            }
            Err(e) => {
                warn!(url, path = %path.display(), error = %e, "map asset load failed");
                Err(MapError::Load { url: url.to_owned(), reason: e.to_string() })
            }
        }
    }
}

// ── SVG header parsing ────────────────────────────────────────────────────────

/// Width and height of the root `<svg>` element: explicit `width`/`height`
/// attributes win, otherwise the `viewBox` extent.
fn svg_dimensions(text: &str) -> Option<(f64, f64)> {
    let start = text.find("<svg")?;
    let tag = &text[start..start + text[start..].find('>')?];

    let width = attribute(tag, "width").and_then(parse_length);
    let height = attribute(tag, "height").and_then(parse_length);
    if let (Some(w), Some(h)) = (width, height) {
        return Some((w, h));
    }

    let view_box: Vec<f64> = attribute(tag, "viewBox")?
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match view_box.as_slice() {
        [_, _, w, h] => Some((*w, *h)),
        _ => None,
    }
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

/// Parse `"2646"` or `"2646px"`; relative units (`%`, `em`) are not sizes.
fn parse_length(raw: &str) -> Option<f64> {
    raw.trim().trim_end_matches("px").parse().ok()
}
