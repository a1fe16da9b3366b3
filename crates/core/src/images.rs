//! Image reference resolution.
//!
//! The engine never fetches image bytes. It only decides whether an ad has a
//! usable file name; URL construction lives with the HTTP client.

use serde::Serialize;

use crate::ads::{Ad, AdKind, ImageRef};

/// What a renderer should draw for an ad's media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "fileName", rename_all = "snake_case")]
pub enum ImageSource {
    Remote(String),
    Placeholder,
}

impl ImageSource {
    /// Resolve an optional image reference. Missing, blank, or path-like
    /// file names fall back to the placeholder.
    pub fn resolve(image: Option<&ImageRef>) -> Self {
        image
            .and_then(|image| image.file_name.as_deref())
            .map(str::trim)
            .filter(|name| is_usable_file_name(name))
            .map_or(Self::Placeholder, |name| Self::Remote(name.to_string()))
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Remote(name) => Some(name),
            Self::Placeholder => None,
        }
    }
}

/// How a slot should present an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    pub kind: AdKind,
    pub image: ImageSource,
}

impl MediaSource {
    pub fn for_ad(ad: &Ad) -> Self {
        Self {
            kind: ad.kind(),
            image: ImageSource::resolve(ad.record().image.as_ref()),
        }
    }
}

fn is_usable_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
        && !name.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ads::AdRecord;

    fn image(name: Option<&str>) -> ImageRef {
        ImageRef {
            file_name: name.map(str::to_string),
        }
    }

    #[test]
    fn usable_names_resolve_to_remote() {
        assert_eq!(
            ImageSource::resolve(Some(&image(Some(" banner.webp ")))),
            ImageSource::Remote("banner.webp".into())
        );
    }

    #[test]
    fn missing_or_malformed_names_fall_back() {
        for bad in [None, Some(""), Some("   "), Some("../etc/passwd"), Some("a\\b.png"), Some("..")] {
            assert_eq!(ImageSource::resolve(Some(&image(bad))), ImageSource::Placeholder);
        }
        assert_eq!(ImageSource::resolve(None), ImageSource::Placeholder);
    }

    #[test]
    fn media_kind_comes_from_the_variant_not_the_extension() {
        let video = Ad::Video(AdRecord::new("v1").with_image("clip.png"));
        let media = MediaSource::for_ad(&video);
        assert_eq!(media.kind, AdKind::Video);
        assert_eq!(media.image.file_name(), Some("clip.png"));
    }

    #[test]
    fn remote_image_serializes_with_file_name_content() {
        let json = serde_json::to_value(ImageSource::Remote("a.png".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "remote", "fileName": "a.png" }));
        let json = serde_json::to_value(ImageSource::Placeholder).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "placeholder" }));
    }
}
