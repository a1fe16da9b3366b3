//! Ad models as served by the platform backend (`/video-ad/today`,
//! `/poster-ad/today`, `/line-ad/today`).
//!
//! Backend payloads are camelCase JSON. Deserialization is lenient for every
//! field the storefront can live without: a malformed `position`, image,
//! timestamp, or reference falls back to its default (the ad simply never
//! lands in a slot, or renders the placeholder) instead of failing the whole
//! list. Only the `id` is required.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{AdId, Timestamp};

// ---------------------------------------------------------------------------
// Placement descriptors
// ---------------------------------------------------------------------------

/// Page family an ad is booked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    Home,
    Category,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Category => "CATEGORY",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOME" => Ok(Self::Home),
            "CATEGORY" => Ok(Self::Category),
            other => Err(CoreError::Validation(format!(
                "Invalid page type '{other}'. Must be one of: HOME, CATEGORY"
            ))),
        }
    }
}

/// Region of the page an ad is booked into.
///
/// The two columns hold numbered slots; the center regions are singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    LeftSide,
    RightSide,
    CenterTop,
    CenterBottom,
}

impl Side {
    pub const ALL: [Side; 4] = [
        Side::LeftSide,
        Side::RightSide,
        Side::CenterTop,
        Side::CenterBottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftSide => "LEFT_SIDE",
            Self::RightSide => "RIGHT_SIDE",
            Self::CenterTop => "CENTER_TOP",
            Self::CenterBottom => "CENTER_BOTTOM",
        }
    }

    /// Center regions ignore the numeric position.
    pub fn is_center(&self) -> bool {
        matches!(self, Self::CenterTop | Self::CenterBottom)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid side '{s}'")))
    }
}

/// Where an ad is booked: page family, region, and (for columns) slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub page_type: PageType,
    pub side: Side,
    /// Slot number within a column (`1..=6`). Ignored for center regions.
    #[serde(default)]
    pub position: Option<i32>,
}

// ---------------------------------------------------------------------------
// Embedded references
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: AdId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: AdId,
    #[serde(default)]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Ads
// ---------------------------------------------------------------------------

/// Fields shared by video and poster ads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: AdId,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub image: Option<ImageRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub main_category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category_one: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category_two: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category_three: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub city: Option<LocationRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub state: Option<LocationRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub position: Option<Position>,
    #[serde(default, alias = "created_at", deserialize_with = "deserialize_lenient")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updated_at", deserialize_with = "deserialize_lenient")]
    pub updated_at: Option<Timestamp>,
}

impl AdRecord {
    /// Minimal record with only an id, mostly useful for tests and fixtures.
    pub fn new(id: impl Into<AdId>) -> Self {
        Self {
            id: id.into(),
            image: None,
            main_category: None,
            category_one: None,
            category_two: None,
            category_three: None,
            city: None,
            state: None,
            position: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_image(mut self, file_name: impl Into<String>) -> Self {
        self.image = Some(ImageRef {
            file_name: Some(file_name.into()),
        });
        self
    }
}

/// Media variant of a slotted ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdKind {
    Video,
    Poster,
}

/// A slotted ad, tagged with its media kind so renderers can match on it.
///
/// Serialized with an explicit `kind` discriminator:
/// `{"kind": "poster", "id": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ad {
    Video(AdRecord),
    Poster(AdRecord),
}

impl Ad {
    pub fn from_record(kind: AdKind, record: AdRecord) -> Self {
        match kind {
            AdKind::Video => Self::Video(record),
            AdKind::Poster => Self::Poster(record),
        }
    }

    pub fn kind(&self) -> AdKind {
        match self {
            Self::Video(_) => AdKind::Video,
            Self::Poster(_) => AdKind::Poster,
        }
    }

    pub fn record(&self) -> &AdRecord {
        match self {
            Self::Video(record) | Self::Poster(record) => record,
        }
    }

    pub fn id(&self) -> &str {
        &self.record().id
    }

    pub fn position(&self) -> Option<&Position> {
        self.record().position.as_ref()
    }
}

/// A text classified from `/line-ad/today`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAd {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: AdId,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub main_category: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category_one: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category_two: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub category_three: Option<CategoryRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub city: Option<LocationRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub state: Option<LocationRef>,
    #[serde(default, deserialize_with = "deserialize_lenient_seq")]
    pub images: Vec<ImageRef>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub contact_one: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub contact_two: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "deserialize_lenient")]
    pub created_at: Option<Timestamp>,
    #[serde(default, alias = "updated_at", deserialize_with = "deserialize_lenient")]
    pub updated_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------

/// Accept ids as either JSON strings or integers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<AdId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// A value that does not parse (wrong type, blank timestamp, `null` where a
/// list is expected) is replaced by its default instead of failing the
/// enclosing record.
pub(crate) fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A list whose malformed elements are skipped. Anything other than an
/// array yields an empty list.
pub(crate) fn deserialize_lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn poster_record_parses_backend_payload() {
        let json = serde_json::json!({
            "id": "a1",
            "image": { "fileName": "banner.png" },
            "mainCategory": { "id": "c1", "name": "Property" },
            "city": { "id": 7, "name": "Pune" },
            "position": { "pageType": "HOME", "side": "LEFT_SIDE", "position": 3 },
            "createdAt": "2026-10-01T08:00:00Z"
        });

        let record: AdRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.id, "a1");
        assert_eq!(record.city.as_ref().unwrap().id, "7");
        assert_eq!(
            record.position,
            Some(Position {
                page_type: PageType::Home,
                side: Side::LeftSide,
                position: Some(3),
            })
        );
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn numeric_ids_become_strings() {
        let record: AdRecord = serde_json::from_value(serde_json::json!({ "id": 42 })).unwrap();
        assert_eq!(record.id, "42");
    }

    #[test]
    fn malformed_position_is_dropped_not_fatal() {
        let json = serde_json::json!({
            "id": "a2",
            "position": { "pageType": "SEARCH", "side": "LEFT_SIDE", "position": 1 }
        });
        let record: AdRecord = serde_json::from_value(json).unwrap();
        assert!(record.position.is_none());
    }

    #[test]
    fn ad_serializes_with_kind_tag() {
        let ad = Ad::Poster(AdRecord::new("p1"));
        let json = serde_json::to_value(&ad).unwrap();
        assert_eq!(json["kind"], "poster");
        assert_eq!(json["id"], "p1");

        let back: Ad = serde_json::from_value(json).unwrap();
        assert_matches!(back, Ad::Poster(ref r) if r.id == "p1");
    }

    #[test]
    fn side_parses_wire_names() {
        assert_eq!("CENTER_TOP".parse::<Side>().unwrap(), Side::CenterTop);
        assert!("TOP".parse::<Side>().is_err());
        assert!(Side::CenterBottom.is_center());
        assert!(!Side::RightSide.is_center());
    }

    #[test]
    fn line_ad_defaults_missing_collections() {
        let line: LineAd = serde_json::from_value(serde_json::json!({
            "id": "l1",
            "content": "2BHK for rent",
            "updated_at": "2026-10-02T10:00:00Z"
        }))
        .unwrap();
        assert!(line.images.is_empty());
        assert!(line.updated_at.is_some());
    }

    #[test]
    fn bad_optional_fields_do_not_sink_an_ad_list() {
        let records: Vec<AdRecord> = serde_json::from_value(serde_json::json!([
            { "id": "good", "image": { "fileName": "a.png" }, "updatedAt": "2026-10-02T10:00:00Z" },
            { "id": "bad", "image": "banner.png", "updatedAt": "", "createdAt": 17, "city": [] }
        ]))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].image.as_ref().unwrap().file_name.as_deref(), Some("a.png"));
        assert!(records[0].updated_at.is_some());

        let bad = &records[1];
        assert_eq!(bad.id, "bad");
        assert!(bad.image.is_none());
        assert!(bad.created_at.is_none());
        assert!(bad.updated_at.is_none());
        assert!(bad.city.is_none());
    }

    #[test]
    fn bad_line_ad_fields_fall_back_to_defaults() {
        let lines: Vec<LineAd> = serde_json::from_value(serde_json::json!([
            { "id": "l1", "content": "Flat for sale", "images": [{ "fileName": "f.png" }] },
            { "id": "l2", "content": null, "images": null, "updatedAt": "  " },
            { "id": "l3", "content": 99, "images": [{ "fileName": "ok.png" }, "junk", 5] }
        ]))
        .unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].images.len(), 1);
        assert_eq!(lines[1].content, "");
        assert!(lines[1].images.is_empty());
        assert!(lines[1].updated_at.is_none());
        assert_eq!(lines[2].content, "");
        assert_eq!(lines[2].images.len(), 1);
        assert_eq!(lines[2].images[0].file_name.as_deref(), Some("ok.png"));
    }
}
