//! Highlight records and the validation boundary they cross on their way in
//! from the remote store.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{DISCORD_CDN_HOST, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

/// A highlight row exactly as the store returns it.
///
/// Every field is optional here; [`Highlight::try_from`] decides what is
/// acceptable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHighlight {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub media_urls: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("highlight is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("highlight field `{field}` has unsupported type: {found}")]
    UnsupportedType { field: &'static str, found: String },
    #[error("highlight row is malformed: {0}")]
    Malformed(String),
}

impl TryFrom<Value> for Highlight {
    type Error = ValidationError;

    fn try_from(row: Value) -> Result<Self, Self::Error> {
        let raw: RawHighlight =
            serde_json::from_value(row).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }
}

/// A validated highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub id: String,
    pub media_urls: Vec<String>,
    pub game: Option<String>,
    pub tags: Option<Vec<String>>,
    pub username: String,
    pub created_at: String,
    pub content: Option<String>,
}

impl TryFrom<RawHighlight> for Highlight {
    type Error = ValidationError;

    fn try_from(raw: RawHighlight) -> Result<Self, Self::Error> {
        let id = match raw.id {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            None | Some(Value::Null | Value::String(_)) => {
                return Err(ValidationError::MissingField("id"))
            }
            Some(other) => {
                return Err(ValidationError::UnsupportedType {
                    field: "id",
                    found: other.to_string(),
                })
            }
        };
        let username = non_blank(raw.username).ok_or(ValidationError::MissingField("username"))?;
        let created_at =
            non_blank(raw.created_at).ok_or(ValidationError::MissingField("created_at"))?;

        Ok(Self {
            id,
            // null slots stay in place so a null first URL still means no media
            media_urls: raw
                .media_urls
                .unwrap_or_default()
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
            game: raw.game,
            tags: raw.tags.map(|tags| tags.into_iter().flatten().collect()),
            username,
            created_at,
            content: raw.content,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Validate a batch of rows as decoded JSON, dropping the ones that fail.
///
/// Each row is decoded on its own, so a wrongly typed column only costs that
/// row. Rejections are logged; the remaining rows keep their store order.
#[must_use]
pub fn validate_rows(rows: Vec<Value>) -> Vec<Highlight> {
    let total = rows.len();
    let highlights: Vec<Highlight> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match Highlight::try_from(row) {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::warn!(row = index, error = %e, "Skipping invalid highlight row");
                None
            }
        })
        .collect();

    if highlights.len() != total {
        tracing::debug!(
            kept = highlights.len(),
            rejected = total - highlights.len(),
            "Validated highlight rows"
        );
    }
    highlights
}

/// What kind of media a highlight's first URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// No usable URL.
    None,
    Video,
    Image,
    /// A URL that is neither a known video nor a known image.
    Unknown,
}

impl MediaKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Video => "video",
            Self::Image => "image",
            Self::Unknown => "unknown",
        }
    }
}

/// Classify a media URL by suffix, or by the trusted CDN host for images.
#[must_use]
pub fn classify(url: &str) -> MediaKind {
    if url.trim().is_empty() {
        return MediaKind::None;
    }
    if VIDEO_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
        MediaKind::Video
    } else if IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) || url.contains(DISCORD_CDN_HOST)
    {
        MediaKind::Image
    } else {
        MediaKind::Unknown
    }
}

impl Highlight {
    /// The first media URL, if it is non-blank.
    #[must_use]
    pub fn primary_media(&self) -> Option<&str> {
        self.media_urls
            .first()
            .map(String::as_str)
            .filter(|u| !u.trim().is_empty())
    }

    #[must_use]
    pub fn media_kind(&self) -> MediaKind {
        self.primary_media().map_or(MediaKind::None, classify)
    }

    /// Tags in display order; empty when the row had none.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Alt text for the highlight's media.
    #[must_use]
    pub fn alt_text(&self) -> String {
        format!(
            "Highlight from {}",
            self.game.as_deref().unwrap_or("Unknown Game")
        )
    }

    /// `created_at` formatted as e.g. `Jan 5, 2024`, or `Unknown`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        format_date(&self.created_at).unwrap_or_else(|| "Unknown".to_string())
    }
}

fn format_date(timestamp: &str) -> Option<String> {
    const DISPLAY: &str = "%b %-d, %Y";
    let timestamp = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.format(DISPLAY).to_string());
    }
    // Postgres `timestamp` columns come back without an offset
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, pattern) {
            return Some(dt.format(DISPLAY).to_string());
        }
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .map(|d| d.format(DISPLAY).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawHighlight {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("clip.mp4"), MediaKind::Video);
        assert_eq!(classify("https://x.test/a.webm"), MediaKind::Video);
        assert_eq!(classify("pic.png"), MediaKind::Image);
        assert_eq!(classify("pic.jpeg"), MediaKind::Image);
        assert_eq!(classify(""), MediaKind::None);
        assert_eq!(classify("   "), MediaKind::None);
        assert_eq!(
            classify("https://cdn.discordapp.com/x"),
            MediaKind::Image
        );
        assert_eq!(classify("https://example.com/file.txt"), MediaKind::Unknown);
    }

    #[test]
    fn test_classify_video_wins_over_trusted_host() {
        assert_eq!(
            classify("https://cdn.discordapp.com/attachments/1/2/clip.mov"),
            MediaKind::Video
        );
    }

    #[test]
    fn test_classify_is_case_sensitive_on_suffix() {
        assert_eq!(classify("https://example.com/CLIP.MP4"), MediaKind::Unknown);
    }

    #[test]
    fn test_try_from_full_row() {
        let h = Highlight::try_from(raw(json!({
            "id": "abc",
            "media_urls": ["https://cdn.discordapp.com/a.png", "ignored.mp4"],
            "game": "Chess",
            "tags": ["clutch", null, "win"],
            "username": "magnus",
            "created_at": "2024-01-05T10:20:30.123456+00:00",
            "content": "mate in one"
        })))
        .unwrap();

        assert_eq!(h.id, "abc");
        assert_eq!(h.media_kind(), MediaKind::Image);
        assert_eq!(h.tags(), ["clutch".to_string(), "win".to_string()]);
        assert_eq!(h.formatted_date(), "Jan 5, 2024");
        assert_eq!(h.alt_text(), "Highlight from Chess");
    }

    #[test]
    fn test_try_from_numeric_id_and_nulls() {
        let h = Highlight::try_from(raw(json!({
            "id": 42,
            "media_urls": null,
            "game": null,
            "tags": null,
            "username": "u",
            "created_at": "2024-02-29T00:00:00",
            "content": null
        })))
        .unwrap();

        assert_eq!(h.id, "42");
        assert!(h.media_urls.is_empty());
        assert_eq!(h.media_kind(), MediaKind::None);
        assert!(h.tags().is_empty());
        assert_eq!(h.formatted_date(), "Feb 29, 2024");
        assert_eq!(h.alt_text(), "Highlight from Unknown Game");
    }

    #[test]
    fn test_try_from_rejects_missing_fields() {
        let missing_id = raw(json!({"username": "u", "created_at": "2024-01-01"}));
        assert_eq!(
            Highlight::try_from(missing_id),
            Err(ValidationError::MissingField("id"))
        );

        let blank_user = raw(json!({"id": "1", "username": " ", "created_at": "2024-01-01"}));
        assert_eq!(
            Highlight::try_from(blank_user),
            Err(ValidationError::MissingField("username"))
        );

        let missing_date = raw(json!({"id": "1", "username": "u"}));
        assert_eq!(
            Highlight::try_from(missing_date),
            Err(ValidationError::MissingField("created_at"))
        );
    }

    #[test]
    fn test_try_from_rejects_object_id() {
        let row = raw(json!({"id": {"a": 1}, "username": "u", "created_at": "2024-01-01"}));
        assert!(matches!(
            Highlight::try_from(row),
            Err(ValidationError::UnsupportedType { field: "id", .. })
        ));
    }

    #[test]
    fn test_validate_rows_keeps_order_and_drops_invalid() {
        let rows = vec![
            json!({"id": "3", "username": "a", "created_at": "2024-03-01"}),
            json!({"id": "2", "created_at": "2024-02-01"}),
            json!({"id": "1", "username": "c", "created_at": "2024-01-01"}),
        ];
        let ids: Vec<_> = validate_rows(rows).into_iter().map(|h| h.id).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn test_blank_first_media_url_is_none() {
        let h = Highlight::try_from(raw(json!({
            "id": "1",
            "media_urls": ["  ", "b.mp4"],
            "username": "u",
            "created_at": "2024-01-01"
        })))
        .unwrap();
        assert_eq!(h.primary_media(), None);
        assert_eq!(h.media_kind(), MediaKind::None);
    }

    #[test]
    fn test_validate_rows_skips_wrongly_typed_columns() {
        let rows = vec![
            json!({"id": "4", "game": 5, "username": "a", "created_at": "2024-04-01"}),
            json!({"id": "3", "tags": "x", "username": "b", "created_at": "2024-03-01"}),
            json!({"id": "2", "media_urls": [1], "username": "c", "created_at": "2024-02-01"}),
            json!("not a row"),
            json!({"id": "1", "game": "Go", "username": "d", "created_at": "2024-01-01"}),
        ];
        let kept = validate_rows(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
        assert_eq!(kept[0].game.as_deref(), Some("Go"));
    }

    #[test]
    fn test_try_from_value_reports_malformed_row() {
        let err = Highlight::try_from(json!({
            "id": "1",
            "game": 5,
            "username": "u",
            "created_at": "2024-01-01"
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn test_null_first_media_url_is_none() {
        let h = Highlight::try_from(raw(json!({
            "id": "1",
            "media_urls": [null, "https://x.test/b.mp4"],
            "username": "u",
            "created_at": "2024-01-01"
        })))
        .unwrap();
        assert_eq!(h.primary_media(), None);
        assert_eq!(h.media_kind(), MediaKind::None);
    }

    #[test]
    fn test_unparseable_date_is_unknown() {
        assert_eq!(format_date("yesterday"), None);
        assert_eq!(format_date("2024-12-25").as_deref(), Some("Dec 25, 2024"));
    }
}
