use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ApodError, ApodResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Other => "other",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "" => Err("Empty media type".to_string()),
            _ => Ok(MediaKind::Other),
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One APOD entry as served by the record source.
///
/// Every field is optional on the wire. Fields this crate does not model are
/// kept in `extra` so the persisted file carries whatever the source sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApodRecord {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            title: None,
            explanation: None,
            url: None,
            hdurl: None,
            media_type: None,
            copyright: None,
            service_version: None,
            extra: Map::new(),
        }
    }

    /// Validate a raw JSON element from the source.
    ///
    /// Only structural problems are errors: a non-object, or a `date` that is
    /// present but not `YYYY-MM-DD`. Missing fields are fine here and are
    /// handled where they matter.
    pub fn from_value(value: Value) -> ApodResult<Self> {
        if !value.is_object() {
            return Err(ApodError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        serde_json::from_value(value).map_err(|e| ApodError::InvalidRecord(e.to_string()))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_hdurl(mut self, hdurl: impl Into<String>) -> Self {
        self.hdurl = Some(hdurl.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// `None` only when the source sent no `media_type`; such records count
    /// as displayable. A present but blank value is `Other`.
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media_type
            .as_deref()
            .map(|m| m.parse().unwrap_or(MediaKind::Other))
    }

    pub fn is_image(&self) -> bool {
        matches!(self.media_kind(), None | Some(MediaKind::Image))
    }

    /// Pick the URL to download for this record.
    pub fn asset_url(&self, prefer_hd: bool) -> Option<String> {
        let hd = self.hdurl.as_deref().filter(|u| !u.trim().is_empty());
        let sd = self.url.as_deref().filter(|u| !u.trim().is_empty());

        let chosen = if prefer_hd { hd.or(sd) } else { sd };
        chosen.map(normalize_asset_url)
    }

    /// Human label for log lines
    pub fn label(&self) -> String {
        self.date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn normalize_asset_url(url: &str) -> String {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    url.to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full_record() {
        let record = ApodRecord::from_value(json!({
            "date": "2023-01-01",
            "title": "Wolf Moon",
            "explanation": "A full moon rises.",
            "url": "https://apod.nasa.gov/apod/image/2301/moon.jpg",
            "hdurl": "https://apod.nasa.gov/apod/image/2301/moon_big.jpg",
            "media_type": "image",
            "service_version": "v1"
        }))
        .unwrap();

        assert_eq!(record.date, Some("2023-01-01".parse().unwrap()));
        assert_eq!(record.title.as_deref(), Some("Wolf Moon"));
        assert_eq!(record.media_kind(), Some(MediaKind::Image));
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_from_value_keeps_unknown_fields() {
        let value = json!({
            "date": "2023-01-02",
            "media_type": "video",
            "thumbnail_url": "https://img.youtube.com/vi/x/0.jpg"
        });

        let record = ApodRecord::from_value(value.clone()).unwrap();
        assert!(record.extra.contains_key("thumbnail_url"));
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_from_value_allows_missing_date() {
        let record = ApodRecord::from_value(json!({"url": "https://example.com/a.jpg"})).unwrap();
        assert!(record.date.is_none());
        assert_eq!(record.label(), "unknown");
    }

    #[test]
    fn test_from_value_rejects_bad_date() {
        let result = ApodRecord::from_value(json!({"date": "01/02/2023"}));
        assert!(matches!(result, Err(ApodError::InvalidRecord(_))));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let result = ApodRecord::from_value(json!("2023-01-01"));
        match result {
            Err(ApodError::InvalidRecord(msg)) => assert!(msg.contains("a string")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_is_image() {
        let date = Some("2023-01-01".parse().unwrap());

        assert!(ApodRecord::new(date).is_image());
        assert!(ApodRecord::new(date).with_media_type("image").is_image());
        assert!(ApodRecord::new(date).with_media_type("IMAGE").is_image());
        assert!(!ApodRecord::new(date).with_media_type("video").is_image());
        assert!(!ApodRecord::new(date).with_media_type("other").is_image());
    }

    #[test]
    fn test_blank_media_type_is_not_an_image() {
        let record = ApodRecord::from_value(json!({
            "date": "2023-01-01",
            "media_type": "",
            "url": "https://example.com/a.mp4"
        }))
        .unwrap();

        assert_eq!(record.media_kind(), Some(MediaKind::Other));
        assert!(!record.is_image());

        let blank = ApodRecord::new(None).with_media_type("   ");
        assert!(!blank.is_image());
    }

    #[test]
    fn test_asset_url_preference() {
        let record = ApodRecord::new(None)
            .with_url("https://example.com/small.jpg")
            .with_hdurl("https://example.com/big.jpg");

        assert_eq!(record.asset_url(false).as_deref(), Some("https://example.com/small.jpg"));
        assert_eq!(record.asset_url(true).as_deref(), Some("https://example.com/big.jpg"));
    }

    #[test]
    fn test_asset_url_falls_back_to_url_without_hd() {
        let record = ApodRecord::new(None).with_url("https://example.com/small.jpg");
        assert_eq!(record.asset_url(true).as_deref(), Some("https://example.com/small.jpg"));

        let hd_only = ApodRecord::new(None).with_hdurl("https://example.com/big.jpg");
        assert_eq!(hd_only.asset_url(false), None);
    }

    #[test]
    fn test_asset_url_protocol_relative() {
        let record = ApodRecord::new(None).with_url("//apod.nasa.gov/apod/image/a.jpg");
        assert_eq!(
            record.asset_url(false).as_deref(),
            Some("https://apod.nasa.gov/apod/image/a.jpg")
        );
    }

    #[test]
    fn test_asset_url_blank_is_missing() {
        let record = ApodRecord::new(None).with_url("   ");
        assert_eq!(record.asset_url(false), None);
    }
}
