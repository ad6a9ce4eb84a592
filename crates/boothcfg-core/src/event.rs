//! Event configuration model and the two lookup keys
//!
//! An `EventConfig` is treated as an opaque, immutable record by the
//! resolution layer. The typed fields mirror what the configuration service
//! returns; anything else is kept in `extra` so nothing is lost on the way
//! to the UI.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Resolved settings for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Document ID in the configuration store
    #[serde(rename = "_id")]
    pub id: String,

    /// Document revision
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Owning tenant
    #[serde(default)]
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_full_name: Option<String>,

    pub slug: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Numeric event ID; the service sends it as a number or a numeric string
    #[serde(
        default,
        deserialize_with = "deserialize_event_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub postgres_event_id: Option<u64>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub templates: Vec<Template>,

    #[serde(default)]
    pub branding: Branding,

    #[serde(default)]
    pub settings: EventSettings,

    /// Fields this layer does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ThemeMode>,
}

/// A photo template offered at the booth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_header: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_branding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tagline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_watermark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_custom_prompt: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Watermark>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkKind {
    Image,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watermark {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: WatermarkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub position: WatermarkPosition,
    /// Percentage of image width
    pub size: f64,
    /// 0.0 - 1.0
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_photos_per_session: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn deserialize_event_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid postgres_event_id: {}", n))),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid postgres_event_id: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!(
            "invalid postgres_event_id: {}",
            other
        ))),
    }
}

/// Tenant slug + event slug lookup key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugKey {
    tenant_slug: String,
    event_slug: String,
}

impl SlugKey {
    /// Build a key, or `None` if either slug is empty
    pub fn new(tenant_slug: impl Into<String>, event_slug: impl Into<String>) -> Option<Self> {
        let tenant_slug = tenant_slug.into();
        let event_slug = event_slug.into();
        if tenant_slug.is_empty() || event_slug.is_empty() {
            return None;
        }
        Some(Self {
            tenant_slug,
            event_slug,
        })
    }

    pub fn tenant_slug(&self) -> &str {
        &self.tenant_slug
    }

    pub fn event_slug(&self) -> &str {
        &self.event_slug
    }
}

impl fmt::Display for SlugKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant_slug, self.event_slug)
    }
}

/// Numeric event ID + event slug lookup key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdKey {
    event_id: u64,
    event_slug: String,
}

impl IdKey {
    /// Build a key, or `None` if the ID is missing or zero, or the slug is missing or empty
    pub fn new(event_id: Option<u64>, event_slug: Option<&str>) -> Option<Self> {
        let event_id = event_id.filter(|id| *id > 0)?;
        let event_slug = event_slug.filter(|s| !s.is_empty())?;
        Some(Self {
            event_id,
            event_slug: event_slug.to_string(),
        })
    }

    pub fn event_id(&self) -> u64 {
        self.event_id
    }

    pub fn event_slug(&self) -> &str {
        &self.event_slug
    }
}

impl fmt::Display for IdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}/{}", self.event_id, self.event_slug)
    }
}
