//! Wire-level data models for the `journal-api` crate.
//!
//! These models define tolerant representations of the payloads the journal
//! backend actually sends: some endpoints wrap the payload in a `data`
//! envelope, some emit snake_case and some camelCase field names, and ids
//! arrive as strings or numbers depending on the endpoint. All of that
//! tolerance lives here, so the portal core only ever sees canonical shapes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::ApiError;

/// Strips one optional `{data: ...}` envelope from a response body.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Returns the first non-empty string found under any of `keys`.
fn pick_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}

/// Accepts an id that arrives as a JSON string, a number, or not at all.
fn deserialize_flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Num(n)) => n.to_string(),
        Some(RawId::Str(s)) => s,
        None => String::new(),
    })
}

/// User record as the backend sends it, before canonicalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    pub id: String,
    #[serde(default, alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    #[serde(default, alias = "middleName", alias = "middle_name")]
    pub patronymic: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phoneNumber", alias = "phone_number")]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, alias = "organization")]
    pub affiliation: String,
    #[serde(default)]
    pub gamification: RawGamification,
    #[serde(default, alias = "avatarUrl", alias = "avatar_url")]
    pub avatar: Option<String>,
    #[serde(default, alias = "telegramUsername", alias = "telegram_username")]
    pub telegram: Option<String>,
}

/// Gamification sub-record attached to a user profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGamification {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub points: i64,
}

/// Notification record as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNotification {
    #[serde(default)]
    pub id: i64,
    #[serde(default, alias = "text")]
    pub message: String,
    #[serde(default, alias = "is_read", alias = "isRead")]
    pub read: bool,
    #[serde(default, alias = "url")]
    pub link: Option<String>,
}

/// Normalized view of a login response.
///
/// The backend has been observed to answer with `access` or `access_token`,
/// with or without a `refresh`/`refresh_token`, and with the user either
/// nested under `user` or spread over the top level. An absent access token
/// is represented as `None`; deciding what that means is session policy, not
/// a wire concern.
#[derive(Debug, Clone, Default)]
pub struct LoginPayload {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub user: Option<RawUser>,
}

impl LoginPayload {
    /// Resolves every known alias and envelope variant of the login response.
    pub fn from_value(value: Value) -> Self {
        let body = unwrap_data(value);
        let access = pick_str(&body, &["access", "access_token"]);
        let refresh = pick_str(&body, &["refresh", "refresh_token"]);
        let user_value = match body.get("user") {
            Some(nested) if nested.is_object() => Some(nested.clone()),
            _ if body.get("id").is_some() => Some(body.clone()),
            _ => None,
        };
        let user = user_value.and_then(|v| serde_json::from_value::<RawUser>(v).ok());
        Self {
            access,
            refresh,
            user,
        }
    }
}

/// Decodes a profile response into a [`RawUser`].
pub fn parse_user(value: Value) -> Result<RawUser, ApiError> {
    serde_json::from_value(unwrap_data(value)).map_err(|err| ApiError::Malformed(err.to_string()))
}

/// Decodes a notification-list response, skipping entries that are not
/// objects. A body that is not an array at all yields an empty list.
pub fn parse_notifications(value: Value) -> Vec<RawNotification> {
    match unwrap_data(value) {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
