use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct DriveContext {
    pub endpoint: String,
    pub access_token: String,
}

impl DriveContext {
    pub fn new(endpoint: &str, access_token: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum User {
    Me,
    Principal(String),
}

impl User {
    pub fn drive_path(&self) -> String {
        match self {
            User::Me => "me".to_string(),
            User::Principal(principal) => format!("users/{}", principal),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_date_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_modified_date_time: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}

/// A failed lookup is normalized into `Degraded` so batch consumers keep a
/// single code path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemInfo {
    Meta(ItemMeta),
    Degraded(DegradedItem),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DegradedItem {
    pub id: String,
    pub status: String,
    pub status_code: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimited,
    Other,
}

/// `item_id` is the identifier the provider reported, which can differ from
/// the requested one.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("drive error {code}: {message}")]
pub struct DriveError {
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
    pub item_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum BatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("batch fetch cancelled after {0:?}")]
    Cancelled(Duration),
}

/// Kinds without an entry fall back to 500.
#[derive(Clone, Debug)]
pub struct StatusMap {
    codes: HashMap<ErrorKind, u16>,
    fallback: u16,
}

impl StatusMap {
    pub fn with(mut self, kind: ErrorKind, status: u16) -> Self {
        self.codes.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: ErrorKind) -> u16 {
        *self.codes.get(&kind).unwrap_or(&self.fallback)
    }
}

impl Default for StatusMap {
    fn default() -> Self {
        let mut codes = HashMap::new();
        codes.insert(ErrorKind::NotFound, 404);
        codes.insert(ErrorKind::Unauthorized, 401);
        codes.insert(ErrorKind::Forbidden, 403);
        codes.insert(ErrorKind::Conflict, 409);

        Self {
            codes,
            fallback: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for() {
        let map = StatusMap::default();

        let cases = vec![
            (ErrorKind::NotFound, 404),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::Conflict, 409),
            (ErrorKind::RateLimited, 500),
            (ErrorKind::Other, 500),
        ];

        for (kind, expected) in cases {
            let result = map.status_for(kind);
            assert_eq!(result, expected, "failed for case: {:?}", kind);
        }
    }

    #[test]
    fn test_status_map_with() {
        let map = StatusMap::default().with(ErrorKind::RateLimited, 429);

        assert_eq!(map.status_for(ErrorKind::RateLimited), 429);
        assert_eq!(map.status_for(ErrorKind::NotFound), 404);
        assert_eq!(map.status_for(ErrorKind::Other), 500);
    }

    #[test]
    fn test_drive_path() {
        let cases = vec![
            (User::Me, "me".to_string()),
            (
                User::Principal("alice@contoso.com".to_string()),
                "users/alice@contoso.com".to_string(),
            ),
        ];

        for (user, expected) in cases {
            let result = user.drive_path();
            assert_eq!(result, expected, "failed for case: {}", expected);
        }
    }

    #[test]
    fn test_context_trims_trailing_slash() {
        let ctx = DriveContext::new("https://graph.microsoft.com/v1.0/", "token");

        assert_eq!(ctx.endpoint, "https://graph.microsoft.com/v1.0");
        assert_eq!(ctx.access_token, "token");
    }
}
