use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{adapters, model};

pub const DEFAULT_ENDPOINT: &str = "https://graph.microsoft.com/v1.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GraphClient {
    http: reqwest::Client,
}

impl GraphClient {
    pub fn new() -> Result<Self, model::drive::DriveError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| model::drive::DriveError {
                kind: model::drive::ErrorKind::Other,
                code: "clientBuildFailed".to_string(),
                message: format!("failed to build http client: {}", err),
                item_id: None,
            })?;

        Ok(Self { http })
    }
}

#[async_trait]
impl adapters::Drive for GraphClient {
    async fn drive_get_item(
        &self,
        ctx: &model::drive::DriveContext,
        user: &model::drive::User,
        item_id: &str,
    ) -> Result<model::drive::ItemMeta, model::drive::DriveError> {
        let url = format!(
            "{}/{}/drive/items/{}",
            ctx.endpoint,
            user.drive_path(),
            item_id
        );

        let res = self
            .http
            .get(&url)
            .bearer_auth(&ctx.access_token)
            .send()
            .await
            .map_err(|err| model::drive::DriveError {
                kind: model::drive::ErrorKind::Other,
                code: "requestFailed".to_string(),
                message: format!("failed to get_item: {}, {}", item_id, err),
                item_id: Some(item_id.to_string()),
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(parse_error_body(item_id, status.as_u16(), &body));
        }

        let meta = res.json::<model::drive::ItemMeta>().await.map_err(|err| {
            model::drive::DriveError {
                kind: model::drive::ErrorKind::Other,
                code: "malformedItem".to_string(),
                message: format!("failed to decode item: {}, {}", item_id, err),
                item_id: Some(item_id.to_string()),
            }
        })?;

        Ok(meta)
    }
}

#[derive(Deserialize)]
struct GraphErrorBody {
    error: GraphErrorPayload,
}

#[derive(Deserialize)]
struct GraphErrorPayload {
    code: String,
    message: String,
}

pub fn kind_for_status(status: u16) -> model::drive::ErrorKind {
    match status {
        401 => model::drive::ErrorKind::Unauthorized,
        403 => model::drive::ErrorKind::Forbidden,
        404 => model::drive::ErrorKind::NotFound,
        409 => model::drive::ErrorKind::Conflict,
        429 => model::drive::ErrorKind::RateLimited,
        _ => model::drive::ErrorKind::Other,
    }
}

pub fn parse_error_body(item_id: &str, status: u16, body: &str) -> model::drive::DriveError {
    let kind = kind_for_status(status);

    match serde_json::from_str::<GraphErrorBody>(body) {
        Ok(parsed) => model::drive::DriveError {
            kind,
            code: parsed.error.code,
            message: parsed.error.message,
            item_id: Some(item_id.to_string()),
        },
        Err(_) => model::drive::DriveError {
            kind,
            code: "unknown".to_string(),
            message: format!("unrecognized error body for: {}, {}", item_id, body),
            item_id: Some(item_id.to_string()),
        },
    }
}
