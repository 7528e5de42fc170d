use std::time::Duration;

use futures::{stream, StreamExt};
use tracing::{info, warn};

use crate::{adapters, model};

pub struct DriveFetcher {
    pub client: Box<dyn adapters::Drive>,
    pub status_map: model::drive::StatusMap,
}

impl DriveFetcher {
    pub fn new(client: Box<dyn adapters::Drive>) -> Self {
        Self {
            client,
            status_map: model::drive::StatusMap::default(),
        }
    }

    pub fn with_status_map(mut self, status_map: model::drive::StatusMap) -> Self {
        self.status_map = status_map;
        self
    }

    /// One result per input identifier, in input order. Per-item failures are
    /// folded into `ItemInfo::Degraded`, never escalated.
    pub async fn fetch_file_info(
        &self,
        ctx: &model::drive::DriveContext,
        user: &model::drive::User,
        item_ids: Option<&[String]>,
    ) -> Result<Vec<model::drive::ItemInfo>, model::drive::BatchError> {
        let ids = match item_ids {
            None => {
                return Err(model::drive::BatchError::InvalidInput(
                    "file identifiers must not be absent".to_string(),
                ));
            }
            Some(ids) => ids,
        };

        let infos = stream::iter(ids)
            .then(|id| self.get_item_info(ctx, user, id))
            .collect::<Vec<_>>()
            .await;

        info!(total = infos.len(), "fetched file info batch");

        Ok(infos)
    }

    /// On expiry any outstanding per-item work is dropped; no partial batch
    /// is returned.
    pub async fn fetch_file_info_deadline(
        &self,
        ctx: &model::drive::DriveContext,
        user: &model::drive::User,
        item_ids: Option<&[String]>,
        deadline: Duration,
    ) -> Result<Vec<model::drive::ItemInfo>, model::drive::BatchError> {
        match tokio::time::timeout(deadline, self.fetch_file_info(ctx, user, item_ids)).await {
            Ok(res) => res,
            Err(_) => Err(model::drive::BatchError::Cancelled(deadline)),
        }
    }

    async fn get_item_info(
        &self,
        ctx: &model::drive::DriveContext,
        user: &model::drive::User,
        item_id: &str,
    ) -> model::drive::ItemInfo {
        match self.client.drive_get_item(ctx, user, item_id).await {
            Ok(meta) => model::drive::ItemInfo::Meta(meta),
            Err(err) => {
                warn!(
                    item_id = item_id,
                    provider_item_id = ?err.item_id,
                    status = %err.code,
                    "degraded item"
                );

                // Always echo the identifier the caller asked for, not the
                // one the provider reported in the error.
                model::drive::ItemInfo::Degraded(model::drive::DegradedItem {
                    id: item_id.to_string(),
                    status: err.code,
                    status_code: self.status_map.status_for(err.kind),
                })
            }
        }
    }
}
