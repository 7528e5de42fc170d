use async_trait::async_trait;

use crate::model;

pub mod graph;
pub mod mock;

#[async_trait]
pub trait Drive: Send + Sync {
    async fn drive_get_item(
        &self,
        ctx: &model::drive::DriveContext,
        user: &model::drive::User,
        item_id: &str,
    ) -> Result<model::drive::ItemMeta, model::drive::DriveError>;
}
