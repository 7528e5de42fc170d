use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::{adapters, model};

pub struct MockClient {
    responses: HashMap<String, Result<model::drive::ItemMeta, model::drive::DriveError>>,
    calls: Arc<Mutex<Vec<String>>>,
    latency: Option<Duration>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            latency: None,
        }
    }

    pub fn with_item(mut self, meta: model::drive::ItemMeta) -> Self {
        self.responses.insert(meta.id.clone(), Ok(meta));
        self
    }

    pub fn with_error(mut self, item_id: &str, err: model::drive::DriveError) -> Self {
        self.responses.insert(item_id.to_string(), Err(err));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl adapters::Drive for MockClient {
    async fn drive_get_item(
        &self,
        _ctx: &model::drive::DriveContext,
        _user: &model::drive::User,
        item_id: &str,
    ) -> Result<model::drive::ItemMeta, model::drive::DriveError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.calls
            .lock()
            .expect("failed to acquire `calls` guard")
            .push(item_id.to_string());

        match self.responses.get(item_id) {
            Some(res) => res.clone(),
            None => Ok(model::drive::ItemMeta {
                id: item_id.to_string(),
                name: item_id.to_string(),
                size: 0,
                created_date_time: None,
                last_modified_date_time: None,
                e_tag: None,
                web_url: None,
            }),
        }
    }
}
