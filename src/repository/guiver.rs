use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::{new_id, next_timestamp, GuiverRepository};
use crate::database::{Collection, DocumentStore, StoreError};
use crate::models::Guiver;

pub const GUIVERS: &str = "guivers";

pub struct StoreGuiverRepository {
    guivers: Collection<Guiver>,
}

impl StoreGuiverRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            guivers: Collection::new(GUIVERS, store),
        }
    }
}

#[async_trait]
impl GuiverRepository for StoreGuiverRepository {
    async fn create(&self, mut guiver: Guiver) -> Result<Guiver, StoreError> {
        if guiver.id.is_empty() {
            guiver.id = new_id();
        }
        let now = Utc::now();
        guiver.created_at = now;
        guiver.updated_at = now;

        self.guivers.create(&guiver.id, &guiver).await?;
        tracing::info!("Created guiver {}", guiver.id);
        Ok(guiver)
    }

    async fn get_by_id(&self, id: &str) -> Result<Guiver, StoreError> {
        self.guivers.get(id).await
    }

    async fn update(&self, mut guiver: Guiver) -> Result<Guiver, StoreError> {
        guiver.updated_at = next_timestamp(guiver.updated_at);
        self.guivers.update(&guiver.id, &guiver).await?;
        Ok(guiver)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.guivers.delete(id).await?;
        tracing::info!("Deleted guiver {}", id);
        Ok(())
    }
}
