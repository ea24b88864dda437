use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::{new_id, next_timestamp, CauseRepository};
use crate::database::{Collection, DocumentStore, StoreError};
use crate::filter::params::CREATED_AT;
use crate::filter::{CauseFilter, Filter, Mutation, Page, Pagination, SortDirection};
use crate::models::{Cause, Comment, Update};

pub const CAUSES: &str = "causes";
pub const COMMENTS: &str = "comments";

pub struct StoreCauseRepository {
    causes: Collection<Cause>,
}

impl StoreCauseRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            causes: Collection::new(CAUSES, store),
        }
    }

    fn comments(&self, cause_id: &str) -> Collection<Comment> {
        self.causes.child(cause_id, COMMENTS)
    }

    fn touch() -> Result<Mutation, StoreError> {
        Ok(Mutation::Set {
            field: "updatedAt".to_string(),
            value: serde_json::to_value(Utc::now())?,
        })
    }
}

#[async_trait]
impl CauseRepository for StoreCauseRepository {
    async fn create(&self, mut cause: Cause) -> Result<Cause, StoreError> {
        if cause.id.is_empty() {
            cause.id = new_id();
        }
        let now = Utc::now();
        cause.created_at = now;
        cause.updated_at = now;
        cause.likes = 0;

        self.causes.create(&cause.id, &cause).await?;
        tracing::info!("Created cause {} for guiver {}", cause.id, cause.guiver_id);
        Ok(cause)
    }

    async fn get_by_id(&self, id: &str) -> Result<Cause, StoreError> {
        self.causes.get(id).await
    }

    async fn list_by_guiver(&self, guiver_id: &str) -> Result<Vec<Cause>, StoreError> {
        let predicates = Filter::new()
            .where_eq("guiverId", guiver_id)
            .order_by(CREATED_AT, SortDirection::Desc)
            .build();
        self.causes.query(&predicates).await
    }

    async fn update(&self, mut cause: Cause) -> Result<Cause, StoreError> {
        cause.updated_at = next_timestamp(cause.updated_at);
        self.causes.update(&cause.id, &cause).await?;
        Ok(cause)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.causes.delete(id).await?;
        tracing::info!("Deleted cause {}", id);
        Ok(())
    }

    async fn list(&self, filter: &CauseFilter) -> Result<Page<Cause>, StoreError> {
        let predicates = filter.to_predicates();
        tracing::debug!("Listing causes with {:?}", predicates);
        let items = self.causes.query(&predicates).await?;
        let total = self.causes.count(&predicates).await?;
        Ok(Page { items, total })
    }

    async fn add_update(&self, cause_id: &str, mut update: Update) -> Result<Update, StoreError> {
        update.id = new_id();
        update.created_at = Utc::now();

        let mutations = [
            Mutation::Append {
                field: "updates".to_string(),
                value: serde_json::to_value(&update)?,
            },
            Self::touch()?,
        ];
        self.causes.mutate(cause_id, &mutations).await?;
        Ok(update)
    }

    async fn add_comment(&self, cause_id: &str, mut comment: Comment) -> Result<Comment, StoreError> {
        comment.id = new_id();
        comment.created_at = Utc::now();

        self.comments(cause_id).create(&comment.id, &comment).await?;
        Ok(comment)
    }

    async fn list_comments(&self, cause_id: &str, pagination: Pagination) -> Result<Page<Comment>, StoreError> {
        let comments = self.comments(cause_id);
        let predicates = pagination
            .apply(Filter::new().order_by(CREATED_AT, SortDirection::Desc))
            .build();
        let items = comments.query(&predicates).await?;
        let total = comments.count(&predicates).await?;
        Ok(Page { items, total })
    }

    async fn update_likes(&self, cause_id: &str, increment: bool) -> Result<u64, StoreError> {
        let mutations = [
            Mutation::Increment {
                field: "likes".to_string(),
                delta: if increment { 1 } else { -1 },
                floor: Some(0),
            },
            Self::touch()?,
        ];
        let cause = self.causes.mutate(cause_id, &mutations).await?;
        Ok(cause.likes)
    }
}
