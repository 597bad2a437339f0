use std::sync::Arc;

use crate::models::{
    live_classes::{
        entities::LiveClass,
        requests::{CreateLiveClassRequest, LiveClassListQuery, UpdateLiveClassRequest},
        responses::{LiveClassListResponse, LiveClassWindow},
    },
    orders::entities::Order,
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// Repository interface; every live class returned has its course and
/// instructor joins resolved.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Users (read only)
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Orders (read only)
    // approved, active orders of a user
    async fn list_active_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>>;

    /// Live classes
    // insert with status Scheduled and approval pending
    async fn create_live_class(
        &self,
        instructor_id: i64,
        req: CreateLiveClassRequest,
    ) -> Result<LiveClass>;
    async fn get_live_class_by_id(&self, id: i64) -> Result<Option<LiveClass>>;
    // filtered page of one instructor's classes, schedule descending
    async fn list_live_classes_by_instructor(
        &self,
        instructor_id: i64,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse>;
    // every class of a course, schedule descending
    async fn list_live_classes_by_course(
        &self,
        course_id: i64,
        approved_only: bool,
    ) -> Result<Vec<LiveClass>>;
    // approved, scheduled, not yet started; soonest first
    async fn list_upcoming_live_classes(&self, limit: i64) -> Result<Vec<LiveClass>>;
    // approved classes, optionally restricted to a course set
    async fn list_approved_live_classes(
        &self,
        skip: i64,
        limit: i64,
        course_ids: Option<Vec<i64>>,
    ) -> Result<LiveClassWindow>;
    // moderation queue, newest submissions first
    async fn list_pending_live_classes(
        &self,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse>;
    async fn update_live_class(
        &self,
        id: i64,
        update: UpdateLiveClassRequest,
    ) -> Result<Option<LiveClass>>;
    async fn set_live_class_approval(&self, id: i64, approved: bool) -> Result<Option<LiveClass>>;
    async fn set_live_class_recorded_link(
        &self,
        id: i64,
        recorded_link: String,
    ) -> Result<Option<LiveClass>>;
    // hard delete, returning the removed record
    async fn delete_live_class(&self, id: i64) -> Result<Option<LiveClass>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
