//! Live class storage operations

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::live_classes::{ActiveModel, Column, Entity as LiveClasses, Model};
use crate::entity::{courses, users};
use crate::errors::{LearnGrowError, Result};
use crate::models::{
    PaginationInfo,
    live_classes::{
        entities::{LiveClass, LiveClassCourse, LiveClassInstructor, LiveClassStatus},
        requests::{
            CreateLiveClassRequest, LiveClassListQuery, LiveClassOrder, UpdateLiveClassRequest,
        },
        responses::{LiveClassListResponse, LiveClassWindow},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

fn db_err(action: &str) -> impl FnOnce(sea_orm::DbErr) -> LearnGrowError + '_ {
    move |e| LearnGrowError::database_operation(format!("Failed to {action}: {e}"))
}

impl SeaOrmStorage {
    pub async fn create_live_class_impl(
        &self,
        instructor_id: i64,
        req: CreateLiveClassRequest,
    ) -> Result<LiveClass> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title.trim().to_string()),
            course_id: Set(req.course_id),
            instructor_id: Set(instructor_id),
            scheduled_at: Set(req.scheduled_at.timestamp()),
            duration: Set(req.duration),
            platform: Set(req.platform.as_str().to_string()),
            meeting_link: Set(req.meeting_link.trim().to_string()),
            recorded_link: Set(None),
            status: Set(LiveClassStatus::Scheduled.as_str().to_string()),
            is_approved: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("create live class"))?;

        self.attach_one(result).await
    }

    pub async fn get_live_class_by_id_impl(&self, id: i64) -> Result<Option<LiveClass>> {
        let result = LiveClasses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("query live class"))?;

        match result {
            Some(model) => Ok(Some(self.attach_one(model).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_live_classes_by_instructor_impl(
        &self,
        instructor_id: i64,
        mut query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse> {
        query.instructor_id = Some(instructor_id);
        self.list_filtered(query, LiveClassOrder::Schedule).await
    }

    /// Moderation queue; without an explicit flag only unapproved classes
    pub async fn list_pending_live_classes_impl(
        &self,
        mut query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse> {
        query.is_approved = Some(query.is_approved.unwrap_or(false));
        self.list_filtered(query, LiveClassOrder::Submission).await
    }

    pub async fn list_live_classes_by_course_impl(
        &self,
        course_id: i64,
        approved_only: bool,
    ) -> Result<Vec<LiveClass>> {
        let mut select = LiveClasses::find().filter(Column::CourseId.eq(course_id));
        if approved_only {
            select = select.filter(Column::IsApproved.eq(true));
        }

        let models = select
            .order_by_desc(Column::ScheduledAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err("list course live classes"))?;

        self.attach_joins(models).await
    }

    pub async fn list_upcoming_live_classes_impl(&self, limit: i64) -> Result<Vec<LiveClass>> {
        let now = chrono::Utc::now().timestamp();

        let models = LiveClasses::find()
            .filter(Column::Status.eq(LiveClassStatus::Scheduled.as_str()))
            .filter(Column::ScheduledAt.gte(now))
            .filter(Column::IsApproved.eq(true))
            .order_by_asc(Column::ScheduledAt)
            .order_by_asc(Column::Id)
            .limit(limit.max(1) as u64)
            .all(&self.db)
            .await
            .map_err(db_err("list upcoming live classes"))?;

        self.attach_joins(models).await
    }

    /// Approved classes in schedule-descending order, windowed by offset
    pub async fn list_approved_live_classes_impl(
        &self,
        skip: i64,
        limit: i64,
        course_ids: Option<Vec<i64>>,
    ) -> Result<LiveClassWindow> {
        let mut select = LiveClasses::find().filter(Column::IsApproved.eq(true));
        if let Some(ids) = course_ids {
            if ids.is_empty() {
                return Ok(LiveClassWindow::empty());
            }
            select = select.filter(Column::CourseId.is_in(ids));
        }

        let total = select
            .clone()
            .count(&self.db)
            .await
            .map_err(db_err("count live classes"))?;

        let models = select
            .order_by_desc(Column::ScheduledAt)
            .order_by_desc(Column::Id)
            .offset(skip.max(0) as u64)
            .limit(limit.max(1) as u64)
            .all(&self.db)
            .await
            .map_err(db_err("list live classes"))?;

        Ok(LiveClassWindow {
            items: self.attach_joins(models).await?,
            total: total as i64,
        })
    }

    pub async fn update_live_class_impl(
        &self,
        id: i64,
        update: UpdateLiveClassRequest,
    ) -> Result<Option<LiveClass>> {
        if self.find_model(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(scheduled_at) = update.scheduled_at {
            model.scheduled_at = Set(scheduled_at.timestamp());
        }
        if let Some(duration) = update.duration {
            model.duration = Set(duration);
        }
        if let Some(platform) = update.platform {
            model.platform = Set(platform.as_str().to_string());
        }
        if let Some(meeting_link) = update.meeting_link {
            model.meeting_link = Set(meeting_link.trim().to_string());
        }
        if let Some(recorded_link) = update.recorded_link {
            model.recorded_link = Set(Some(recorded_link.trim().to_string()));
        }
        if let Some(status) = update.status {
            model.status = Set(status.as_str().to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("update live class"))?;

        self.get_live_class_by_id_impl(id).await
    }

    pub async fn set_live_class_approval_impl(
        &self,
        id: i64,
        approved: bool,
    ) -> Result<Option<LiveClass>> {
        if self.find_model(id).await?.is_none() {
            return Ok(None);
        }

        ActiveModel {
            id: Set(id),
            is_approved: Set(approved),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("update live class approval"))?;

        self.get_live_class_by_id_impl(id).await
    }

    pub async fn set_live_class_recorded_link_impl(
        &self,
        id: i64,
        recorded_link: String,
    ) -> Result<Option<LiveClass>> {
        if self.find_model(id).await?.is_none() {
            return Ok(None);
        }

        ActiveModel {
            id: Set(id),
            recorded_link: Set(Some(recorded_link.trim().to_string())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("attach recorded link"))?;

        self.get_live_class_by_id_impl(id).await
    }

    /// Hard delete; the removed record is returned with its joins
    pub async fn delete_live_class_impl(&self, id: i64) -> Result<Option<LiveClass>> {
        let Some(existing) = self.get_live_class_by_id_impl(id).await? else {
            return Ok(None);
        };

        LiveClasses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("delete live class"))?;

        Ok(Some(existing))
    }

    async fn find_model(&self, id: i64) -> Result<Option<Model>> {
        LiveClasses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("query live class"))
    }

    async fn list_filtered(
        &self,
        query: LiveClassListQuery,
        order: LiveClassOrder,
    ) -> Result<LiveClassListResponse> {
        let page = query.page.max(1);
        let limit = query.limit.max(1);

        let mut select = Self::apply_filters(LiveClasses::find(), &query);
        select = match order {
            LiveClassOrder::Schedule => select.order_by_desc(Column::ScheduledAt),
            LiveClassOrder::Submission => select
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::ScheduledAt),
        };
        select = select.order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, limit as u64);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("count live classes"))?;
        let models = paginator
            .fetch_page((page - 1) as u64)
            .await
            .map_err(db_err("list live classes"))?;

        Ok(LiveClassListResponse {
            items: self.attach_joins(models).await?,
            pagination: PaginationInfo::new(total as i64, page, limit),
        })
    }

    fn apply_filters(mut select: Select<LiveClasses>, query: &LiveClassListQuery) -> Select<LiveClasses> {
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(platform) = query.platform {
            select = select.filter(Column::Platform.eq(platform.as_str()));
        }
        if let Some(is_approved) = query.is_approved {
            select = select.filter(Column::IsApproved.eq(is_approved));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            use sea_orm::sea_query::ExprTrait;

            // case-insensitive on every backend
            let pattern = format!("%{}%", escape_like_pattern(&search.trim().to_lowercase()));
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((LiveClasses, Column::Title))))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        select
    }

    async fn attach_one(&self, model: Model) -> Result<LiveClass> {
        let mut joined = self.attach_joins(vec![model]).await?;
        joined
            .pop()
            .ok_or_else(|| LearnGrowError::database_operation("Live class join produced no row"))
    }

    /// Resolves course titles and instructor contacts in two batched queries
    async fn attach_joins(&self, models: Vec<Model>) -> Result<Vec<LiveClass>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: HashSet<i64> = models.iter().map(|m| m.course_id).collect();
        let instructor_ids: HashSet<i64> = models.iter().map(|m| m.instructor_id).collect();

        let course_map: HashMap<i64, LiveClassCourse> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(db_err("query courses"))?
            .into_iter()
            .map(|c| {
                (
                    c.id,
                    LiveClassCourse {
                        id: c.id,
                        title: c.title,
                    },
                )
            })
            .collect();

        let instructor_map: HashMap<i64, LiveClassInstructor> = users::Entity::find()
            .filter(users::Column::Id.is_in(instructor_ids))
            .all(&self.db)
            .await
            .map_err(db_err("query instructors"))?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    LiveClassInstructor {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    },
                )
            })
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let course = course_map.get(&m.course_id).cloned();
                let instructor = instructor_map.get(&m.instructor_id).cloned();
                let mut live_class = m.into_live_class();
                live_class.course = course;
                live_class.instructor = instructor;
                live_class
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::models::live_classes::entities::Platform;
    use chrono::{Duration, Utc};

    struct Seeded {
        storage: SeaOrmStorage,
        instructor: i64,
        other_instructor: i64,
        course: i64,
        other_course: i64,
    }

    async fn setup() -> Seeded {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let instructor =
            fixtures::seed_user(&storage, "Ines Tutor", "ines@example.com", "instructor").await;
        let other_instructor =
            fixtures::seed_user(&storage, "Omar Tutor", "omar@example.com", "instructor").await;
        let course = fixtures::seed_course(&storage, "Algebra I").await;
        let other_course = fixtures::seed_course(&storage, "Biology").await;
        Seeded {
            storage,
            instructor,
            other_instructor,
            course,
            other_course,
        }
    }

    fn request(title: &str, course_id: i64, in_hours: i64) -> CreateLiveClassRequest {
        CreateLiveClassRequest {
            title: title.to_string(),
            course_id,
            scheduled_at: Utc::now() + Duration::hours(in_hours),
            duration: 60,
            platform: Platform::Zoom,
            meeting_link: "https://zoom.us/j/123".to_string(),
            instructor_id: None,
        }
    }

    fn query(page: i64, limit: i64) -> LiveClassListQuery {
        LiveClassListQuery {
            page,
            limit,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_sets_defaults_and_joins() {
        let s = setup().await;
        let created = s
            .storage
            .create_live_class_impl(s.instructor, request("  Fractions  ", s.course, 24))
            .await
            .unwrap();

        assert_eq!(created.title, "Fractions");
        assert_eq!(created.status, LiveClassStatus::Scheduled);
        assert!(!created.is_approved);
        assert!(created.recorded_link.is_none());
        assert_eq!(created.course.as_ref().unwrap().title, "Algebra I");
        assert_eq!(created.instructor.as_ref().unwrap().email, "ines@example.com");

        let fetched = s
            .storage
            .get_live_class_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, created.id);
        assert!(s.storage.get_live_class_by_id_impl(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_course_leaves_join_empty() {
        let s = setup().await;
        let created = s
            .storage
            .create_live_class_impl(s.instructor, request("Orphan", 4242, 1))
            .await
            .unwrap();
        assert!(created.course.is_none());
        assert!(created.instructor.is_some());
    }

    #[tokio::test]
    async fn test_instructor_listing_filters_and_pages() {
        let s = setup().await;
        for i in 0..3 {
            s.storage
                .create_live_class_impl(s.instructor, request(&format!("Algebra {i}"), s.course, i + 1))
                .await
                .unwrap();
        }
        s.storage
            .create_live_class_impl(s.other_instructor, request("Algebra other", s.course, 1))
            .await
            .unwrap();

        let page = s
            .storage
            .list_live_classes_by_instructor_impl(s.instructor, query(1, 2))
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        // schedule descending
        assert_eq!(page.items[0].title, "Algebra 2");
        assert!(page.items.iter().all(|c| c.instructor_id == s.instructor));

        let mut filtered = query(1, 10);
        filtered.search = Some("ALGEBRA 1".to_string());
        let found = s
            .storage
            .list_live_classes_by_instructor_impl(s.instructor, filtered)
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].title, "Algebra 1");

        let mut wildcard = query(1, 10);
        wildcard.search = Some("%".to_string());
        let none = s
            .storage
            .list_live_classes_by_instructor_impl(s.instructor, wildcard)
            .await
            .unwrap();
        assert_eq!(none.pagination.total, 0);
        assert_eq!(none.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_upcoming_only_approved_future_scheduled() {
        let s = setup().await;
        let later = s
            .storage
            .create_live_class_impl(s.instructor, request("Later", s.course, 48))
            .await
            .unwrap();
        let sooner = s
            .storage
            .create_live_class_impl(s.instructor, request("Sooner", s.course, 2))
            .await
            .unwrap();
        let past = s
            .storage
            .create_live_class_impl(s.instructor, request("Past", s.course, -2))
            .await
            .unwrap();
        s.storage
            .create_live_class_impl(s.instructor, request("Pending", s.course, 3))
            .await
            .unwrap();

        for id in [later.id, sooner.id, past.id] {
            s.storage.set_live_class_approval_impl(id, true).await.unwrap();
        }

        let upcoming = s.storage.list_upcoming_live_classes_impl(10).await.unwrap();
        let titles: Vec<_> = upcoming.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);

        let cancelled = UpdateLiveClassRequest {
            status: Some(LiveClassStatus::Cancelled),
            ..Default::default()
        };
        s.storage.update_live_class_impl(sooner.id, cancelled).await.unwrap();
        let upcoming = s.storage.list_upcoming_live_classes_impl(1).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Later");
    }

    #[tokio::test]
    async fn test_approved_window_with_course_filter() {
        let s = setup().await;
        let a = s
            .storage
            .create_live_class_impl(s.instructor, request("A", s.course, 1))
            .await
            .unwrap();
        let b = s
            .storage
            .create_live_class_impl(s.instructor, request("B", s.other_course, 2))
            .await
            .unwrap();
        s.storage
            .create_live_class_impl(s.instructor, request("C", s.course, 3))
            .await
            .unwrap();
        s.storage.set_live_class_approval_impl(a.id, true).await.unwrap();
        s.storage.set_live_class_approval_impl(b.id, true).await.unwrap();

        let all = s.storage.list_approved_live_classes_impl(0, 10, None).await.unwrap();
        assert_eq!(all.total, 2);
        assert_eq!(all.items[0].title, "B");

        let scoped = s
            .storage
            .list_approved_live_classes_impl(0, 10, Some(vec![s.course]))
            .await
            .unwrap();
        assert_eq!(scoped.total, 1);
        assert_eq!(scoped.items[0].id, a.id);

        let empty = s
            .storage
            .list_approved_live_classes_impl(0, 10, Some(vec![]))
            .await
            .unwrap();
        assert_eq!(empty.total, 0);

        let skipped = s.storage.list_approved_live_classes_impl(1, 10, None).await.unwrap();
        assert_eq!(skipped.total, 2);
        assert_eq!(skipped.items.len(), 1);
        assert_eq!(skipped.items[0].title, "A");
    }

    #[tokio::test]
    async fn test_pending_defaults_to_unapproved() {
        let s = setup().await;
        let first = s
            .storage
            .create_live_class_impl(s.instructor, request("First", s.course, 1))
            .await
            .unwrap();
        s.storage
            .create_live_class_impl(s.other_instructor, request("Second", s.course, 2))
            .await
            .unwrap();
        s.storage.set_live_class_approval_impl(first.id, true).await.unwrap();

        let pending = s.storage.list_pending_live_classes_impl(query(1, 10)).await.unwrap();
        assert_eq!(pending.pagination.total, 1);
        assert_eq!(pending.items[0].title, "Second");

        let mut approved = query(1, 10);
        approved.is_approved = Some(true);
        let approved = s.storage.list_pending_live_classes_impl(approved).await.unwrap();
        assert_eq!(approved.items.len(), 1);
        assert_eq!(approved.items[0].id, first.id);
    }

    #[tokio::test]
    async fn test_update_recorded_link_and_delete() {
        let s = setup().await;
        let created = s
            .storage
            .create_live_class_impl(s.instructor, request("Geometry", s.course, 1))
            .await
            .unwrap();

        let update = UpdateLiveClassRequest {
            title: Some("Geometry II".to_string()),
            duration: Some(90),
            platform: Some(Platform::Meet),
            ..Default::default()
        };
        let updated = s
            .storage
            .update_live_class_impl(created.id, update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Geometry II");
        assert_eq!(updated.duration, 90);
        assert_eq!(updated.platform, Platform::Meet);
        assert_eq!(updated.meeting_link, created.meeting_link);

        let linked = s
            .storage
            .set_live_class_recorded_link_impl(created.id, "https://cdn.example.com/rec.mp4".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            linked.recorded_link.as_deref(),
            Some("https://cdn.example.com/rec.mp4")
        );

        assert!(
            s.storage
                .update_live_class_impl(9999, UpdateLiveClassRequest::default())
                .await
                .unwrap()
                .is_none()
        );

        let deleted = s.storage.delete_live_class_impl(created.id).await.unwrap().unwrap();
        assert_eq!(deleted.title, "Geometry II");
        assert!(s.storage.get_live_class_by_id_impl(created.id).await.unwrap().is_none());
        assert!(s.storage.delete_live_class_impl(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_by_course_respects_approval() {
        let s = setup().await;
        let a = s
            .storage
            .create_live_class_impl(s.instructor, request("A", s.course, 1))
            .await
            .unwrap();
        s.storage
            .create_live_class_impl(s.instructor, request("B", s.course, 2))
            .await
            .unwrap();
        s.storage.set_live_class_approval_impl(a.id, true).await.unwrap();

        let all = s.storage.list_live_classes_by_course_impl(s.course, false).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "B");

        let approved = s.storage.list_live_classes_by_course_impl(s.course, true).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, a.id);
    }
}
