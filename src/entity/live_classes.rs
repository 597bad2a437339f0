//! Live class entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "live_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub course_id: i64,
    pub instructor_id: i64,
    pub scheduled_at: i64,
    pub duration: i32,
    pub platform: String,
    #[sea_orm(column_type = "Text")]
    pub meeting_link: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub recorded_link: Option<String>,
    pub status: String,
    pub is_approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts to the business model; joins are attached by the storage layer
    pub fn into_live_class(self) -> crate::models::live_classes::entities::LiveClass {
        use crate::models::live_classes::entities::{LiveClass, LiveClassStatus, Platform};
        use chrono::{DateTime, Utc};

        LiveClass {
            id: self.id,
            title: self.title,
            course_id: self.course_id,
            instructor_id: self.instructor_id,
            scheduled_at: DateTime::<Utc>::from_timestamp(self.scheduled_at, 0)
                .unwrap_or_default(),
            duration: self.duration,
            platform: self.platform.parse::<Platform>().unwrap_or(Platform::Other),
            meeting_link: self.meeting_link,
            recorded_link: self.recorded_link,
            status: self
                .status
                .parse::<LiveClassStatus>()
                .unwrap_or(LiveClassStatus::Scheduled),
            is_approved: self.is_approved,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
            course: None,
            instructor: None,
        }
    }
}
