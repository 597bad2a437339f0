use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{LiveClassStatus, Platform};

// Create live class request
//
// # instructorId
// - instructors: optional, defaults to the caller; naming anyone else is rejected
// - admins/managers: optional, schedules on behalf of that instructor
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct CreateLiveClassRequest {
    pub title: String,
    pub course_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub duration: i32,
    pub platform: Platform,
    pub meeting_link: String,
    #[serde(default)]
    pub instructor_id: Option<i64>,
}

// Partial update; approval is not patchable here
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct UpdateLiveClassRequest {
    pub title: Option<String>,
    pub course_id: Option<i64>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub platform: Option<Platform>,
    pub meeting_link: Option<String>,
    pub recorded_link: Option<String>,
    pub status: Option<LiveClassStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct RecordedLinkRequest {
    pub recorded_link: String,
}

// Query string of the instructor and pending listings
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClassQueryParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<LiveClassStatus>,
    pub platform: Option<Platform>,
    pub is_approved: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct UpcomingQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct AllLiveClassesQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// Filters handed to the storage layer (normalized)
#[derive(Debug, Clone, Default)]
pub struct LiveClassListQuery {
    pub page: i64,
    pub limit: i64,
    pub instructor_id: Option<i64>,
    pub status: Option<LiveClassStatus>,
    pub platform: Option<Platform>,
    pub is_approved: Option<bool>,
    pub search: Option<String>,
}

/// Sort order of a filtered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveClassOrder {
    /// schedule descending
    Schedule,
    /// creation descending, schedule descending as tie-break
    Submission,
}
