use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{LiveClassService, access::can_view, not_found, storage_failure};
use crate::models::{ApiResponse, ErrorCode, auth::entities::RequestContext};

pub async fn get_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: Option<RequestContext>,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_live_class_by_id(id).await {
        Ok(Some(live_class)) if can_view(&live_class, ctx.as_ref()) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(live_class, "Live class retrieved successfully"))),
        // pending classes stay hidden from everyone but owner and moderators
        Ok(Some(_)) | Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_failure(
            ErrorCode::InternalServerError,
            "Failed to get live class",
            &e,
        )),
    }
}

pub async fn list_by_course(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: Option<RequestContext>,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let approved_only = !ctx.is_some_and(|c| c.is_moderator());
    debug!(
        "Listing live classes of course {} (approved only: {})",
        course_id, approved_only
    );

    match storage
        .list_live_classes_by_course(course_id, approved_only)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Course live classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(
            ErrorCode::InternalServerError,
            "Failed to list course live classes",
            &e,
        )),
    }
}
