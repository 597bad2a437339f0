use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LiveClassService, forbidden, storage_failure, validation_failed};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::entities::RequestContext,
    live_classes::requests::CreateLiveClassRequest,
    users::entities::UserRole,
};
use crate::storage::Storage;
use crate::utils::validate::validate_create_request;

pub async fn create_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    data: CreateLiveClassRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_create_request(&data) {
        return Ok(validation_failed(msg));
    }

    let storage = service.get_storage(request);

    let instructor_id = match resolve_instructor(&ctx, data.instructor_id, &storage).await {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage.create_live_class(instructor_id, data).await {
        Ok(live_class) => {
            info!(
                "Live class {} '{}' scheduled by user {} for instructor {}",
                live_class.id, live_class.title, ctx.user_id, instructor_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                live_class,
                "Live class created and pending approval",
            )))
        }
        Err(e) => Ok(storage_failure(
            ErrorCode::LiveClassCreationFailed,
            "Failed to create live class",
            &e,
        )),
    }
}

/// Instructor the class is scheduled for.
///
/// Moderators may name any user holding the instructor role; everyone else
/// may only name themselves.
async fn resolve_instructor(
    ctx: &RequestContext,
    requested: Option<i64>,
    storage: &Arc<dyn Storage>,
) -> Result<i64, HttpResponse> {
    let Some(instructor_id) = requested.filter(|id| *id != ctx.user_id) else {
        return Ok(ctx.user_id);
    };

    if !ctx.is_moderator() {
        info!(
            "User {} tried to schedule a live class for instructor {}",
            ctx.user_id, instructor_id
        );
        return Err(forbidden(
            "Instructors can only schedule live classes for themselves",
        ));
    }

    match storage.get_user_by_id(instructor_id).await {
        Ok(Some(user)) if user.role == UserRole::Instructor => Ok(user.id),
        Ok(Some(_)) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserRoleInvalid,
            "Live classes can only be scheduled for instructors",
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Instructor not found",
        ))),
        Err(e) => Err(storage_failure(
            ErrorCode::InternalServerError,
            "Failed to load instructor",
            &e,
        )),
    }
}
