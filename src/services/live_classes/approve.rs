//! Moderation: approval flips the flag, rejection deletes the record

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LiveClassService, forbidden, not_found, storage_failure};
use crate::models::{ApiResponse, ErrorCode, auth::entities::RequestContext};

pub async fn approve_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    id: i64,
) -> ActixResult<HttpResponse> {
    if !ctx.is_moderator() {
        return Ok(forbidden("Only admins and managers can approve live classes"));
    }

    let storage = service.get_storage(request);

    match storage.set_live_class_approval(id, true).await {
        Ok(Some(live_class)) => {
            info!("Live class {} approved by user {}", id, ctx.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                live_class,
                "Live class approved successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_failure(
            ErrorCode::LiveClassUpdateFailed,
            "Failed to approve live class",
            &e,
        )),
    }
}

pub async fn reject_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    id: i64,
) -> ActixResult<HttpResponse> {
    if !ctx.is_moderator() {
        return Ok(forbidden("Only admins and managers can reject live classes"));
    }

    let storage = service.get_storage(request);

    match storage.delete_live_class(id).await {
        Ok(Some(rejected)) => {
            info!(
                "Live class {} '{}' rejected and removed by user {}",
                id, rejected.title, ctx.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                rejected,
                "Live class rejected and removed",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_failure(
            ErrorCode::LiveClassDeleteFailed,
            "Failed to reject live class",
            &e,
        )),
    }
}
