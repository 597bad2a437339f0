use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{LiveClassService, access::can_mutate, forbidden, not_found, storage_failure};
use crate::models::{ApiResponse, ErrorCode, auth::entities::RequestContext};

pub async fn delete_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let live_class = match storage.get_live_class_by_id(id).await {
        Ok(Some(live_class)) => live_class,
        Ok(None) => return Ok(not_found()),
        Err(e) => {
            return Ok(storage_failure(
                ErrorCode::InternalServerError,
                "Failed to get live class",
                &e,
            ));
        }
    };

    if !can_mutate(&live_class, &ctx) {
        info!(
            "User {} denied deletion of live class {} owned by {}",
            ctx.user_id, id, live_class.instructor_id
        );
        return Ok(forbidden("You can only delete your own live classes"));
    }

    match storage.delete_live_class(id).await {
        Ok(Some(deleted)) => {
            info!("Live class {} deleted by user {}", id, ctx.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                deleted,
                "Live class deleted successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_failure(
            ErrorCode::LiveClassDeleteFailed,
            "Failed to delete live class",
            &e,
        )),
    }
}
