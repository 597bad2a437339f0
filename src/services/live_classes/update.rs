use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    LiveClassService, access::can_mutate, forbidden, not_found, storage_failure,
    validation_failed,
};
use crate::models::{
    ApiResponse, ErrorCode, auth::entities::RequestContext,
    live_classes::requests::UpdateLiveClassRequest,
};
use crate::utils::validate::validate_update_request;

pub async fn update_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    id: i64,
    data: UpdateLiveClassRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_update_request(&data) {
        return Ok(validation_failed(msg));
    }

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
            "User {} denied update of live class {} owned by {}",
            ctx.user_id, id, live_class.instructor_id
        );
        return Ok(forbidden("You can only update your own live classes"));
    }

    match storage.update_live_class(id, data).await {
        Ok(Some(updated)) => {
            info!("Live class {} updated by user {}", id, ctx.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Live class updated successfully",
            )))
        }
        // deleted between load and write
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_failure(
            ErrorCode::LiveClassUpdateFailed,
            "Failed to update live class",
            &e,
        )),
    }
}
