use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{
    LiveClassService, access::can_mutate, forbidden, not_found, storage_failure,
    validation_failed,
};
use crate::models::{
    ApiResponse, ErrorCode, auth::entities::RequestContext,
    live_classes::requests::RecordedLinkRequest,
};
use crate::utils::validate::validate_recorded_link;

pub async fn attach_recorded_link(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    id: i64,
    data: RecordedLinkRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_recorded_link(&data.recorded_link) {
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
            "User {} denied recorded link on live class {} owned by {}",
            ctx.user_id, id, live_class.instructor_id
        );
        return Ok(forbidden(
            "You can only attach recordings to your own live classes",
        ));
    }

    match storage
        .set_live_class_recorded_link(id, data.recorded_link)
        .await
    {
        Ok(Some(updated)) => {
            info!("Recorded link attached to live class {} by user {}", id, ctx.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Recorded link attached successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(storage_failure(
            ErrorCode::LiveClassUpdateFailed,
            "Failed to attach recorded link",
            &e,
        )),
    }
}
