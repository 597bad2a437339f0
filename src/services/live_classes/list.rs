use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{
    LiveClassService,
    entitlement::{CourseAccess, resolve_course_access},
    storage_failure,
};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode, OffsetPaginationInfo, Pagination,
    auth::entities::RequestContext,
    common::pagination::{clamp_limit, normalize_limit, normalize_page, normalize_skip},
    live_classes::{
        requests::{AllLiveClassesQuery, LiveClassListQuery, LiveClassQueryParams, UpcomingQuery},
        responses::{LiveClassListResponse, LiveClassWindow},
    },
};

fn max_page_size() -> i64 {
    AppConfig::get().live_class.max_page_size as i64
}

fn to_list_query(params: LiveClassQueryParams) -> LiveClassListQuery {
    LiveClassListQuery {
        page: normalize_page(params.page),
        limit: normalize_limit(params.limit, max_page_size()),
        instructor_id: None,
        status: params.status,
        platform: params.platform,
        is_approved: params.is_approved,
        search: params.search,
    }
}

fn paged_response(page: LiveClassListResponse, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::paginated(
        page.items,
        Pagination::Paged(page.pagination),
        message,
    ))
}

pub async fn list_upcoming(
    service: &LiveClassService,
    request: &HttpRequest,
    query: UpcomingQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let default_limit = AppConfig::get().live_class.upcoming_default_limit as i64;
    let limit = clamp_limit(query.limit.unwrap_or(default_limit), max_page_size());

    match storage.list_upcoming_live_classes(limit).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Upcoming live classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(
            ErrorCode::InternalServerError,
            "Failed to list upcoming live classes",
            &e,
        )),
    }
}

/// Approved classes; students only see the courses their orders cover
pub async fn list_all(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: Option<RequestContext>,
    query: AllLiveClassesQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let skip = normalize_skip(query.skip);
    let limit = normalize_limit(query.limit, max_page_size());

    let access = match ctx {
        Some(ctx) if ctx.is_student() => {
            let orders = match storage.list_active_orders_for_user(ctx.user_id).await {
                Ok(orders) => orders,
                Err(e) => {
                    return Ok(storage_failure(
                        ErrorCode::InternalServerError,
                        "Failed to resolve course access",
                        &e,
                    ));
                }
            };
            let access = resolve_course_access(
                &orders,
                chrono::Utc::now(),
                AppConfig::get().entitlement.enforce_quarterly_expiry,
            );
            debug!("Course access of student {}: {:?}", ctx.user_id, access);
            access
        }
        _ => CourseAccess::All,
    };

    let window = if access.is_empty() {
        LiveClassWindow::empty()
    } else {
        match storage
            .list_approved_live_classes(skip, limit, access.course_filter())
            .await
        {
            Ok(window) => window,
            Err(e) => {
                return Ok(storage_failure(
                    ErrorCode::InternalServerError,
                    "Failed to list live classes",
                    &e,
                ));
            }
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        window.items,
        Pagination::Offset(OffsetPaginationInfo::new(window.total, skip, limit)),
        "Live classes retrieved successfully",
    )))
}

pub async fn list_my_classes(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    params: LiveClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_live_classes_by_instructor(ctx.user_id, to_list_query(params))
        .await
    {
        Ok(page) => Ok(paged_response(page, "Instructor live classes retrieved successfully")),
        Err(e) => Ok(storage_failure(
            ErrorCode::InternalServerError,
            "Failed to list instructor live classes",
            &e,
        )),
    }
}

pub async fn list_pending(
    service: &LiveClassService,
    request: &HttpRequest,
    ctx: RequestContext,
    params: LiveClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    debug!("Moderator {} listing the approval queue", ctx.user_id);

    match storage.list_pending_live_classes(to_list_query(params)).await {
        Ok(page) => Ok(paged_response(page, "Pending live classes retrieved successfully")),
        Err(e) => Ok(storage_failure(
            ErrorCode::InternalServerError,
            "Failed to list pending live classes",
            &e,
        )),
    }
}
