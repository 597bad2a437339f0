pub mod access;
pub mod approve;
pub mod create;
pub mod delete;
pub mod entitlement;
pub mod get;
pub mod list;
pub mod recorded_link;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::errors::LearnGrowError;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::entities::RequestContext,
    live_classes::requests::{
        AllLiveClassesQuery, CreateLiveClassRequest, LiveClassQueryParams, RecordedLinkRequest,
        UpcomingQuery, UpdateLiveClassRequest,
    },
};
use crate::storage::Storage;

pub struct LiveClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl LiveClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    /// Service bound to a storage instead of the request's app data
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_live_class(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        data: CreateLiveClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_live_class(self, request, ctx, data).await
    }

    pub async fn get_live_class(
        &self,
        request: &HttpRequest,
        ctx: Option<RequestContext>,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_live_class(self, request, ctx, id).await
    }

    pub async fn list_by_course(
        &self,
        request: &HttpRequest,
        ctx: Option<RequestContext>,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_by_course(self, request, ctx, course_id).await
    }

    pub async fn list_upcoming(
        &self,
        request: &HttpRequest,
        query: UpcomingQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_upcoming(self, request, query).await
    }

    pub async fn list_all(
        &self,
        request: &HttpRequest,
        ctx: Option<RequestContext>,
        query: AllLiveClassesQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_all(self, request, ctx, query).await
    }

    pub async fn list_my_classes(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        params: LiveClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_my_classes(self, request, ctx, params).await
    }

    pub async fn list_pending(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        params: LiveClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_pending(self, request, ctx, params).await
    }

    pub async fn update_live_class(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        id: i64,
        data: UpdateLiveClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_live_class(self, request, ctx, id, data).await
    }

    pub async fn delete_live_class(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_live_class(self, request, ctx, id).await
    }

    pub async fn approve_live_class(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::approve_live_class(self, request, ctx, id).await
    }

    pub async fn reject_live_class(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::reject_live_class(self, request, ctx, id).await
    }

    pub async fn attach_recorded_link(
        &self,
        request: &HttpRequest,
        ctx: RequestContext,
        id: i64,
        data: RecordedLinkRequest,
    ) -> ActixResult<HttpResponse> {
        recorded_link::attach_recorded_link(self, request, ctx, id, data).await
    }
}

pub(super) fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::LiveClassNotFound,
        "Live class not found",
    ))
}

pub(super) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::LiveClassPermissionDenied,
        message,
    ))
}

pub(super) fn validation_failed(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

/// 500 envelope carrying the store's message in `error`
pub(super) fn storage_failure(code: ErrorCode, message: &str, err: &LearnGrowError) -> HttpResponse {
    error!("{}: {}", message, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_with_detail(code, message, err))
}
