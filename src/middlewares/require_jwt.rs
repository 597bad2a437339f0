/*!
 * Bearer token authentication
 *
 * Verifies `Authorization: Bearer <JWT>` access tokens issued by the platform
 * auth service, loads the account (through the object cache) and stores it in
 * the request extensions. Handlers then take a typed `RequestContext`.
 *
 * ```rust,ignore
 * web::scope("/api/v1/live-classes")
 *     .service(
 *         web::resource("/create")
 *             .wrap(RequireJWT::new())
 *             .route(web::post().to(create_live_class)),
 *     )
 *     .service(
 *         web::resource("/all")
 *             .wrap(RequireJWT::optional())
 *             .route(web::get().to(list_all_live_classes)),
 *     )
 * ```
 *
 * In required mode a missing, invalid or expired token, an unknown user or
 * an inactive account yields 401. In optional mode the request continues
 * anonymously instead.
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{self, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone, Default)]
pub struct RequireJWT {
    optional: bool,
}

impl RequireJWT {
    /// Rejects unauthenticated requests with 401
    pub fn new() -> Self {
        Self { optional: false }
    }

    /// Attaches the user when a valid token is present, otherwise continues
    pub fn optional() -> Self {
        Self { optional: true }
    }
}

enum AuthFailure {
    MissingToken,
    Rejected(String),
}

pub(crate) fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<entities::User, AuthFailure> {
    let token = bearer_token(req).ok_or(AuthFailure::MissingToken)?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Rejected("Invalid JWT token".to_string())
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());
    let cache_key = format!("user:{token}");

    if let Some(ref cache) = cache {
        match cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
                Ok(user) => return Ok(user),
                Err(_) => {
                    cache.remove(&cache_key).await;
                    debug!("Dropped undecodable cached user entry");
                }
            },
            _ => debug!("User not cached for presented token"),
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not registered in app data");
            AuthFailure::Rejected("Authentication backend unavailable".to_string())
        })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Rejected("Invalid user ID in JWT".to_string()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            AuthFailure::Rejected("Failed to retrieve user".to_string())
        })?
        .ok_or_else(|| AuthFailure::Rejected("User not found".to_string()))?;

    if user.status != entities::UserStatus::Active {
        return Err(AuthFailure::Rejected("User is not active".to_string()));
    }

    if let Some(cache) = cache
        && let Ok(user_json) = serde_json::to_string(&user)
    {
        cache
            .insert_raw(cache_key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            optional: self.optional,
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
    optional: bool,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let optional = self.optional;
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) if optional => {
                    if let AuthFailure::Rejected(reason) = failure {
                        debug!("Continuing anonymously on {}: {}", req.path(), reason);
                    }
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(failure) => {
                    let reason = match failure {
                        AuthFailure::MissingToken => {
                            "Missing or invalid Authorization header".to_string()
                        }
                        AuthFailure::Rejected(reason) => reason,
                    };
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        reason
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {reason}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// Authenticated user id, when a JWT middleware ran and accepted the token
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<entities::User>().map(|user| user.role)
    }
}
