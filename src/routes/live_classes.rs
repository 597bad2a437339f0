use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::{
    auth::entities::RequestContext,
    live_classes::requests::{
        AllLiveClassesQuery, CreateLiveClassRequest, LiveClassQueryParams, RecordedLinkRequest,
        UpcomingQuery, UpdateLiveClassRequest,
    },
    users::entities::UserRole,
};
use crate::services::LiveClassService;
use crate::utils::{SafeCourseIdI64, SafeIDI64};

static LIVE_CLASS_SERVICE: Lazy<LiveClassService> = Lazy::new(LiveClassService::new_lazy);

pub async fn list_upcoming_live_classes(
    req: HttpRequest,
    query: web::Query<UpcomingQuery>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .list_upcoming(&req, query.into_inner())
        .await
}

pub async fn list_all_live_classes(
    req: HttpRequest,
    ctx: Option<RequestContext>,
    query: web::Query<AllLiveClassesQuery>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .list_all(&req, ctx, query.into_inner())
        .await
}

pub async fn list_pending_live_classes(
    req: HttpRequest,
    ctx: RequestContext,
    query: web::Query<LiveClassQueryParams>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .list_pending(&req, ctx, query.into_inner())
        .await
}

pub async fn create_live_class(
    req: HttpRequest,
    ctx: RequestContext,
    body: web::Json<CreateLiveClassRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .create_live_class(&req, ctx, body.into_inner())
        .await
}

pub async fn list_my_live_classes(
    req: HttpRequest,
    ctx: RequestContext,
    query: web::Query<LiveClassQueryParams>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .list_my_classes(&req, ctx, query.into_inner())
        .await
}

pub async fn approve_live_class(
    req: HttpRequest,
    ctx: RequestContext,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE.approve_live_class(&req, ctx, id.0).await
}

pub async fn reject_live_class(
    req: HttpRequest,
    ctx: RequestContext,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE.reject_live_class(&req, ctx, id.0).await
}

pub async fn attach_recorded_link(
    req: HttpRequest,
    ctx: RequestContext,
    id: SafeIDI64,
    body: web::Json<RecordedLinkRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .attach_recorded_link(&req, ctx, id.0, body.into_inner())
        .await
}

pub async fn get_live_class(
    req: HttpRequest,
    ctx: Option<RequestContext>,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE.get_live_class(&req, ctx, id.0).await
}

pub async fn update_live_class(
    req: HttpRequest,
    ctx: RequestContext,
    id: SafeIDI64,
    body: web::Json<UpdateLiveClassRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .update_live_class(&req, ctx, id.0, body.into_inner())
        .await
}

pub async fn delete_live_class(
    req: HttpRequest,
    ctx: RequestContext,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE.delete_live_class(&req, ctx, id.0).await
}

pub async fn list_course_live_classes(
    req: HttpRequest,
    ctx: Option<RequestContext>,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE.list_by_course(&req, ctx, course_id.0).await
}

// Literal paths are registered ahead of `/{id}`
pub fn configure_live_class_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/live-classes")
            .wrap(RateLimit::api())
            .service(web::resource("/upcoming").route(web::get().to(list_upcoming_live_classes)))
            .service(
                web::resource("/all")
                    .wrap(RequireJWT::optional())
                    .route(web::get().to(list_all_live_classes)),
            )
            .service(
                web::resource("/admin/pending")
                    .wrap(RequireJWT::new())
                    .route(
                        web::get()
                            .to(list_pending_live_classes)
                            .wrap(RequireRole::new_any(UserRole::moderator_roles())),
                    ),
            )
            .service(
                web::resource("/create").wrap(RequireJWT::new()).route(
                    web::post()
                        .to(create_live_class)
                        .wrap(RequireRole::new_any(UserRole::instructor_roles())),
                ),
            )
            .service(
                web::resource("/instructor/my-classes")
                    .wrap(RequireJWT::new())
                    .route(
                        web::get()
                            .to(list_my_live_classes)
                            .wrap(RequireRole::new_any(UserRole::instructor_roles())),
                    ),
            )
            .service(
                web::resource("/course/{courseId}")
                    .wrap(RequireJWT::optional())
                    .route(web::get().to(list_course_live_classes)),
            )
            .service(
                web::resource("/{id}/approve").wrap(RequireJWT::new()).route(
                    web::patch()
                        .to(approve_live_class)
                        .wrap(RequireRole::new_any(UserRole::moderator_roles())),
                ),
            )
            .service(
                web::resource("/{id}/reject").wrap(RequireJWT::new()).route(
                    web::patch()
                        .to(reject_live_class)
                        .wrap(RequireRole::new_any(UserRole::moderator_roles())),
                ),
            )
            .service(
                // ownership is checked per record
                web::resource("/{id}/recorded-link")
                    .wrap(RequireJWT::new())
                    .route(web::patch().to(attach_recorded_link)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_live_class).wrap(RequireJWT::optional()))
                    .route(web::patch().to(update_live_class).wrap(RequireJWT::new()))
                    .route(web::delete().to(delete_live_class).wrap(RequireJWT::new())),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ObjectCache, object_cache::moka::MokaCacheWrapper};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage, sea_orm_storage::fixtures};
    use crate::utils::jwt::JwtUtils;
    use crate::utils::{json_error_handler, query_error_handler};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;

    struct Ctx {
        storage: SeaOrmStorage,
        peer: SocketAddr,
    }

    impl Ctx {
        async fn new(peer_octet: u8) -> Self {
            Self {
                storage: SeaOrmStorage::new_in_memory().await.unwrap(),
                peer: SocketAddr::from(([10, 0, 0, peer_octet], 40000)),
            }
        }

        fn app_data(&self) -> (web::Data<Arc<dyn Storage>>, web::Data<Arc<dyn ObjectCache>>) {
            let storage: Arc<dyn Storage> = Arc::new(self.storage.clone());
            let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1_000, 60));
            (web::Data::new(storage), web::Data::new(cache))
        }

        fn request(&self, method: &str, uri: &str, token: Option<&str>) -> test::TestRequest {
            let req = match method {
                "POST" => test::TestRequest::post(),
                "PATCH" => test::TestRequest::patch(),
                "DELETE" => test::TestRequest::delete(),
                _ => test::TestRequest::get(),
            }
            .uri(uri)
            .peer_addr(self.peer);
            match token {
                Some(token) => req.insert_header(("Authorization", format!("Bearer {token}"))),
                None => req,
            }
        }
    }

    fn token(user_id: i64, role: &str) -> String {
        JwtUtils::generate_access_token(user_id, role).unwrap()
    }

    fn create_body(course_id: i64) -> Value {
        json!({
            "title": "Quadratic equations",
            "courseId": course_id,
            "scheduledAt": (chrono::Utc::now() + chrono::Duration::days(2)).to_rfc3339(),
            "duration": 90,
            "platform": "Zoom",
            "meetingLink": "https://zoom.us/j/987654321"
        })
    }

    macro_rules! init_app {
        ($ctx:expr) => {{
            let (storage, cache) = $ctx.app_data();
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(storage)
                    .app_data(cache)
                    .configure(configure_live_class_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_create_approve_and_student_visibility() {
        let ctx = Ctx::new(1).await;
        let instructor =
            fixtures::seed_user(&ctx.storage, "Ines", "ines@example.com", "instructor").await;
        let admin = fixtures::seed_user(&ctx.storage, "Ada", "ada@example.com", "admin").await;
        let student = fixtures::seed_user(&ctx.storage, "Sam", "sam@example.com", "student").await;
        let other = fixtures::seed_user(&ctx.storage, "Oli", "oli@example.com", "student").await;
        let course = fixtures::seed_course(&ctx.storage, "Algebra I").await;
        let other_course = fixtures::seed_course(&ctx.storage, "Biology").await;
        fixtures::seed_order(&ctx.storage, student, Some(course), "single", "approved", true, None)
            .await;
        fixtures::seed_order(
            &ctx.storage,
            other,
            Some(other_course),
            "single",
            "approved",
            true,
            None,
        )
        .await;
        let app = init_app!(ctx);

        let instructor_token = token(instructor, "instructor");
        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&instructor_token))
                .set_json(create_body(course))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "Scheduled");
        assert_eq!(body["data"]["isApproved"], false);
        assert_eq!(body["data"]["course"]["title"], "Algebra I");
        let id = body["data"]["id"].as_i64().unwrap();

        // pending classes are hidden from the public
        let resp = test::call_service(
            &app,
            ctx.request("GET", &format!("/api/v1/live-classes/{id}"), None)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let admin_token = token(admin, "admin");
        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/admin/pending", Some(&admin_token))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["pagination"]["totalPages"], 1);

        for _ in 0..2 {
            let resp = test::call_service(
                &app,
                ctx.request(
                    "PATCH",
                    &format!("/api/v1/live-classes/{id}/approve"),
                    Some(&admin_token),
                )
                .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["isApproved"], true);
        }

        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", Some(&token(student, "student")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["pagination"]["total"].as_i64().unwrap() >= 1);
        assert_eq!(body["pagination"]["skip"], 0);
        assert_eq!(body["data"][0]["id"], id);

        // a student entitled to another course only
        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", Some(&token(other, "student")))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["pagination"]["totalPages"], 0);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/upcoming", None)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["id"], id);
    }

    #[actix_web::test]
    async fn test_auth_and_role_gates() {
        let ctx = Ctx::new(2).await;
        let student = fixtures::seed_user(&ctx.storage, "Sam", "sam@example.com", "student").await;
        let instructor =
            fixtures::seed_user(&ctx.storage, "Ines", "ines@example.com", "instructor").await;
        let suspended = fixtures::seed_user_with_status(
            &ctx.storage,
            "Sus",
            "sus@example.com",
            "instructor",
            "suspended",
        )
        .await;
        let course = fixtures::seed_course(&ctx.storage, "Algebra I").await;
        let app = init_app!(ctx);

        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", None)
                .set_json(create_body(course))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&token(suspended, "instructor")))
                .set_json(create_body(course))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&token(student, "student")))
                .set_json(create_body(course))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            ctx.request(
                "GET",
                "/api/v1/live-classes/admin/pending",
                Some(&token(instructor, "instructor")),
            )
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // an invalid token on an optional route is treated as anonymous
        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", Some("garbage"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_validation_and_on_behalf_creation() {
        let ctx = Ctx::new(3).await;
        let instructor =
            fixtures::seed_user(&ctx.storage, "Ines", "ines@example.com", "instructor").await;
        let other =
            fixtures::seed_user(&ctx.storage, "Omar", "omar@example.com", "instructor").await;
        let manager = fixtures::seed_user(&ctx.storage, "Mia", "mia@example.com", "manager").await;
        let student = fixtures::seed_user(&ctx.storage, "Sam", "sam@example.com", "student").await;
        let course = fixtures::seed_course(&ctx.storage, "Algebra I").await;
        let app = init_app!(ctx);
        let instructor_token = token(instructor, "instructor");
        let manager_token = token(manager, "manager");

        for (duration, expected) in [
            (14, StatusCode::BAD_REQUEST),
            (15, StatusCode::CREATED),
            (480, StatusCode::CREATED),
            (481, StatusCode::BAD_REQUEST),
        ] {
            let mut body = create_body(course);
            body["duration"] = json!(duration);
            let resp = test::call_service(
                &app,
                ctx.request("POST", "/api/v1/live-classes/create", Some(&instructor_token))
                    .set_json(body)
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), expected, "duration {duration}");
        }

        let mut body = create_body(course);
        body["platform"] = json!("Skype");
        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&instructor_token))
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut body = create_body(course);
        body["instructorId"] = json!(other);
        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&instructor_token))
                .set_json(body.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&manager_token))
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["data"]["instructorId"], other);

        let mut body = create_body(course);
        body["instructorId"] = json!(student);
        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&manager_token))
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut body = create_body(course);
        body["instructorId"] = json!(9_999);
        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&manager_token))
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(
            &app,
            ctx.request(
                "GET",
                "/api/v1/live-classes/instructor/my-classes?limit=1",
                Some(&instructor_token),
            )
            .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["limit"], 1);
        assert_eq!(body["pagination"]["totalPages"], 2);
    }

    #[actix_web::test]
    async fn test_ownership_guard_and_not_found_precedence() {
        let ctx = Ctx::new(4).await;
        let owner =
            fixtures::seed_user(&ctx.storage, "Ines", "ines@example.com", "instructor").await;
        let intruder =
            fixtures::seed_user(&ctx.storage, "Omar", "omar@example.com", "instructor").await;
        let admin = fixtures::seed_user(&ctx.storage, "Ada", "ada@example.com", "admin").await;
        let course = fixtures::seed_course(&ctx.storage, "Algebra I").await;
        let app = init_app!(ctx);
        let owner_token = token(owner, "instructor");
        let intruder_token = token(intruder, "instructor");
        let admin_token = token(admin, "admin");

        let resp = test::call_service(
            &app,
            ctx.request("POST", "/api/v1/live-classes/create", Some(&owner_token))
                .set_json(create_body(course))
                .to_request(),
        )
        .await;
        let created: Value = test::read_body_json(resp).await;
        let id = created["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/live-classes/{id}");

        let resp = test::call_service(
            &app,
            ctx.request("PATCH", &uri, Some(&intruder_token))
                .set_json(json!({"title": "Hijacked"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            ctx.request("PATCH", &format!("{uri}/recorded-link"), Some(&intruder_token))
                .set_json(json!({"recordedLink": "https://cdn.example.com/r.mp4"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = test::call_service(
            &app,
            ctx.request("DELETE", &uri, Some(&intruder_token))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // the owner still sees their pending class
        let resp = test::call_service(
            &app,
            ctx.request("GET", &uri, Some(&owner_token))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            ctx.request("PATCH", &uri, Some(&owner_token))
                .set_json(json!({"title": "Quadratics revisited", "status": "Completed"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["title"], "Quadratics revisited");
        assert_eq!(body["data"]["status"], "Completed");
        assert_eq!(body["data"]["isApproved"], false);

        let resp = test::call_service(
            &app,
            ctx.request("PATCH", &format!("{uri}/recorded-link"), Some(&owner_token))
                .set_json(json!({"recordedLink": "not-a-url"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(
            &app,
            ctx.request("PATCH", &format!("{uri}/recorded-link"), Some(&owner_token))
                .set_json(json!({"recordedLink": "https://cdn.example.com/r.mp4"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let missing = "/api/v1/live-classes/424242";
        for (method, path) in [
            ("PATCH", missing.to_string()),
            ("DELETE", missing.to_string()),
            ("PATCH", format!("{missing}/approve")),
            ("PATCH", format!("{missing}/reject")),
        ] {
            let resp = test::call_service(
                &app,
                ctx.request(method, &path, Some(&admin_token))
                    .set_json(json!({}))
                    .to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method} {path}");
        }

        let resp = test::call_service(
            &app,
            ctx.request("PATCH", &format!("{uri}/reject"), Some(&admin_token))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            ctx.request("GET", &uri, Some(&admin_token))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/abc", None)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_course_listing_hides_pending_from_public() {
        let ctx = Ctx::new(5).await;
        let instructor =
            fixtures::seed_user(&ctx.storage, "Ines", "ines@example.com", "instructor").await;
        let manager = fixtures::seed_user(&ctx.storage, "Mia", "mia@example.com", "manager").await;
        let course = fixtures::seed_course(&ctx.storage, "Algebra I").await;
        let app = init_app!(ctx);

        let resp = test::call_service(
            &app,
            ctx.request(
                "POST",
                "/api/v1/live-classes/create",
                Some(&token(instructor, "instructor")),
            )
            .set_json(create_body(course))
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let uri = format!("/api/v1/live-classes/course/{course}");
        let resp = test::call_service(&app, ctx.request("GET", &uri, None).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        let resp = test::call_service(
            &app,
            ctx.request("GET", &uri, Some(&token(manager, "manager")))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    async fn seed_approved_class(ctx: &Ctx, instructor: i64, course: i64, title: &str) -> i64 {
        use crate::models::live_classes::{entities::Platform, requests::CreateLiveClassRequest};

        let created = ctx
            .storage
            .create_live_class(
                instructor,
                CreateLiveClassRequest {
                    title: title.to_string(),
                    course_id: course,
                    scheduled_at: chrono::Utc::now() + chrono::Duration::days(3),
                    duration: 60,
                    platform: Platform::Meet,
                    meeting_link: "https://meet.google.com/abc-defg-hij".to_string(),
                    instructor_id: None,
                },
            )
            .await
            .unwrap();
        ctx.storage
            .set_live_class_approval(created.id, true)
            .await
            .unwrap()
            .unwrap();
        created.id
    }

    #[actix_web::test]
    async fn test_all_listing_follows_student_entitlements() {
        let ctx = Ctx::new(6).await;
        let instructor =
            fixtures::seed_user(&ctx.storage, "Ines", "ines@example.com", "instructor").await;
        let no_orders = fixtures::seed_user(&ctx.storage, "Nia", "nia@example.com", "student").await;
        let quarterly = fixtures::seed_user(&ctx.storage, "Quin", "quin@example.com", "student").await;
        let expired = fixtures::seed_user(&ctx.storage, "Eve", "eve@example.com", "student").await;
        let algebra = fixtures::seed_course(&ctx.storage, "Algebra I").await;
        let biology = fixtures::seed_course(&ctx.storage, "Biology").await;
        seed_approved_class(&ctx, instructor, algebra, "Linear systems").await;
        seed_approved_class(&ctx, instructor, biology, "Cell structure").await;

        let now = chrono::Utc::now();
        fixtures::seed_order(
            &ctx.storage,
            quarterly,
            None,
            "quarterly",
            "approved",
            true,
            Some((now + chrono::Duration::days(30)).timestamp()),
        )
        .await;
        fixtures::seed_order(
            &ctx.storage,
            expired,
            None,
            "quarterly",
            "approved",
            true,
            Some((now - chrono::Duration::days(1)).timestamp()),
        )
        .await;
        let app = init_app!(ctx);

        // no orders at all: empty result, not an error
        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", Some(&token(no_orders, "student")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["pagination"]["totalPages"], 0);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        // an unexpired quarterly plan covers courses never bought
        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", Some(&token(quarterly, "student")))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"]["total"], 2);
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap())
            .collect();
        assert!(titles.contains(&"Linear systems"));
        assert!(titles.contains(&"Cell structure"));

        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", Some(&token(expired, "student")))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);

        // anonymous callers see every approved class
        let resp = test::call_service(
            &app,
            ctx.request("GET", "/api/v1/live-classes/all", None)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"]["total"], 2);
    }
}
