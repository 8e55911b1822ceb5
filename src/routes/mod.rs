//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//!
//! # Auth Middleware Usage
//!
//! | 스코프 | 미들웨어 | 비고 |
//! |--------|----------|------|
//! | `/api/auth` | `AuthMiddleware::optional()` | 회원가입/로그인은 공개, 비밀번호 변경은 `AuthenticatedUser` 필요 |
//! | `/api/users` | `AuthMiddleware::required()` | 본인 또는 관리자 (핸들러에서 검사) |
//! | `/api/categories` | `AuthMiddleware::optional()` | 조회는 공개, 변경은 관리자 (핸들러에서 검사) |
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(user_service.clone())
//!     .app_data(token_service.clone())
//!     .configure(configure_all_routes)
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 서비스(`web::Data<UserService>`, `web::Data<TokenService>`, `web::Data<AddressService>`,
/// `web::Data<CategoryService>`)는 호출 전에 애플리케이션에 등록되어 있어야 합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_category_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// # Available Routes
///
/// - `POST /api/auth/register` - 회원가입 (201)
/// - `POST /api/auth/login` - 이메일/비밀번호 로그인
/// - `POST /api/auth/change-password` - 비밀번호 변경 (Bearer 토큰 필요)
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .wrap(AuthMiddleware::optional())
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::change_password)
    );
}

/// 사용자 및 주소록 라우트를 설정합니다
///
/// 주소록은 `/api/users/{user_id}/addresses` 아래에 중첩됩니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(AuthMiddleware::required())
            .service(
                web::scope("/{user_id}/addresses")
                    .service(handlers::addresses::list_addresses)
                    .service(handlers::addresses::create_address)
                    .service(handlers::addresses::set_default_address)
                    .service(handlers::addresses::get_address)
                    .service(handlers::addresses::update_address)
                    .service(handlers::addresses::delete_address)
            )
            .service(handlers::users::get_me)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user)
    );
}

/// 카테고리 라우트를 설정합니다
///
/// 고정 경로(`/hierarchy`, `/root`)는 `/{category_id}`보다 먼저 등록합니다.
fn configure_category_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/categories")
            .wrap(AuthMiddleware::optional())
            .service(handlers::categories::list_categories)
            .service(handlers::categories::category_hierarchy)
            .service(handlers::categories::root_categories)
            .service(handlers::categories::sub_categories)
            .service(handlers::categories::get_category)
            .service(handlers::categories::create_category)
            .service(handlers::categories::update_category)
            .service(handlers::categories::delete_category)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "storefront_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {
///     "store": "MongoDB | Memory",
///     "auth": "JWT (HS256)"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "storefront_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "store": crate::config::DatabaseConfig::backend().as_str(),
            "auth": "JWT (HS256)"
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{dev::ServiceResponse, http::StatusCode, test, App};
    use serde_json::Value;
    use crate::domain::entities::users::User;
    use crate::repositories::memory::MemoryStore;
    use crate::services::{
        addresses::AddressService,
        auth::TokenService,
        categories::CategoryService,
        users::UserService,
    };
    use super::*;

    const SECRET: &str = "route-test-secret";

    fn app_config(store: Arc<MemoryStore>) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg| {
            cfg.app_data(web::Data::new(UserService::new(store.clone(), 4)))
                .app_data(web::Data::new(TokenService::new(SECRET, 1)))
                .app_data(web::Data::new(AddressService::new(store.clone())))
                .app_data(web::Data::new(CategoryService::new(store)));
            configure_all_routes(cfg);
        }
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    async fn admin_token(store: &Arc<MemoryStore>) -> String {
        let admin: User = UserService::new(store.clone(), 4)
            .ensure_admin_account("Admin", "admin@example.com", "admin-secret")
            .await
            .unwrap();
        TokenService::new(SECRET, 1).generate_access_token(&admin).unwrap()
    }

    async fn json_body(res: ServiceResponse) -> Value {
        test::read_body_json(res).await
    }

    fn address_json(name: &str, is_default: bool) -> Value {
        json!({
            "name": name,
            "addressLine1": "12 MG Road",
            "city": "Pune",
            "state": "MH",
            "postalCode": "411001",
            "country": "India",
            "phone": "9876543210",
            "isDefault": is_default
        })
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(app_config(Arc::new(MemoryStore::new())))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_register_login_and_me() {
        let app = test::init_service(App::new().configure(app_config(Arc::new(MemoryStore::new())))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Asha", "email": "asha@example.com", "password": "secret1"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = json_body(res).await;
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["user"]["role"], "Customer");

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Asha", "email": "ASHA@example.com", "password": "secret1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "asha@example.com", "password": "wrong"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(json_body(res).await["error"].is_string());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "asha@example.com", "password": "secret1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri("/api/users/me").insert_header(bearer(&token)).to_request();
        let me: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(me["email"], "asha@example.com");

        let req = test::TestRequest::get().uri("/api/users/me").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/auth/change-password")
            .insert_header(bearer(&token))
            .set_json(json!({"currentPassword": "wrong", "newPassword": "secret2"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/auth/change-password")
            .insert_header(bearer(&token))
            .set_json(json!({"currentPassword": "secret1", "newPassword": "secret2"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_register_validation_error() {
        let app = test::init_service(App::new().configure(app_config(Arc::new(MemoryStore::new())))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "A", "email": "not-an-email", "password": "123"}))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_address_book_flow() {
        let store = Arc::new(MemoryStore::new());
        let app = test::init_service(App::new().configure(app_config(store.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Asha", "email": "asha@example.com", "password": "secret1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();
        let user_id = body["user"]["id"].as_i64().unwrap();
        let base = format!("/api/users/{}/addresses", user_id);

        let req = test::TestRequest::post().uri(&base).insert_header(bearer(&token))
            .set_json(address_json("Home", false)).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let home = json_body(res).await;
        assert_eq!(home["isDefault"], true);

        let req = test::TestRequest::post().uri(&base).insert_header(bearer(&token))
            .set_json(address_json("Office", true)).to_request();
        let office: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(office["isDefault"], true);

        let req = test::TestRequest::get().uri(&base).insert_header(bearer(&token)).to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        let defaults: Vec<&Value> = list.as_array().unwrap().iter().filter(|a| a["isDefault"] == true).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0]["id"], office["id"]);

        let req = test::TestRequest::patch()
            .uri(&format!("{}/{}/default", base, home["id"]))
            .insert_header(bearer(&token))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["isDefault"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("{}/{}", base, home["id"]))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("{}/{}", base, office["id"]))
            .insert_header(bearer(&token))
            .to_request();
        let remaining: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(remaining["isDefault"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("{}/{}", base, home["id"]))
            .insert_header(bearer(&token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let mut invalid = address_json("Home", false);
        invalid["postalCode"] = json!("4110");
        let req = test::TestRequest::post().uri(&base).insert_header(bearer(&token))
            .set_json(invalid).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_address_book_is_owner_or_admin() {
        let store = Arc::new(MemoryStore::new());
        let admin = admin_token(&store).await;
        let app = test::init_service(App::new().configure(app_config(store.clone()))).await;

        let mut tokens = Vec::new();
        for email in ["asha@example.com", "ravi@example.com"] {
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({"name": "Someone", "email": email, "password": "secret1"}))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            tokens.push((body["user"]["id"].as_i64().unwrap(), body["token"].as_str().unwrap().to_string()));
        }
        let (asha_id, _) = &tokens[0];
        let (_, ravi_token) = &tokens[1];
        let uri = format!("/api/users/{}/addresses", asha_id);

        let req = test::TestRequest::get().uri(&uri).insert_header(bearer(ravi_token)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post().uri(&uri).insert_header(bearer(&admin))
            .set_json(address_json("Home", false)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/users/9999/addresses")
            .insert_header(bearer(&admin))
            .set_json(address_json("Home", false))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_category_admin_and_public_routes() {
        let store = Arc::new(MemoryStore::new());
        let admin = admin_token(&store).await;
        let app = test::init_service(App::new().configure(app_config(store.clone()))).await;

        let req = test::TestRequest::post().uri("/api/categories").set_json(json!({"name": "Men"})).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Asha", "email": "asha@example.com", "password": "secret1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let customer = body["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::post().uri("/api/categories").insert_header(bearer(&customer))
            .set_json(json!({"name": "Men"})).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post().uri("/api/categories").insert_header(bearer(&admin))
            .set_json(json!({"name": "Men", "description": "Menswear"})).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let men = json_body(res).await;
        let men_id = men["id"].as_i64().unwrap();

        let req = test::TestRequest::post().uri("/api/categories").insert_header(bearer(&admin))
            .set_json(json!({"name": "Shirts", "parentCategoryId": men_id})).to_request();
        let shirts: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(shirts["parentCategoryName"], "Men");
        let shirts_id = shirts["id"].as_i64().unwrap();

        store.insert_product("Linen Shirt", Some(shirts_id)).unwrap();

        let req = test::TestRequest::get().uri("/api/categories/hierarchy").to_request();
        let tree: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tree[0]["level"], 0);
        assert_eq!(tree[0]["subCategories"][0]["level"], 1);
        assert_eq!(tree[0]["subCategories"][0]["productCount"], 1);

        let req = test::TestRequest::get().uri("/api/categories/root").to_request();
        let roots: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(roots.as_array().unwrap().len(), 1);

        let req = test::TestRequest::get().uri(&format!("/api/categories/{}/subcategories", men_id)).to_request();
        let children: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(children[0]["id"], shirts_id);

        let req = test::TestRequest::get().uri("/api/categories?name=SHIRT&page=1&pageSize=5").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let req = test::TestRequest::put().uri(&format!("/api/categories/{}", men_id)).insert_header(bearer(&admin))
            .set_json(json!({"name": "Men", "parentCategoryId": shirts_id})).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put().uri("/api/categories/999").insert_header(bearer(&admin))
            .set_json(json!({"name": "Ghost"})).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri(&format!("/api/categories/{}", men_id))
            .insert_header(bearer(&admin)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::delete().uri(&format!("/api/categories/{}", shirts_id))
            .insert_header(bearer(&admin)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&format!("/api/categories/{}", shirts_id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_admin_deletes_user() {
        let store = Arc::new(MemoryStore::new());
        let admin = admin_token(&store).await;
        let app = test::init_service(App::new().configure(app_config(store.clone()))).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"name": "Asha", "email": "asha@example.com", "password": "secret1"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap().to_string();
        let user_id = body["user"]["id"].as_i64().unwrap();

        let req = test::TestRequest::delete().uri(&format!("/api/users/{}", user_id))
            .insert_header(bearer(&token)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete().uri(&format!("/api/users/{}", user_id))
            .insert_header(bearer(&admin)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        assert!(store.cart_for_user(user_id).unwrap().is_none());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "asha@example.com", "password": "secret1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
