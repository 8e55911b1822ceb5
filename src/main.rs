//! 스토어프론트 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! `STORE_BACKEND`에 따라 MongoDB 또는 메모리 저장소를 연결하고 JWT 인증 기반의 REST API를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use storefront_service_backend::config::{
    AdminSeedConfig, DatabaseConfig, PasswordConfig, ServerConfig, StoreBackend,
};
use storefront_service_backend::core::errors::AppResult;
use storefront_service_backend::db::Database;
use storefront_service_backend::repositories::{
    addresses::{address_repo::AddressRepository, AddressStore},
    categories::{category_repo::CategoryRepository, CategoryStore},
    memory::MemoryStore,
    users::{user_repo::UserRepository, UserStore},
};
use storefront_service_backend::routes::configure_all_routes;
use storefront_service_backend::services::{
    addresses::AddressService,
    auth::TokenService,
    categories::CategoryService,
    users::UserService,
};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 선택된 백엔드의 저장소 핸들
struct Stores {
    users: Arc<dyn UserStore>,
    addresses: Arc<dyn AddressStore>,
    categories: Arc<dyn CategoryStore>,
}

/// 핸들러에 주입되는 서비스
#[derive(Clone)]
struct AppServices {
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
    addresses: web::Data<AddressService>,
    categories: web::Data<CategoryService>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 스토어프론트 서비스 시작중...");

    let stores = initialize_stores().await.map_err(|e| {
        error!("저장소 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let services = build_services(stores);

    if let Err(e) = seed_admin_account(&services.users).await {
        error!("관리자 계정 생성 실패: {}", e);
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(services).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(services: AppServices) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다 (0 값 불가)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(services.users.clone())
            .app_data(services.tokens.clone())
            .app_data(services.addresses.clone())
            .app_data(services.categories.clone())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=storefront_service_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// `STORE_BACKEND`에 따라 저장소를 초기화합니다
///
/// MongoDB를 사용하는 경우 연결 확인 후 인덱스와 카테고리 버전 문서를 준비합니다.
async fn initialize_stores() -> AppResult<Stores> {
    match DatabaseConfig::backend() {
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Arc::new(Database::new().await?);

            let users = UserRepository::new(database.clone());
            let addresses = AddressRepository::new(database.clone());
            let categories = CategoryRepository::new(database);

            users.create_indexes().await?;
            addresses.create_indexes().await?;
            categories.create_indexes().await?;

            info!("✅ MongoDB 저장소 준비 완료");

            Ok(Stores {
                users: Arc::new(users),
                addresses: Arc::new(addresses),
                categories: Arc::new(categories),
            })
        }
        StoreBackend::Memory => {
            info!("🧪 메모리 저장소 사용 (재시작 시 데이터가 사라집니다)");

            let store = Arc::new(MemoryStore::new());

            Ok(Stores {
                users: store.clone(),
                addresses: store.clone(),
                categories: store,
            })
        }
    }
}

fn build_services(stores: Stores) -> AppServices {
    let bcrypt_cost = PasswordConfig::bcrypt_cost();
    info!("🔐 bcrypt cost: {}", bcrypt_cost);

    AppServices {
        users: web::Data::new(UserService::new(stores.users, bcrypt_cost)),
        tokens: web::Data::new(TokenService::from_config()),
        addresses: web::Data::new(AddressService::new(stores.addresses)),
        categories: web::Data::new(CategoryService::new(stores.categories)),
    }
}

/// `ADMIN_EMAIL`/`ADMIN_PASSWORD`가 설정되어 있으면 관리자 계정을 보장합니다
async fn seed_admin_account(users: &UserService) -> AppResult<()> {
    let Some((name, email, password)) = AdminSeedConfig::credentials() else {
        info!("ADMIN_EMAIL 미설정: 관리자 계정 생성 생략");
        return Ok(());
    };

    let admin = users.ensure_admin_account(&name, &email, &password).await?;
    info!("👤 관리자 계정 준비: {} (ID: {})", admin.email, admin.id);

    Ok(())
}

/// CORS 설정을 구성합니다
///
/// 스토어프론트 개발 서버(`localhost:3000`)와 자체 서버 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
