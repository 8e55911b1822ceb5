//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 환경 변수에서 읽으며, `main`에서 `.env.<PROFILE>` 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, 페이지네이션, 비밀번호 해싱 설정
//! - [`auth_config`] - JWT 설정과 사용자 역할
//!
//! ## 설계 원칙
//!
//! 설정 타입은 필드가 없는 구조체에 연관 함수를 두는 방식입니다.
//! 호출 시점에 환경 변수를 읽으므로 별도의 전역 상태가 없습니다.
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let secret = JwtConfig::secret();
//! ```
//!
//! ## 환경 변수
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export STORE_BACKEND="mongo"      # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="storefront_dev"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export BCRYPT_COST="12"           # 4-15 범위
//!
//! # 관리자 계정 (선택)
//! export ADMIN_EMAIL="admin@example.com"
//! export ADMIN_PASSWORD="change-me"
//! export ADMIN_NAME="Administrator"
//!
//! # 페이지네이션
//! export DEFAULT_PAGE_SIZE="10"
//! export MAX_PAGE_SIZE="100"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
