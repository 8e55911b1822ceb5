//! # Domain Module
//!
//! - [`entities`] - 저장소 문서 타입
//! - [`dto`] - HTTP 요청/응답 타입
//! - [`models`] - 인증 컨텍스트와 토큰 클레임

pub mod entities;
pub mod dto;
pub mod models;

pub use models::*;
