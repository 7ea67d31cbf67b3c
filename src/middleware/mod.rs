//! # 미들웨어 모듈
//!
//! - `auth`: `Authorization: Bearer <jwt>` 헤더에서 사용자 ID를 꺼내는 추출자(Extractor)

pub mod auth;
