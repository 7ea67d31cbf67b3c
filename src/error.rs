//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 에러 응답 본문은 항상 같은 모양입니다:
//! `{ "error": { "code": "...", "message": "..." } }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::reconcile::ReconcileError;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    ///
    /// 음수 칼로리, 알 수 없는 요일, 잘못된 날짜 형식처럼
    /// 폼 검증 단계에서 걸러지는 입력이 여기에 해당합니다.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 리소스 충돌 (HTTP 409)
    ///
    /// 같은 (사용자, 요일, 날짜)에 대한 INSERT가 유니크 제약에 걸린 경우입니다.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 데이터 무결성 위반 (HTTP 500)
    ///
    /// 하나여야 할 완료 기록이 여러 개 조회된 경우처럼,
    /// 상위 계층의 불변식이 이미 깨진 상황을 나타냅니다.
    /// 임의로 하나를 고르지 않고 결함으로 보고합니다.
    #[error("Integrity violation: {0}")]
    Integrity(#[from] ReconcileError),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal, Integrity)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 재시도 안내에 쓸 수 있는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Integrity(ref e) => {
                tracing::error!("Integrity violation: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "integrity_error",
                    "Stored records are inconsistent".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
