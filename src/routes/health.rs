//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok", "database": "ok" }`
//!
//! 인증 없이 호출할 수 있으며, 로드밸런서나 컨테이너 헬스체크에 사용합니다.
//! DB 연결 풀에서 간단한 쿼리를 실행해 저장소까지 살아 있는지 확인합니다.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::routes::AppState;

/// `GET /health` — 서버와 데이터베이스 상태를 확인합니다.
///
/// DB 쿼리가 실패하면 `503 Service Unavailable`과 함께
/// `"database": "unavailable"`을 반환합니다.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check database query failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}
