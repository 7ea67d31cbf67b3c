//! # 운동 완료 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/completions | `list_completions` | 내 완료 기록 전체 (날짜순) |
//! | POST | /api/v1/completions | `complete_day` | 요일 운동 완료 표시 |

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{metrics::record_metrics, parse_day, resolve_date, AppState},
};

/// `GET /api/v1/completions` → `{ "completions": [...] }`
pub async fn list_completions(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let completions = db::list_completed_workouts(&state.pool, &auth_user.user_id).await?;
    Ok(Json(json!({ "completions": completions })))
}

/// 요일 운동을 완료로 표시합니다.
///
/// `POST /api/v1/completions` + `{ "day": "Monday", "date": "2024-05-06" }`
///
/// 빈 지표로 병합하므로, 이미 같은 날 지표를 기록해 두었다면
/// 그 기록이 그대로 유지되고(`updated`), 없으면 새로 만들어집니다(`created`).
pub async fn complete_day(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CompleteDayRequest>,
) -> Result<Json<SaveMetricsResponse>, AppError> {
    let key = CompletionKey {
        user_id: auth_user.user_id,
        day: parse_day(&req.day)?,
        date: resolve_date(req.date.as_deref(), state.clock.as_ref())?,
    };

    let (action, record) = record_metrics(&state.pool, &key, &Metrics::default()).await?;

    Ok(Json(SaveMetricsResponse {
        action: action.kind(),
        record,
    }))
}
