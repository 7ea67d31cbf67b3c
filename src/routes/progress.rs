//! # 주간 진행도 API 라우트 핸들러
//!
//! - `GET /api/v1/progress` → `ProgressSummary`
//!
//! 집계 자체는 `services::progress::aggregate`가 하고,
//! 이 핸들러는 기록 조회와 기준 시각(`state.clock`) 주입만 담당합니다.

use axum::{extract::State, Json};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    routes::AppState,
    services::progress::{aggregate, ProgressSummary},
};

/// 최근 7일 기준 진행도 요약을 반환합니다.
///
/// 기록이 하나도 없어도 200으로 `completed_this_week: 0`,
/// 평균/최근 체중은 `null`인 요약을 돌려줍니다.
pub async fn get_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProgressSummary>, AppError> {
    let records = db::list_completed_workouts(&state.pool, &auth_user.user_id).await?;
    let summary = aggregate(&records, state.clock.now());

    tracing::debug!(
        user_id = %auth_user.user_id,
        completed = summary.completed_this_week,
        percentage = summary.goal_percentage,
        "Computed weekly progress"
    );

    Ok(Json(summary))
}
