//! # 주간 일정 및 운동 항목 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/schedule | `get_schedule` | 월~일 7칸 주간 일정 |
//! | GET | /api/v1/workouts/{day}/exercises | `list_day_exercises` | 요일의 운동 항목 |
//! | POST | /api/v1/workouts/{day}/exercises | `add_exercise` | 요일에 운동 항목 추가 |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{parse_day, AppState},
};

/// `GET /api/v1/schedule` → `{ "schedule": [{ "day": "Monday", "exercises": [...] }, ...] }`
pub async fn get_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let schedule = db::list_schedule(&state.pool, &auth_user.user_id).await?;
    Ok(Json(json!({ "schedule": schedule })))
}

/// `GET /api/v1/workouts/{day}/exercises` → `{ "exercises": [...] }`
///
/// 아직 운동 계획이 없는 요일이면 빈 배열을 반환합니다 (404 아님).
pub async fn list_day_exercises(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(day): Path<String>,
) -> Result<Json<Value>, AppError> {
    let day = parse_day(&day)?;
    let exercises = db::list_exercises_for_day(&state.pool, &auth_user.user_id, day).await?;
    Ok(Json(json!({ "exercises": exercises })))
}

/// 요일에 운동 항목을 추가합니다.
///
/// `POST /api/v1/workouts/{day}/exercises`
/// + `{ "name": "Bench Press", "sets": 3, "reps": 10, "weight": 60, "notes": "..." }`
/// → `201 Created` + 생성된 항목
///
/// 그 요일에 운동 계획이 없으면 먼저 만들고, 있으면 기존 계획에 추가합니다.
pub async fn add_exercise(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(day): Path<String>,
    Json(req): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<Exercise>), AppError> {
    let day = parse_day(&day)?;

    // Validate input
    let name = req.name.trim();
    if name.chars().count() < 2 {
        return Err(AppError::BadRequest(
            "Exercise name must be at least 2 characters".to_string(),
        ));
    }
    if req.sets < 1 {
        return Err(AppError::BadRequest("Must have at least 1 set".to_string()));
    }
    if req.reps < 1 {
        return Err(AppError::BadRequest("Must have at least 1 rep".to_string()));
    }
    if !req.weight.is_finite() || req.weight < 0.0 {
        return Err(AppError::BadRequest("Weight cannot be negative".to_string()));
    }

    // 빈 메모는 메모 없음으로 저장
    let req = CreateExerciseRequest {
        name: name.to_string(),
        notes: req
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string),
        ..req
    };

    let workout = db::get_or_create_workout(&state.pool, &auth_user.user_id, day).await?;
    let exercise = db::create_exercise(&state.pool, &workout.id, &req).await?;

    tracing::info!(user_id = %auth_user.user_id, %day, exercise_id = %exercise.id, "Added exercise");

    Ok((StatusCode::CREATED, Json(exercise)))
}
