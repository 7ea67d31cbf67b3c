//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `completions`: 운동 완료 표시 및 완료 기록 목록
//! - `exercises`: 주간 일정과 요일별 운동 항목
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `metrics`: 일일 건강 지표 조회/저장
//! - `progress`: 주간 진행도 요약
//!
//! `/health`를 제외한 모든 핸들러는 `AuthUser` 추출자로 사용자를 확인합니다.

pub mod completions;
pub mod exercises;
pub mod health;
pub mod metrics;
pub mod progress;

pub use completions::*;
pub use exercises::*;
pub use health::*;
pub use metrics::*;
pub use progress::*;

use std::sync::Arc;

use axum::{routing::get, Router};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{error::AppError, models::Weekday, services::Clock};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 액세스 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 토큰 `aud` 기대값 (None이면 검사 안 함)
    pub jwt_audience: Option<String>,
    /// 현재 시각의 출처 — 테스트에서는 고정 시각으로 바꿔 끼웁니다.
    pub clock: Arc<dyn Clock>,
}

/// `/api/v1` 아래의 모든 API 라우트를 조립합니다.
///
/// CORS, 요청 로깅, 정적 파일 서빙 같은 바깥 레이어는 `main`에서 덧붙입니다.
pub fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        // 주간 일정과 운동 항목
        .route("/schedule", get(get_schedule))
        .route(
            "/workouts/{day}/exercises",
            get(list_day_exercises).post(add_exercise),
        )
        // 운동 완료 기록
        .route("/completions", get(list_completions).post(complete_day))
        // 일일 건강 지표 (없으면 생성, 있으면 병합)
        .route("/metrics/{day}", get(get_metrics).put(save_metrics))
        // 주간 진행도
        .route("/progress", get(get_progress))
        .route("/health", get(health_check))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

/// URL이나 본문의 요일 문자열을 `Weekday`로 변환합니다. 실패하면 400.
pub(crate) fn parse_day(raw: &str) -> Result<Weekday, AppError> {
    raw.parse::<Weekday>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// "YYYY-MM-DD" 날짜를 파싱합니다. 생략되면 시계 기준 오늘 날짜를 씁니다.
pub(crate) fn resolve_date(raw: Option<&str>, clock: &dyn Clock) -> Result<NaiveDate, AppError> {
    match raw {
        None => Ok(clock.today()),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {value}"))
        }),
    }
}
