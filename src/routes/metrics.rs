//! # 일일 건강 지표 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/metrics/{day}?date= | `get_metrics` | 해당 날짜의 기존 지표 (폼 미리 채우기용) |
//! | PUT | /api/v1/metrics/{day} | `save_metrics` | 지표 저장 (없으면 생성, 있으면 병합) |
//!
//! ## 저장 흐름
//! ```text
//! 1. 입력 검증 (음수/NaN 거부)
//! 2. db::find_completed_workouts  — (사용자, 요일, 날짜)로 기존 기록 조회
//! 3. reconcile_candidates         — Create / Update 결정 (순수 함수)
//! 4. db::apply_action             — 결정 적용
//! ```
//! 2번과 4번 사이에 다른 요청이 같은 키로 먼저 기록을 만들면 4번의 INSERT가
//! 유니크 인덱스에 걸립니다. 이때는 한 번만 다시 조회해서 Update로 적용합니다.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::SqlitePool;

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{parse_day, resolve_date, AppState},
    services::reconcile::{reconcile_candidates, select_existing, Action},
};

/// 특정 요일/날짜의 기존 지표를 조회합니다.
///
/// `GET /api/v1/metrics/{day}?date=2024-05-06` → `CompletedWorkout`
///
/// `date`를 생략하면 오늘 날짜입니다. 기록이 없으면 404.
pub async fn get_metrics(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(day): Path<String>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<CompletedWorkout>, AppError> {
    let key = CompletionKey {
        user_id: auth_user.user_id,
        day: parse_day(&day)?,
        date: resolve_date(query.date.as_deref(), state.clock.as_ref())?,
    };

    let candidates = db::find_completed_workouts(&state.pool, &key.user_id, key.day, key.date).await?;
    let record = select_existing(&key, &candidates)?
        .cloned()
        .ok_or(AppError::NotFound)?;

    Ok(Json(record))
}

/// 일일 지표를 저장합니다.
///
/// `PUT /api/v1/metrics/{day}` + `{ "date": "2024-05-06", "calories": 2100, "weight": 70.5 }`
///
/// 보내지 않은 지표는 기존 값이 유지되고, 0은 값으로 저장됩니다.
pub async fn save_metrics(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(day): Path<String>,
    Json(req): Json<SaveMetricsRequest>,
) -> Result<Json<SaveMetricsResponse>, AppError> {
    let incoming = req.metrics();
    validate_metrics(&incoming)?;

    let key = CompletionKey {
        user_id: auth_user.user_id,
        day: parse_day(&day)?,
        date: resolve_date(req.date.as_deref(), state.clock.as_ref())?,
    };

    let (action, record) = record_metrics(&state.pool, &key, &incoming).await?;

    Ok(Json(SaveMetricsResponse {
        action: action.kind(),
        record,
    }))
}

/// 조회 → 병합 결정 → 적용을 수행하고, 적용한 Action과 저장된 기록을 반환합니다.
///
/// 운동 완료 표시(`POST /completions`)도 빈 지표로 이 함수를 사용합니다.
pub(crate) async fn record_metrics(
    pool: &SqlitePool,
    key: &CompletionKey,
    incoming: &Metrics,
) -> Result<(Action, CompletedWorkout), AppError> {
    let candidates = db::find_completed_workouts(pool, &key.user_id, key.day, key.date).await?;
    let action = reconcile_candidates(key, incoming, &candidates)?;
    tracing::debug!(%key, kind = action.kind(), metrics = ?action.metrics(), "Reconciled daily metrics");

    match db::apply_action(pool, &action).await {
        // 다른 요청이 먼저 INSERT 함 → 그 기록에 병합
        Err(AppError::Conflict(_)) if action.is_create() => {
            tracing::warn!(%key, "Lost insert race for completed workout, retrying as update");
            let candidates =
                db::find_completed_workouts(pool, &key.user_id, key.day, key.date).await?;
            let retry = reconcile_candidates(key, incoming, &candidates)?;
            let record = db::apply_action(pool, &retry).await?;
            Ok((retry, record))
        }
        result => {
            let record = result?;
            tracing::info!(%key, record_id = %record.id, kind = action.kind(), "Saved daily metrics");
            Ok((action, record))
        }
    }
}

/// 폼 검증: 지표는 0 이상의 유한한 숫자여야 합니다.
fn validate_metrics(metrics: &Metrics) -> Result<(), AppError> {
    for (name, value) in metrics.fields() {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(AppError::BadRequest(format!("{name} must be a non-negative number")));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;
    use chrono::NaiveDate;

    fn key() -> CompletionKey {
        CompletionKey {
            user_id: "user-1".to_string(),
            day: Weekday::Saturday,
            date: NaiveDate::from_ymd_opt(2024, 5, 11).unwrap(),
        }
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        assert!(validate_metrics(&Metrics::default()).is_ok());
        assert!(validate_metrics(&Metrics {
            calories: Some(0.0),
            water_intake: Some(0.0),
            weight: Some(0.0),
        })
        .is_ok());
        assert!(matches!(
            validate_metrics(&Metrics {
                water_intake: Some(-1.0),
                ..Metrics::default()
            }),
            Err(AppError::BadRequest(msg)) if msg.contains("water_intake")
        ));
        assert!(validate_metrics(&Metrics {
            weight: Some(f64::INFINITY),
            ..Metrics::default()
        })
        .is_err());
    }

    #[tokio::test]
    async fn record_metrics_merges_into_existing_row() {
        let pool = setup_test_db().await;

        let (first, created) = record_metrics(
            &pool,
            &key(),
            &Metrics {
                calories: Some(1900.0),
                ..Metrics::default()
            },
        )
        .await
        .unwrap();
        assert!(first.is_create());

        let (second, updated) = record_metrics(
            &pool,
            &key(),
            &Metrics {
                weight: Some(68.0),
                ..Metrics::default()
            },
        )
        .await
        .unwrap();

        assert!(!second.is_create());
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.calories, Some(1900.0));
        assert_eq!(updated.weight, Some(68.0));
    }

    #[tokio::test]
    async fn row_inserted_by_another_request_is_merged() {
        let pool = setup_test_db().await;

        // 다른 요청이 먼저 같은 키로 INSERT한 상황: 오래된 Create는 충돌합니다.
        let stale = Action::Create {
            key: key(),
            metrics: Metrics::default(),
        };
        db::apply_action(
            &pool,
            &Action::Create {
                key: key(),
                metrics: Metrics {
                    water_intake: Some(500.0),
                    ..Metrics::default()
                },
            },
        )
        .await
        .unwrap();
        assert!(matches!(
            db::apply_action(&pool, &stale).await,
            Err(AppError::Conflict(_))
        ));

        let (action, record) = record_metrics(
            &pool,
            &key(),
            &Metrics {
                calories: Some(1200.0),
                ..Metrics::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(action.kind(), "updated");
        assert_eq!(record.water_intake, Some(500.0));
        assert_eq!(record.calories, Some(1200.0));
    }
}
