//! # 운동 완료 기록 데이터베이스 쿼리 모듈
//!
//! `completed_workouts` 테이블에 대한 읽기/쓰기 함수들입니다.
//!
//! - 읽기: `find_completed_workouts`, `list_completed_workouts`
//! - 쓰기: `apply_action` — `services::reconcile`이 결정한 Create/Update를 실행
//!
//! 병합 규칙 자체는 이 모듈에 없습니다. 이 모듈은 결정된 값을 그대로 저장합니다.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;
use crate::services::reconcile::Action;

/// (사용자, 요일, 날짜)가 일치하는 완료 기록을 모두 조회합니다.
///
/// 정상이라면 0개 또는 1개지만, 여러 개가 나오는 경우도 그대로 돌려주어
/// 호출하는 쪽에서 무결성 위반을 감지할 수 있게 합니다.
pub async fn find_completed_workouts(
    pool: &SqlitePool,
    user_id: &str,
    day: Weekday,
    date: NaiveDate,
) -> Result<Vec<CompletedWorkout>, AppError> {
    let records = sqlx::query_as::<_, CompletedWorkout>(
        r#"
        SELECT id, user_id, day, date, calories, water_intake, weight, created_at, updated_at
        FROM completed_workouts
        WHERE user_id = ? AND day = ? AND date = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(day.as_str())
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// 사용자의 모든 완료 기록을 날짜순(같은 날짜는 생성순)으로 조회합니다.
pub async fn list_completed_workouts(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<CompletedWorkout>, AppError> {
    let records = sqlx::query_as::<_, CompletedWorkout>(
        r#"
        SELECT id, user_id, day, date, calories, water_intake, weight, created_at, updated_at
        FROM completed_workouts
        WHERE user_id = ?
        ORDER BY date ASC, created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn get_completed_workout(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<CompletedWorkout>, AppError> {
    let record = sqlx::query_as::<_, CompletedWorkout>(
        r#"
        SELECT id, user_id, day, date, calories, water_intake, weight, created_at, updated_at
        FROM completed_workouts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// 병합 결정을 DB에 적용하고 저장된 기록을 반환합니다.
///
/// ## 에러
/// - Create가 유니크 인덱스에 걸리면 `AppError::Conflict`
///   (다른 요청이 먼저 같은 키로 기록을 만든 경우)
/// - Update 대상이 사라졌으면 `AppError::NotFound`
pub async fn apply_action(pool: &SqlitePool, action: &Action) -> Result<CompletedWorkout, AppError> {
    let id = match action {
        Action::Create { key, metrics } => {
            let id = uuid::Uuid::now_v7().to_string();

            sqlx::query(
                r#"
                INSERT INTO completed_workouts (id, user_id, day, date, calories, water_intake, weight)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&key.user_id)
            .bind(key.day.as_str())
            .bind(key.date)
            .bind(metrics.calories)
            .bind(metrics.water_intake)
            .bind(metrics.weight)
            .execute(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict(format!("Completed workout already exists for {key}"))
                }
                other => AppError::Database(other),
            })?;

            id
        }
        Action::Update { id, metrics } => {
            let result = sqlx::query(
                r#"
                UPDATE completed_workouts
                SET calories = ?,
                    water_intake = ?,
                    weight = ?,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE id = ?
                "#,
            )
            .bind(metrics.calories)
            .bind(metrics.water_intake)
            .bind(metrics.weight)
            .bind(id)
            .execute(pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound);
            }

            id.clone()
        }
    };

    get_completed_workout(pool, &id)
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve saved completed workout".to_string(),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    fn key(user_id: &str, day: Weekday, date: &str) -> CompletionKey {
        CompletionKey {
            user_id: user_id.to_string(),
            day,
            date: date.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn create_then_find_by_exact_key() {
        let pool = setup_test_db().await;
        let key = key("user-1", Weekday::Monday, "2024-05-06");
        let metrics = Metrics {
            calories: Some(2200.0),
            water_intake: None,
            weight: Some(0.0),
        };

        let saved = apply_action(
            &pool,
            &Action::Create {
                key: key.clone(),
                metrics,
            },
        )
        .await
        .unwrap();

        assert_eq!(saved.key(), key);
        assert_eq!(saved.metrics(), metrics);

        let found = find_completed_workouts(&pool, "user-1", Weekday::Monday, key.date)
            .await
            .unwrap();
        assert_eq!(found, vec![saved]);

        let other_day = find_completed_workouts(&pool, "user-1", Weekday::Tuesday, key.date)
            .await
            .unwrap();
        assert!(other_day.is_empty());

        let other_user = find_completed_workouts(&pool, "user-2", Weekday::Monday, key.date)
            .await
            .unwrap();
        assert!(other_user.is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_metrics() {
        let pool = setup_test_db().await;
        let created = apply_action(
            &pool,
            &Action::Create {
                key: key("user-1", Weekday::Monday, "2024-05-06"),
                metrics: Metrics {
                    calories: Some(1500.0),
                    ..Metrics::default()
                },
            },
        )
        .await
        .unwrap();

        let updated_metrics = Metrics {
            calories: Some(1500.0),
            water_intake: Some(1800.0),
            weight: Some(70.2),
        };
        let updated = apply_action(
            &pool,
            &Action::Update {
                id: created.id.clone(),
                metrics: updated_metrics,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.metrics(), updated_metrics);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn duplicate_create_is_a_conflict() {
        let pool = setup_test_db().await;
        let create = Action::Create {
            key: key("user-1", Weekday::Monday, "2024-05-06"),
            metrics: Metrics::default(),
        };

        apply_action(&pool, &create).await.unwrap();
        let second = apply_action(&pool, &create).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let pool = setup_test_db().await;
        let result = apply_action(
            &pool,
            &Action::Update {
                id: "missing".to_string(),
                metrics: Metrics::default(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_is_scoped_and_ordered_by_date() {
        let pool = setup_test_db().await;
        for (user, day, date) in [
            ("user-1", Weekday::Friday, "2024-05-10"),
            ("user-1", Weekday::Monday, "2024-05-06"),
            ("user-2", Weekday::Monday, "2024-05-06"),
        ] {
            apply_action(
                &pool,
                &Action::Create {
                    key: key(user, day, date),
                    metrics: Metrics::default(),
                },
            )
            .await
            .unwrap();
        }

        let records = list_completed_workouts(&pool, "user-1").await.unwrap();

        let days: Vec<Weekday> = records.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Friday]);
    }
}
