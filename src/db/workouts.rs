//! # 운동 계획 및 운동 항목 데이터베이스 쿼리 모듈
//!
//! `workouts`와 `exercises` 테이블에 대한 쿼리 함수들입니다.
//! 모든 조회는 사용자 ID로 범위를 제한합니다.
//!
//! ## 운동 계획 생성 규칙
//! 운동 계획(Workout)은 요일에 첫 운동 항목을 추가할 때 자동으로 만들어집니다.
//! `UNIQUE (user_id, day)` 제약과 `ON CONFLICT DO NOTHING`으로
//! 동시에 두 요청이 들어와도 계획이 하나만 생깁니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 사용자의 특정 요일 운동 계획을 조회합니다.
pub async fn find_workout(
    pool: &SqlitePool,
    user_id: &str,
    day: Weekday,
) -> Result<Option<Workout>, AppError> {
    let workout = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, user_id, day, created_at
        FROM workouts
        WHERE user_id = ? AND day = ?
        "#,
    )
    .bind(user_id)
    .bind(day.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(workout)
}

/// 요일의 운동 계획을 가져오고, 없으면 만듭니다.
///
/// 이미 있으면 INSERT는 아무 일도 하지 않고(`DO NOTHING`) 기존 행을 돌려줍니다.
pub async fn get_or_create_workout(
    pool: &SqlitePool,
    user_id: &str,
    day: Weekday,
) -> Result<Workout, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO workouts (id, user_id, day)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, day) DO NOTHING
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(day.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        tracing::debug!(user_id, %day, workout_id = %id, "Created workout");
    }

    find_workout(pool, user_id, day)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve workout".to_string()))
}

/// 운동 계획에 운동 항목을 추가합니다.
///
/// 입력 검증은 라우트 핸들러에서 이미 끝난 상태로 호출됩니다.
pub async fn create_exercise(
    pool: &SqlitePool,
    workout_id: &str,
    req: &CreateExerciseRequest,
) -> Result<Exercise, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO exercises (id, workout_id, name, sets, reps, weight, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(workout_id)
    .bind(&req.name)
    .bind(req.sets)
    .bind(req.reps)
    .bind(req.weight)
    .bind(req.notes.as_deref())
    .execute(pool)
    .await?;

    get_exercise(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created exercise".to_string()))
}

pub async fn get_exercise(pool: &SqlitePool, id: &str) -> Result<Option<Exercise>, AppError> {
    let exercise = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, workout_id, name, sets, reps, weight, notes, created_at
        FROM exercises
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(exercise)
}

/// 사용자의 특정 요일 운동 항목을 추가한 순서대로 조회합니다.
///
/// 해당 요일에 운동 계획이 없으면 빈 Vec을 반환합니다.
pub async fn list_exercises_for_day(
    pool: &SqlitePool,
    user_id: &str,
    day: Weekday,
) -> Result<Vec<Exercise>, AppError> {
    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT e.id, e.workout_id, e.name, e.sets, e.reps, e.weight, e.notes, e.created_at
        FROM exercises e
        JOIN workouts w ON w.id = e.workout_id
        WHERE w.user_id = ? AND w.day = ?
        ORDER BY e.created_at ASC, e.id ASC
        "#,
    )
    .bind(user_id)
    .bind(day.as_str())
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}

/// 요일 정보가 붙은 운동 항목 — 주간 일정 조립용
#[derive(sqlx::FromRow)]
struct ScheduledExercise {
    #[sqlx(try_from = "String")]
    day: Weekday,
    #[sqlx(flatten)]
    exercise: Exercise,
}

/// 월요일부터 일요일까지 7칸짜리 주간 일정을 만듭니다.
///
/// 운동이 없는 요일도 빈 목록으로 포함됩니다.
pub async fn list_schedule(pool: &SqlitePool, user_id: &str) -> Result<Vec<DaySchedule>, AppError> {
    let rows = sqlx::query_as::<_, ScheduledExercise>(
        r#"
        SELECT w.day, e.id, e.workout_id, e.name, e.sets, e.reps, e.weight, e.notes, e.created_at
        FROM exercises e
        JOIN workouts w ON w.id = e.workout_id
        WHERE w.user_id = ?
        ORDER BY e.created_at ASC, e.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut schedule: Vec<DaySchedule> = Weekday::ALL
        .into_iter()
        .map(|day| DaySchedule {
            day,
            exercises: Vec::new(),
        })
        .collect();

    for row in rows {
        // 판별값(discriminant)이 Weekday::ALL의 위치와 같습니다.
        schedule[row.day as usize].exercises.push(row.exercise);
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    fn bench_press() -> CreateExerciseRequest {
        CreateExerciseRequest {
            name: "Bench Press".to_string(),
            sets: 3,
            reps: 8,
            weight: 60.0,
            notes: Some("pause at the bottom".to_string()),
        }
    }

    #[tokio::test]
    async fn workout_is_created_once_per_day() {
        let pool = setup_test_db().await;

        let first = get_or_create_workout(&pool, "user-1", Weekday::Monday).await.unwrap();
        let second = get_or_create_workout(&pool, "user-1", Weekday::Monday).await.unwrap();
        let other_day = get_or_create_workout(&pool, "user-1", Weekday::Tuesday).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_ne!(first.id, other_day.id);
        assert_eq!(first.day, Weekday::Monday);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workouts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn exercises_are_listed_per_user_and_day() {
        let pool = setup_test_db().await;

        let monday = get_or_create_workout(&pool, "user-1", Weekday::Monday).await.unwrap();
        let created = create_exercise(&pool, &monday.id, &bench_press()).await.unwrap();
        assert_eq!(created.name, "Bench Press");
        assert_eq!(created.notes.as_deref(), Some("pause at the bottom"));

        let theirs = get_or_create_workout(&pool, "user-2", Weekday::Monday).await.unwrap();
        create_exercise(&pool, &theirs.id, &bench_press()).await.unwrap();

        let mine = list_exercises_for_day(&pool, "user-1", Weekday::Monday).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, created.id);

        let empty = list_exercises_for_day(&pool, "user-1", Weekday::Friday).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn schedule_has_every_day_in_order() {
        let pool = setup_test_db().await;

        let sunday = get_or_create_workout(&pool, "user-1", Weekday::Sunday).await.unwrap();
        create_exercise(&pool, &sunday.id, &bench_press()).await.unwrap();
        create_exercise(
            &pool,
            &sunday.id,
            &CreateExerciseRequest {
                name: "Deadlift".to_string(),
                notes: None,
                ..bench_press()
            },
        )
        .await
        .unwrap();

        let schedule = list_schedule(&pool, "user-1").await.unwrap();

        let days: Vec<Weekday> = schedule.iter().map(|slot| slot.day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());
        assert_eq!(schedule[6].exercises.len(), 2);
        assert_eq!(schedule[6].exercises[1].name, "Deadlift");
        assert!(schedule[0].exercises.is_empty());
    }

    #[tokio::test]
    async fn store_rejects_invalid_exercise() {
        let pool = setup_test_db().await;
        let workout = get_or_create_workout(&pool, "user-1", Weekday::Monday).await.unwrap();

        let result = create_exercise(
            &pool,
            &workout.id,
            &CreateExerciseRequest {
                sets: 0,
                ..bench_press()
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
