//! # 주간 운동 계획 모델 정의
//!
//! 요일별 운동 계획(Workout)과 그 안의 운동 항목(Exercise)을 정의합니다.
//!
//! ## 관계
//! ```text
//! 사용자 ─1:N─ Workout(요일당 최대 1개) ─1:N─ Exercise
//! ```
//! Workout은 해당 요일에 첫 운동 항목을 추가할 때 만들어지며,
//! (사용자, 요일) 조합마다 하나만 존재합니다.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// 요일 — 운동 계획과 완료 기록의 `day` 값
///
/// 직렬화할 때는 "Monday"처럼 첫 글자만 대문자인 이름을 쓰고,
/// 입력은 대소문자를 구분하지 않습니다("monday", "MONDAY" 모두 허용).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 월요일부터 일요일까지 순서대로
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// DB에 저장되는 정규 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown day of week: {0}")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

// serde의 try_from, sqlx의 try_from 둘 다 이 변환을 사용합니다.
impl TryFrom<String> for Weekday {
    type Error = ParseWeekdayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 운동 계획 엔티티 — DB의 `workouts` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Workout {
    /// 고유 식별자 (UUIDv7)
    pub id: String,
    /// 소유 사용자 ID
    pub user_id: String,
    /// DB에는 TEXT로 저장되고, 읽을 때 `Weekday`로 변환됩니다.
    #[sqlx(try_from = "String")]
    pub day: Weekday,
    pub created_at: String,
}

/// 운동 항목 엔티티 — DB의 `exercises` 테이블 한 행에 대응합니다.
///
/// 생성 이후에는 수정/삭제하지 않습니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: String,
    /// 이 항목이 속한 운동 계획의 ID (외래키)
    pub workout_id: String,
    /// 운동 이름 (예: "Bench Press")
    pub name: String,
    /// 세트 수 (1 이상)
    pub sets: i64,
    /// 세트당 반복 횟수 (1 이상)
    pub reps: i64,
    /// 중량(kg), 맨몸 운동은 0
    pub weight: f64,
    /// 메모 — 선택 항목
    pub notes: Option<String>,
    pub created_at: String,
}

/// 운동 항목 추가 요청 — `POST /api/v1/workouts/{day}/exercises`의 요청 본문
///
/// 입력 폼의 기본값(3세트, 10회, 0kg)을 그대로 따르므로
/// 이름 외의 필드는 생략할 수 있습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    #[serde(default = "default_sets")]
    pub sets: i64,
    #[serde(default = "default_reps")]
    pub reps: i64,
    #[serde(default)]
    pub weight: f64,
    pub notes: Option<String>,
}

fn default_sets() -> i64 {
    3
}

fn default_reps() -> i64 {
    10
}

/// 주간 일정 응답의 한 칸 — 요일과 그 요일의 운동 항목들
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub exercises: Vec<Exercise>,
}
