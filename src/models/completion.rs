//! # 운동 완료 기록 및 일일 건강 지표 모델
//!
//! 사용자가 특정 날짜에 특정 요일의 운동을 마쳤다는 기록(`CompletedWorkout`)과,
//! 그 기록에 붙는 선택적인 건강 지표(칼로리, 수분 섭취량, 체중)를 정의합니다.
//!
//! ## 유일성
//! (사용자, 요일, 날짜) 조합마다 완료 기록은 최대 하나입니다.
//! 같은 조합으로 지표를 다시 제출하면 새 행을 만들지 않고 기존 행에 병합합니다.
//! 병합 규칙은 `services::reconcile`에 있습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Weekday;

/// 완료 기록 엔티티 — DB의 `completed_workouts` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CompletedWorkout {
    /// 고유 식별자 (UUIDv7)
    pub id: String,
    /// 소유 사용자 ID
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub day: Weekday,
    /// 날짜 단위 기록 (시각 없음, "YYYY-MM-DD")
    pub date: NaiveDate,
    /// 섭취 칼로리 — None이면 "기록 없음" (0과 구분됨)
    pub calories: Option<f64>,
    /// 수분 섭취량(ml)
    pub water_intake: Option<f64>,
    /// 체중(kg)
    pub weight: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl CompletedWorkout {
    /// 이 기록의 유일성 키
    pub fn key(&self) -> CompletionKey {
        CompletionKey {
            user_id: self.user_id.clone(),
            day: self.day,
            date: self.date,
        }
    }

    /// 이 기록에 저장된 지표들
    pub fn metrics(&self) -> Metrics {
        Metrics {
            calories: self.calories,
            water_intake: self.water_intake,
            weight: self.weight,
        }
    }
}

/// 완료 기록의 논리적 키: (사용자 ID, 요일, 날짜)
///
/// 세 값이 모두 정확히 같아야 같은 키입니다. 날짜를 느슨하게 맞추지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompletionKey {
    pub user_id: String,
    pub day: Weekday,
    pub date: NaiveDate,
}

impl fmt::Display for CompletionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.user_id, self.day, self.date)
    }
}

/// 일일 건강 지표 묶음
///
/// 각 필드의 `None`은 "제출하지 않음", `Some(0.0)`은 "0으로 제출함"입니다.
/// 두 경우는 병합 시 다르게 취급됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub calories: Option<f64>,
    pub water_intake: Option<f64>,
    pub weight: Option<f64>,
}

impl Metrics {
    /// 지표 이름과 값의 쌍 — 검증이나 로그에서 필드를 순회할 때 사용
    pub fn fields(&self) -> [(&'static str, Option<f64>); 3] {
        [
            ("calories", self.calories),
            ("water_intake", self.water_intake),
            ("weight", self.weight),
        ]
    }
}

/// 운동 완료 표시 요청 — `POST /api/v1/completions`
///
/// `date`를 생략하면 서버 기준 오늘(UTC) 날짜를 사용합니다.
/// 요일과 날짜는 핸들러에서 직접 파싱하여 잘못된 값에 400을 돌려줍니다.
#[derive(Debug, Deserialize)]
pub struct CompleteDayRequest {
    pub day: String,
    pub date: Option<String>,
}

/// 일일 지표 저장 요청 — `PUT /api/v1/metrics/{day}`
///
/// 모든 지표는 선택 항목입니다. 보내지 않은 지표는 기존 값이 유지됩니다.
#[derive(Debug, Deserialize)]
pub struct SaveMetricsRequest {
    pub date: Option<String>,
    pub calories: Option<f64>,
    pub water_intake: Option<f64>,
    pub weight: Option<f64>,
}

impl SaveMetricsRequest {
    pub fn metrics(&self) -> Metrics {
        Metrics {
            calories: self.calories,
            water_intake: self.water_intake,
            weight: self.weight,
        }
    }
}

/// `GET /api/v1/metrics/{day}?date=YYYY-MM-DD`의 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub date: Option<String>,
}

/// 지표 저장 결과 — 새로 만들었는지(`created`), 병합했는지(`updated`)와 최종 기록
#[derive(Debug, Serialize)]
pub struct SaveMetricsResponse {
    pub action: &'static str,
    pub record: CompletedWorkout,
}
