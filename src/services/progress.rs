//! # 주간 진행도 집계
//!
//! 한 사용자의 완료 기록들로부터 대시보드에 표시할 요약 통계를 계산합니다.
//!
//! - 최근 7일 윈도우 안의 완료 횟수
//! - 주간 목표(7회) 대비 달성률(%)
//! - 칼로리/수분 섭취량 평균
//! - 가장 최근에 기록된 체중
//!
//! ## 윈도우
//! 기록의 날짜는 그날 00:00 UTC 시각으로 보고 `now - 7일` 시각과 비교합니다.
//! ```text
//! now - 7일  <=  record.date 00:00  <=  now     (양 끝 포함)
//! ```
//! 날짜 하나에 기록이 하나씩이면 윈도우 안의 날짜는 최대 7개입니다.
//! `now`가 정확히 자정일 때만 7일 전 날짜가 포함됩니다.
//! 미래 날짜의 기록은 윈도우 밖입니다.
//!
//! ## 값이 이상한 지표
//! 음수, NaN, 무한대인 지표는 평균과 최근 체중 계산에서 "기록 없음"처럼 무시합니다.
//! 완료 횟수에는 그대로 포함됩니다.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::models::CompletedWorkout;

/// 주간 목표 완료 횟수 (일주일 = 7일)
pub const WEEKLY_GOAL: u32 = 7;

/// 집계 윈도우 길이(일)
pub const WINDOW_DAYS: i64 = 7;

/// 대시보드에 표시할 진행도 요약
///
/// 평균과 최근 체중의 `None`은 "데이터 없음"이며 JSON에서는 `null`로 나갑니다.
/// 0과 혼동하지 않도록 숫자로 채우지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub completed_this_week: usize,
    pub weekly_goal: u32,
    /// 0 ~ 100
    pub goal_percentage: u8,
    pub avg_calories: Option<f64>,
    pub avg_water_intake: Option<f64>,
    pub latest_weight: Option<f64>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

/// `now` 기준으로 `records`를 집계합니다.
///
/// 입력이 비어 있어도 실패하지 않습니다.
pub fn aggregate(records: &[CompletedWorkout], now: DateTime<Utc>) -> ProgressSummary {
    let window_end = now.date_naive();
    let window_start = first_date_at_or_after(now - Duration::days(WINDOW_DAYS));

    let in_window: Vec<&CompletedWorkout> = records
        .iter()
        .filter(|record| record.date >= window_start && record.date <= window_end)
        .collect();

    let completed_this_week = in_window.len();

    ProgressSummary {
        completed_this_week,
        weekly_goal: WEEKLY_GOAL,
        goal_percentage: goal_percentage(completed_this_week),
        avg_calories: average(in_window.iter().filter_map(|r| usable(r.calories))),
        avg_water_intake: average(in_window.iter().filter_map(|r| usable(r.water_intake))),
        latest_weight: latest_weight(&in_window),
        window_start,
        window_end,
    }
}

/// `round(min(count / 7, 1) * 100)`
pub fn goal_percentage(completed: usize) -> u8 {
    let ratio = (completed as f64 / f64::from(WEEKLY_GOAL)).min(1.0);
    (ratio * 100.0).round() as u8
}

// 00:00 UTC가 `instant` 이후(같으면 포함)인 첫 날짜
fn first_date_at_or_after(instant: DateTime<Utc>) -> NaiveDate {
    let date = instant.date_naive();
    if instant.time() == NaiveTime::MIN {
        date
    } else {
        date + Duration::days(1)
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

// 합계 대신 누적 평균을 갱신하므로 큰 값이 여럿이어도 무한대로 넘치지 않습니다.
fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut mean = None;
    for (i, v) in values.enumerate() {
        let prev = mean.unwrap_or(0.0);
        mean = Some(prev + (v - prev) / (i + 1) as f64);
    }
    mean
}

// 같은 날짜가 여럿이면 입력 순서상 마지막 기록이 이깁니다 (`>=` 비교).
// 저장소는 생성 순서로 돌려주므로 가장 나중에 만들어진 기록입니다.
fn latest_weight(records: &[&CompletedWorkout]) -> Option<f64> {
    let mut latest: Option<(NaiveDate, f64)> = None;
    for record in records {
        let Some(weight) = usable(record.weight) else {
            continue;
        };
        match latest {
            Some((date, _)) if record.date < date => {}
            _ => latest = Some((record.date, weight)),
        }
    }
    latest.map(|(_, weight)| weight)
}
