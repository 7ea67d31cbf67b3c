//! # 완료 기록 병합(Reconcile) 로직
//!
//! 일일 지표가 제출되었을 때 새 완료 기록을 만들지(Create),
//! 기존 기록에 병합할지(Update)를 결정하는 순수 함수들입니다.
//!
//! ## 흐름
//! ```text
//! 조회(db::find_completed_workouts) → reconcile_candidates() → Action → db::apply_action()
//! ```
//! 이 모듈은 결정만 하고 DB에는 접근하지 않습니다.
//! 결정된 `Action`을 실제로 적용하는 것은 호출하는 쪽의 책임입니다.
//!
//! ## 필드별 병합 규칙
//! | 들어온 값 | 기존 값 | 결과 |
//! |-----------|---------|------|
//! | `Some(x)` | 무엇이든 | `Some(x)` |
//! | `None`    | `v`     | `v` (유지) |
//!
//! `Some(0.0)`은 값이 있는 것으로 취급합니다. 체중만 제출해도
//! 이전에 기록한 칼로리는 지워지지 않습니다.

use thiserror::Error;

use crate::models::{CompletedWorkout, CompletionKey, Metrics};

/// 병합 결정 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 해당 키의 기록이 없으므로 새로 만듭니다.
    Create { key: CompletionKey, metrics: Metrics },
    /// 기존 기록(`id`)의 지표를 병합된 값으로 교체합니다.
    Update { id: String, metrics: Metrics },
}

impl Action {
    /// 이 Action이 기록할 지표
    pub fn metrics(&self) -> &Metrics {
        match self {
            Action::Create { metrics, .. } | Action::Update { metrics, .. } => metrics,
        }
    }

    /// 응답에 쓰는 결과 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Create { .. } => "created",
            Action::Update { .. } => "updated",
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Action::Create { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    /// 유일해야 할 키에 기록이 여러 개 있습니다.
    #[error("{count} completed workouts share key {key}")]
    Ambiguous { key: CompletionKey, count: usize },
}

/// 기존 기록 유무에 따라 Create 또는 Update를 결정합니다.
///
/// - `existing`이 None이면 `incoming`을 그대로 담은 Create
/// - 있으면 필드별로 `incoming`이 우선하고, 빠진 필드는 기존 값을 유지하는 Update
pub fn reconcile(
    key: &CompletionKey,
    incoming: &Metrics,
    existing: Option<&CompletedWorkout>,
) -> Action {
    match existing {
        None => Action::Create {
            key: key.clone(),
            metrics: *incoming,
        },
        Some(record) => Action::Update {
            id: record.id.clone(),
            metrics: merge(incoming, &record.metrics()),
        },
    }
}

/// 조회 결과 중 키가 정확히 일치하는 기록을 고릅니다.
///
/// 0개면 None, 1개면 그 기록, 2개 이상이면 `ReconcileError::Ambiguous`.
/// 여러 개 중 하나를 임의로 고르지 않습니다.
pub fn select_existing<'a>(
    key: &CompletionKey,
    candidates: &'a [CompletedWorkout],
) -> Result<Option<&'a CompletedWorkout>, ReconcileError> {
    let mut matches = candidates.iter().filter(|record| record.key() == *key);
    let first = matches.next();
    let extra = matches.count();

    if extra > 0 {
        return Err(ReconcileError::Ambiguous {
            key: key.clone(),
            count: extra + 1,
        });
    }

    Ok(first)
}

/// 저장소 조회 결과를 그대로 받아 병합을 결정합니다.
pub fn reconcile_candidates(
    key: &CompletionKey,
    incoming: &Metrics,
    candidates: &[CompletedWorkout],
) -> Result<Action, ReconcileError> {
    let existing = select_existing(key, candidates)?;
    Ok(reconcile(key, incoming, existing))
}

// `Option::or`는 None만 "없음"으로 보므로 0.0은 그대로 남습니다.
fn merge(incoming: &Metrics, current: &Metrics) -> Metrics {
    Metrics {
        calories: incoming.calories.or(current.calories),
        water_intake: incoming.water_intake.or(current.water_intake),
        weight: incoming.weight.or(current.weight),
    }
}
