//! # 비즈니스 로직 모듈
//!
//! DB나 HTTP와 무관한 순수 계산 로직입니다.
//! - `reconcile`: 일일 지표 제출 시 새 기록 생성/기존 기록 병합 결정
//! - `progress`: 주간 진행도 집계 (달성률, 평균, 최근 체중)
//! - `clock`: 현재 시각 주입용 트레이트

pub mod clock;
pub mod progress;
pub mod reconcile;

pub use clock::{Clock, SystemClock};
