//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `workout`: 요일(Weekday), 주간 운동 계획(Workout)과 운동 항목(Exercise)
//! - `completion`: 운동 완료 기록(CompletedWorkout)과 일일 건강 지표(Metrics)
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Weekday`처럼 짧게 접근할 수 있습니다.

pub mod completion;
pub mod workout;

pub use completion::*;
pub use workout::*;
