//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `completions`: 운동 완료 기록 조회 및 병합 결정(Action) 적용
//! - `workouts`: 요일별 운동 계획과 운동 항목 쿼리

pub mod completions;
pub mod workouts;

// `crate::db::list_schedule`처럼 바로 접근할 수 있게 재공개합니다.
pub use completions::*;
pub use workouts::*;
