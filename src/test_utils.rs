//! # 테스트 헬퍼
//!
//! 인메모리 DB, 서명된 테스트 토큰, 바로 호출할 수 있는 라우터를 제공합니다.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::SqlitePool;

use crate::middleware::auth::Claims;
use crate::routes::{self, AppState};
use crate::services::clock::FixedClock;

pub const TEST_SECRET: &str = "test-secret-for-unit-tests";

/// 마이그레이션이 모두 적용된 인메모리 SQLite
///
/// max_connections(1): `sqlite::memory:`는 연결마다 별도의 빈 DB를 열기 때문입니다.
pub async fn setup_test_db() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn sign_token(user_id: &str, exp: DateTime<Utc>, aud: Option<&str>) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp(),
        iat: Some(Utc::now().timestamp()),
        aud: aud.map(str::to_string),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// 한 시간 동안 유효한 `Authorization` 헤더 값
pub fn bearer(user_id: &str) -> String {
    format!(
        "Bearer {}",
        sign_token(user_id, Utc::now() + chrono::Duration::hours(1), None)
    )
}

pub fn test_state(pool: SqlitePool, now: DateTime<Utc>) -> AppState {
    AppState {
        pool,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_audience: None,
        clock: Arc::new(FixedClock(now)),
    }
}

/// `/api/v1` 라우터 (`main`에서 붙이는 CORS/trace 레이어는 제외)
pub async fn test_app(now: DateTime<Utc>) -> (Router, SqlitePool) {
    let pool = setup_test_db().await;
    let app = routes::app(test_state(pool.clone(), now));
    (app, pool)
}
