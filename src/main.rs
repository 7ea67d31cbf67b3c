//! # PowerTrack 웹 서버 진입점
//!
//! 주간 운동 계획, 운동 완료 기록, 일일 건강 지표(칼로리/수분/체중),
//! 주간 진행도 요약을 제공하는 API 서버입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 및 마이그레이션 실행
//! 4. API 라우터 조립 (`routes::app`)
//! 5. CORS / 요청 로깅 / 프론트엔드 정적 파일 레이어 추가
//! 6. HTTP 서버 시작

// ── 모듈 선언 ──
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

// 테스트 빌드에서만 포함되는 헬퍼 (인메모리 DB, 토큰 서명 등)
#[cfg(test)]
mod test_utils;

use std::{path::Path, sync::Arc};

use anyhow::Result;
use config::Config;
use routes::AppState;
use services::SystemClock;
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 powertrack, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "powertrack=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting PowerTrack server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 + 마이그레이션 ──
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 5단계: 애플리케이션 상태(State) 생성 ──
    // 실제 서버는 시스템 시계를 쓰고, 테스트는 FixedClock을 끼워 넣습니다.
    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
        jwt_audience: config.jwt_audience.clone(),
        clock: Arc::new(SystemClock),
    };

    // ── 6단계: 라우터 + 미들웨어 ──
    // 개발 환경에서는 CORS를 모두 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = routes::app(state);

    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다.
    // SPA이므로 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let frontend_dist = Path::new(&config.frontend_dist);
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);

        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));

        api.fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");

        api.layer(cors).layer(TraceLayer::new_for_http())
    };

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
