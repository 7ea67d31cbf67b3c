//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `JWT_SECRET`: 외부 인증 서비스가 토큰 서명에 쓰는 공유 비밀키
//! - `JWT_AUDIENCE`: 토큰의 `aud` 클레임 기대값 (선택)
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리 (선택)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 파일 경로 (예: "sqlite:data/powertrack.db?mode=rwc")
    pub database_url: String,
    /// 액세스 토큰 검증에 사용하는 비밀키
    ///
    /// 토큰 발급(로그인/회원가입)은 외부 인증 서비스가 담당하고,
    /// 이 서버는 서명과 만료만 확인합니다.
    pub jwt_secret: String,
    /// 토큰의 `aud` 클레임 기대값. None이면 audience 검사를 하지 않습니다.
    pub jwt_audience: Option<String>,
    /// 프론트엔드 빌드 결과물 경로 (기본값: "../frontend/dist")
    pub frontend_dist: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`과 `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?, // 필수
            jwt_secret: env::var("JWT_SECRET")?,     // 필수

            // 빈 문자열은 "설정 안 함"으로 취급합니다.
            // .ok(): Result → Option 변환, .filter(): 조건을 만족하지 않으면 None
            jwt_audience: env::var("JWT_AUDIENCE").ok().filter(|aud| !aud.is_empty()),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            // 포트 번호는 문자열 → 숫자 변환이 필요합니다.
            // 파싱 실패 시 기본값 3000 사용
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}
