use chrono::{DateTime, NaiveDate, Utc};

/// 현재 시각의 출처
///
/// 핸들러가 `Utc::now()`를 직접 부르지 않고 이 트레이트를 통해 시각을 얻으므로,
/// 테스트에서는 고정된 시각으로 주간 집계를 검증할 수 있습니다.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// 오늘 날짜(UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
