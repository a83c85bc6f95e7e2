use dashmap::DashMap;
use danga_errors::AppError;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

const PER_MINUTE: Window = Window {
    limit: 20,
    length: Duration::from_secs(60),
};
const PER_HOUR: Window = Window {
    limit: 300,
    length: Duration::from_secs(3600),
};
const SWEEP_EVERY: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy)]
struct Window {
    limit: u32,
    length: Duration,
}

/// Fixed window counter; restarts once `length` has passed since `started`.
#[derive(Debug, Clone, Copy)]
struct Counter {
    used: u32,
    started: Instant,
}

impl Counter {
    fn new(now: Instant) -> Self {
        Self { used: 0, started: now }
    }

    fn roll(&mut self, window: Window, now: Instant) {
        if now.duration_since(self.started) >= window.length {
            *self = Self::new(now);
        }
    }

    /// Seconds until the window reopens, if it is exhausted.
    fn retry_after(&self, window: Window, now: Instant) -> Option<u64> {
        (self.used >= window.limit).then(|| {
            window
                .length
                .saturating_sub(now.duration_since(self.started))
                .as_secs()
                .max(1)
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Budget {
    minute: Counter,
    hour: Counter,
}

impl Budget {
    fn new(now: Instant) -> Self {
        Self {
            minute: Counter::new(now),
            hour: Counter::new(now),
        }
    }
}

/// Per-user budget for mutating actions (likes, comments, deletions, reports).
#[derive(Clone)]
pub struct RateLimiter {
    budgets: Arc<DashMap<Uuid, Budget>>,
    last_sweep: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            budgets: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn check(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.check_at(user_id, Instant::now())
    }

    fn check_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        self.sweep(now);

        let mut budget = self
            .budgets
            .entry(user_id)
            .or_insert_with(|| Budget::new(now));

        budget.minute.roll(PER_MINUTE, now);
        budget.hour.roll(PER_HOUR, now);

        if let Some(secs) = budget.minute.retry_after(PER_MINUTE, now) {
            tracing::debug!(%user_id, secs, "minute budget exhausted");
            return Err(RateLimitError::TooManyPerMinute(secs));
        }
        if let Some(secs) = budget.hour.retry_after(PER_HOUR, now) {
            tracing::warn!(%user_id, secs, "hourly budget exhausted");
            return Err(RateLimitError::TooManyPerHour(secs));
        }

        budget.minute.used += 1;
        budget.hour.used += 1;
        Ok(())
    }

    /// Drops budgets whose hour window has lapsed.
    fn sweep(&self, now: Instant) {
        let Ok(mut last_sweep) = self.last_sweep.lock() else {
            return;
        };
        if now.duration_since(*last_sweep) < SWEEP_EVERY {
            return;
        }

        self.budgets
            .retain(|_, budget| now.duration_since(budget.hour.started) < PER_HOUR.length);
        *last_sweep = now;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    TooManyPerMinute(u64),
    TooManyPerHour(u64),
}

impl RateLimitError {
    pub fn message(&self) -> String {
        match self {
            Self::TooManyPerMinute(secs) => {
                format!("요청이 너무 많습니다. {}초 후 다시 시도해주세요.", secs)
            }
            Self::TooManyPerHour(secs) => {
                format!(
                    "한 시간 요청 한도에 도달했습니다. {}분 후 다시 시도해주세요.",
                    secs.div_ceil(60)
                )
            }
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        AppError::Conflict(err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_budget_is_per_user() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        let (busy, other) = (Uuid::new_v4(), Uuid::new_v4());

        for _ in 0..PER_MINUTE.limit {
            assert!(limiter.check_at(busy, now).is_ok());
        }

        assert!(matches!(
            limiter.check_at(busy, now),
            Err(RateLimitError::TooManyPerMinute(60))
        ));
        assert!(limiter.check_at(other, now).is_ok());
    }

    #[test]
    fn test_minute_window_reopens() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        let user = Uuid::new_v4();

        for _ in 0..PER_MINUTE.limit {
            limiter.check_at(user, start).unwrap();
        }
        assert!(limiter.check_at(user, start + Duration::from_secs(30)).is_err());
        assert!(limiter.check_at(user, start + Duration::from_secs(60)).is_ok());
    }

    #[test]
    fn test_hour_budget_survives_minute_rollover() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        let user = Uuid::new_v4();

        let mut at = start;
        for i in 0..PER_HOUR.limit {
            if i > 0 && i % PER_MINUTE.limit == 0 {
                at += PER_MINUTE.length;
            }
            limiter.check_at(user, at).unwrap();
        }

        at += PER_MINUTE.length;
        assert!(matches!(
            limiter.check_at(user, at),
            Err(RateLimitError::TooManyPerHour(_))
        ));
    }

    #[test]
    fn test_limit_maps_to_conflict() {
        let err: AppError = RateLimitError::TooManyPerMinute(12).into();
        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("12초")));
        assert!(RateLimitError::TooManyPerHour(61).message().contains("2분"));
    }
}
