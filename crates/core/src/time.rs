//! Time source for quiz sessions.

use chrono::{DateTime, Duration, Utc};

/// Where a session reads "now" from when it starts and when it is quit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// Always reports the same instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Time elapsed since `since`, never negative.
    #[must_use]
    pub fn elapsed_since(&self, since: DateTime<Utc>) -> Duration {
        (self.now() - since).max(Duration::zero())
    }
}

/// Stable instant for tests: 2024-01-01T09:00:00Z.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::seconds(1_704_099_600)
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn fixed_now_is_new_year_morning() {
        let now = fixed_now();
        assert_eq!((now.year(), now.month(), now.day()), (2024, 1, 1));
        assert_eq!(now.hour(), 9);
        assert_eq!(fixed_clock().now(), now);
    }

    #[test]
    fn elapsed_is_clamped_at_zero() {
        let clock = fixed_clock();
        assert_eq!(
            clock.elapsed_since(fixed_now() - Duration::seconds(75)),
            Duration::seconds(75)
        );
        assert_eq!(
            clock.elapsed_since(fixed_now() + Duration::hours(1)),
            Duration::zero()
        );
    }
}
