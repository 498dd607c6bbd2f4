use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

/// Source of the current operator-local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall-clock time in the server's local time zone.
///
/// De Lijn schedules carry naive Europe/Brussels times, so the host must run
/// with that zone (e.g. `TZ=Europe/Brussels`); on a UTC host every estimate
/// is shifted by one or two hours.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// The Monday of the week `day` falls in (`day` itself on a Monday).
pub fn most_recent_monday(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}
