use std::cell::Cell;

use chrono::{DateTime, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::model::{Frequency, TimeOfDay};

/// Source of "now" for the store. Injected so schedule math is reproducible.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the user's local time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A manually driven clock in UTC.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    type Tz = Utc;

    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Computes when a schedule is next due, strictly after `now`.
///
/// The candidate is today at `time` (seconds zeroed) in `now`'s time zone.
/// If that is not in the future, it moves forward one `frequency` unit.
/// Monthly steps clamp to the last day of the target month, so Jan 31
/// becomes Feb 28 (or Feb 29).
pub fn next_run<Tz: TimeZone>(
    frequency: Frequency,
    time: TimeOfDay,
    now: &DateTime<Tz>,
) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();

    let candidate = at_time(&tz, today, time);
    if candidate > *now {
        return candidate;
    }

    at_time(&tz, advance(frequency, today), time)
}

fn advance(frequency: Frequency, date: NaiveDate) -> NaiveDate {
    let next = match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
    };
    next.unwrap_or(NaiveDate::MAX)
}

fn at_time<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: TimeOfDay) -> DateTime<Tz> {
    let wall = date
        .and_hms_opt(time.hour(), time.minute(), 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    resolve_local(tz, wall)
}

/// Maps a wall-clock time to an instant. Ambiguous times take the earlier
/// instant; times inside a DST gap move to the first valid minute after.
fn resolve_local<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&wall).earliest() {
        return dt;
    }
    for minutes in 1..=240 {
        if let Some(dt) = tz
            .from_local_datetime(&(wall + Duration::minutes(minutes)))
            .earliest()
        {
            return dt;
        }
    }
    tz.from_utc_datetime(&wall)
}
