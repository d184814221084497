//! Anniversary engine: time elapsed since a fixed start instant.
//!
//! Runs forever; every tick (and once at construction) recomputes whole
//! calendar months since the start, then the day/hour/minute/second span from
//! the last monthly anchor to now.

use chrono::{Datelike, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::countdown::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use super::instant::{instant_or_now, local_now, pad2};
use crate::events::Event;
use crate::surface::{write_text, DisplaySurface, Target};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elapsed {
    pub months: u32,
    /// Days past the last monthly anchor. Unbounded.
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} months {} days {}:{}:{}",
            self.months,
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds)
        )
    }
}

/// Elapsed calendar time from `start` to `now`.
///
/// Month arithmetic uses `year * 12 + month`, minus one when today's
/// day-of-month is before the start's. Two cases differ from that plain
/// count so no field goes negative:
///
/// - On the anniversary day itself, before the start's time of day, one more
///   month is borrowed (Jan 15 10:00 to Feb 15 08:00 is 0 months 30 days).
/// - Adding months clamps to the end of shorter months (Jan 31 + 1 month is
///   Feb 28/29) instead of rolling over into the next month.
///
/// A start in the future yields all zeros.
pub fn elapsed_between(start: NaiveDateTime, now: NaiveDateTime) -> Elapsed {
    if now <= start {
        return Elapsed::default();
    }

    let month_index = |dt: NaiveDateTime| i64::from(dt.year()) * 12 + i64::from(dt.month0());
    let mut months = month_index(now) - month_index(start);
    if now.day() < start.day() {
        months -= 1;
    }
    let mut months = months.max(0) as u32;
    let mut anchor = add_months(start, months);
    // Same day-of-month but an earlier time of day.
    while months > 0 && anchor > now {
        months -= 1;
        anchor = add_months(start, months);
    }

    let diff = (now - anchor).num_milliseconds().max(0);
    Elapsed {
        months,
        days: diff / MS_PER_DAY,
        hours: (diff / MS_PER_HOUR) % 24,
        minutes: (diff / MS_PER_MINUTE) % 60,
        seconds: (diff / MS_PER_SECOND) % 60,
    }
}

fn add_months(start: NaiveDateTime, months: u32) -> NaiveDateTime {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(start)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnniversaryEngine {
    start: NaiveDateTime,
    last: Elapsed,
}

impl AnniversaryEngine {
    /// Create the engine and compute the first value against `now`.
    pub fn new(start: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self {
            start,
            last: elapsed_between(start, now),
        }
    }

    /// Build from the optional configured start; absent or unparsable means "now".
    pub fn from_config(start: Option<&str>, now: NaiveDateTime) -> Self {
        Self::new(instant_or_now(start, now), now)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn elapsed(&self) -> Elapsed {
        self.last
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(local_now())
    }

    pub fn tick_at(&mut self, now: NaiveDateTime) -> Option<Event> {
        self.last = elapsed_between(self.start, now);
        Some(Event::AnniversaryTicked { elapsed: self.last })
    }

    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        let e = self.last;
        write_text(surface, Target::AnniversaryMonths, &e.months.to_string());
        write_text(surface, Target::AnniversaryDays, &pad2(e.days));
        write_text(surface, Target::AnniversaryHours, &pad2(e.hours));
        write_text(surface, Target::AnniversaryMinutes, &pad2(e.minutes));
        write_text(surface, Target::AnniversarySeconds, &pad2(e.seconds));
    }
}
