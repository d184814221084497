//! Countdown engine.
//!
//! Wall-clock based like the rest of the timers: no internal thread, the
//! caller invokes `tick()` once per [`TICK_INTERVAL_MS`].
//!
//! ```text
//! Running --(now > target)--> Expired
//! ```
//!
//! `Expired` is terminal. The transition emits exactly one
//! [`Event::CountdownExpired`]; later ticks return `None` and leave the last
//! remaining-time fields untouched.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::instant::{local_now, pad2};
use crate::events::Event;
use crate::surface::{write_text, write_visible, DisplaySurface, Target};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Whole days/hours/minutes/seconds of a non-negative millisecond span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Split `ms` (clamped at zero) into whole units.
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Milliseconds represented by the whole fields (sub-second part dropped).
    pub fn as_millis(&self) -> i64 {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
    }

    /// Zero-padded `[days, hours, minutes, seconds]`.
    pub fn fields(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fields().join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Running,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEngine {
    target: NaiveDateTime,
    expired_message: String,
    state: CountdownState,
    /// Fields from the last successful tick, if any.
    last: Option<Remaining>,
}

impl CountdownEngine {
    pub fn new(target: NaiveDateTime, expired_message: impl Into<String>) -> Self {
        Self {
            target,
            expired_message: expired_message.into(),
            state: CountdownState::Running,
            last: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    pub fn last(&self) -> Option<Remaining> {
        self.last
    }

    pub fn expired_message(&self) -> &str {
        &self.expired_message
    }

    /// Signed milliseconds from `now` to the target.
    pub fn remaining_ms_at(&self, now: NaiveDateTime) -> i64 {
        (self.target - now).num_milliseconds()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(local_now())
    }

    /// Recompute against `now`. Returns `None` once expired.
    pub fn tick_at(&mut self, now: NaiveDateTime) -> Option<Event> {
        if self.state == CountdownState::Expired {
            return None;
        }
        let diff = self.remaining_ms_at(now);
        if diff < 0 {
            self.state = CountdownState::Expired;
            tracing::debug!(target_at = %self.target, "countdown expired");
            return Some(Event::CountdownExpired {
                message: self.expired_message.clone(),
            });
        }
        let remaining = Remaining::from_millis(diff);
        self.last = Some(remaining);
        Some(Event::CountdownTicked { remaining })
    }

    // ── Render ───────────────────────────────────────────────────────

    pub fn render(&self, surface: &mut dyn DisplaySurface) {
        if self.is_expired() {
            for target in DIGIT_TARGETS {
                write_visible(surface, target, false);
            }
            write_text(surface, Target::CountdownBlock, &self.expired_message);
            return;
        }
        if let Some(remaining) = self.last {
            for (target, value) in DIGIT_TARGETS.into_iter().zip(remaining.fields()) {
                write_text(surface, target, &value);
            }
        }
    }
}

const DIGIT_TARGETS: [Target; 4] = [
    Target::CountdownDays,
    Target::CountdownHours,
    Target::CountdownMinutes,
    Target::CountdownSeconds,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn target() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn one_hour_before_target() {
        let mut engine = CountdownEngine::new(target(), "Time's up!");
        let now = target() - Duration::hours(1);
        assert_eq!(engine.remaining_ms_at(now), 3_600_000);

        let event = engine.tick_at(now);
        let expected = Remaining {
            days: 0,
            hours: 1,
            minutes: 0,
            seconds: 0,
        };
        assert_eq!(event, Some(Event::CountdownTicked { remaining: expected }));
        assert_eq!(expected.to_string(), "00 01 00 00");
    }

    #[test]
    fn exactly_at_target_is_still_running() {
        let mut engine = CountdownEngine::new(target(), "Time's up!");
        let event = engine.tick_at(target());
        assert!(matches!(event, Some(Event::CountdownTicked { .. })));
        assert_eq!(engine.state(), CountdownState::Running);
        assert_eq!(engine.last(), Some(Remaining::default()));
    }

    #[test]
    fn expires_exactly_once() {
        let mut engine = CountdownEngine::new(target(), "Time's up!");
        engine.tick_at(target() - Duration::seconds(5));
        let before = engine.last();

        let first = engine.tick_at(target() + Duration::milliseconds(1));
        assert_eq!(
            first,
            Some(Event::CountdownExpired {
                message: "Time's up!".into()
            })
        );
        assert!(engine.is_expired());

        for secs in 1..5 {
            assert_eq!(engine.tick_at(target() + Duration::seconds(secs)), None);
        }
        assert_eq!(engine.last(), before);
    }

    #[test]
    fn render_writes_digits_then_message() {
        let mut engine = CountdownEngine::new(target(), "Time's up!");
        let mut surface = MemorySurface::new();

        engine.tick_at(target() - Duration::days(3) - Duration::minutes(7));
        engine.render(&mut surface);
        assert_eq!(surface.text(&Target::CountdownDays), Some("03"));
        assert_eq!(surface.text(&Target::CountdownHours), Some("00"));
        assert_eq!(surface.text(&Target::CountdownMinutes), Some("07"));
        assert_eq!(surface.text(&Target::CountdownSeconds), Some("00"));

        engine.tick_at(target() + Duration::seconds(1));
        engine.render(&mut surface);
        assert_eq!(surface.text(&Target::CountdownBlock), Some("Time's up!"));
        assert_eq!(surface.visible(&Target::CountdownDays), Some(false));
    }

    #[test]
    fn render_before_first_tick_writes_nothing() {
        let engine = CountdownEngine::new(target(), "Time's up!");
        let mut surface = MemorySurface::new();
        engine.render(&mut surface);
        assert_eq!(surface.slots().count(), 0);
    }

    proptest! {
        #[test]
        fn fields_stay_in_range(diff in 0i64..(400 * MS_PER_DAY)) {
            let r = Remaining::from_millis(diff);
            prop_assert!(r.days >= 0);
            prop_assert!((0..24).contains(&r.hours));
            prop_assert!((0..60).contains(&r.minutes));
            prop_assert!((0..60).contains(&r.seconds));
            prop_assert!(r.as_millis() <= diff);
            prop_assert!(diff < r.as_millis() + 1_000);
        }
    }
}
