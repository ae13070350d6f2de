//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use chrono_tz::Tz;
use std::fmt;

const MONTHS_LONG: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const MONTHS_SHORT: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Parse a content API timestamp such as `2021-03-25T19:25:28+0000`
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|date| date.with_timezone(&Utc))
        .ok()
}

/// Formats dates the way pt-BR readers expect them
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    tz: Tz,
}

impl DateFormatter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Long form, e.g. "05 de março de 2021"
    pub fn long_date(&self, date: &DateTime<Utc>) -> String {
        let local = date.with_timezone(&self.tz);
        format!(
            "{:02} de {} de {}",
            local.day(),
            MONTHS_LONG[local.month0() as usize],
            local.year()
        )
    }

    /// Short month form, e.g. "05 de mar. de 2021"
    pub fn short_date(&self, date: &DateTime<Utc>) -> String {
        let local = date.with_timezone(&self.tz);
        format!(
            "{:02} de {} de {}",
            local.day(),
            MONTHS_SHORT[local.month0() as usize],
            local.year()
        )
    }

    /// Long form of a raw API timestamp; empty when it can't be parsed
    pub fn long_from_api(&self, value: Option<&str>) -> String {
        value
            .and_then(parse_timestamp)
            .map(|date| self.long_date(&date))
            .unwrap_or_default()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(chrono_tz::America::Sao_Paulo)
    }
}

/// Elapsed time since publication, classified for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSince {
    Days(i64),
    Hours(i64),
    Minutes(i64),
    /// Five minutes or less
    JustNow,
    /// Publication timestamp is ahead of the clock
    Future,
}

impl TimeSince {
    /// Classify `now - published`. Thresholds are checked from the largest
    /// unit down and every count is truncated, never rounded.
    pub fn between(published: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed = now.signed_duration_since(published).num_milliseconds();

        if elapsed >= DAY_MS {
            TimeSince::Days(elapsed / DAY_MS)
        } else if elapsed >= HOUR_MS {
            TimeSince::Hours(elapsed / HOUR_MS)
        } else if elapsed > 5 * MINUTE_MS {
            TimeSince::Minutes(elapsed / MINUTE_MS)
        } else if elapsed >= 0 {
            TimeSince::JustNow
        } else {
            TimeSince::Future
        }
    }
}

impl fmt::Display for TimeSince {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeSince::Days(n) => write!(f, "{} {}", n, plural(n, "dia", "dias")),
            TimeSince::Hours(n) => write!(f, "{} {}", n, plural(n, "hora", "horas")),
            TimeSince::Minutes(n) => write!(f, "{} {}", n, plural(n, "minuto", "minutos")),
            TimeSince::JustNow => f.write_str("Postado a poucos minutos"),
            TimeSince::Future => Ok(()),
        }
    }
}

fn plural(n: i64, one: &'static str, many: &'static str) -> &'static str {
    if n > 1 {
        many
    } else {
        one
    }
}
