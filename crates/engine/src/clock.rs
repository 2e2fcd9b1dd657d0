//! Source of "now" for period computations and default transaction dates.

use std::fmt;

use chrono::{Local, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

pub trait Clock: Send + Sync + fmt::Debug {
    /// Current wall-clock time in the engine's zone.
    fn now(&self) -> NaiveDateTime;

    /// Midnight at the start of the current day.
    fn today(&self) -> NaiveDateTime {
        self.now().date().and_time(NaiveTime::MIN)
    }
}

/// Reads the system clock, in the process local zone or in an explicit IANA
/// zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { timezone: None }
    }

    pub fn in_zone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// A clock frozen at one instant. Handy for tests and replays.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
