// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jws-encoder project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Wall-clock source for issued-at and expiry claims
//!
//! Timestamps are captured in a pinned UTC offset (UTC+9 unless configured
//! otherwise) instead of the host locale. The clock is passed explicitly to
//! the payload builder so tests can freeze time.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::error::JwsError;

/// Default reference offset, in hours east of UTC
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Largest accepted offset magnitude, in hours
pub const MAX_UTC_OFFSET_HOURS: i32 = 23;

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Build a `FixedOffset` from a whole number of hours east of UTC
pub fn offset_from_hours(hours: i32) -> Result<FixedOffset, JwsError> {
    if hours.abs() > MAX_UTC_OFFSET_HOURS {
        return Err(JwsError::input(format!(
            "UTC offset must be within -{MAX_UTC_OFFSET_HOURS}..={MAX_UTC_OFFSET_HOURS} hours, got {hours}"
        )));
    }
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| JwsError::input(format!("invalid UTC offset: {hours} hours")))
}

/// Reads the system clock and expresses it in a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn with_offset_hours(hours: i32) -> Result<Self, JwsError> {
        Ok(Self::new(offset_from_hours(hours)?))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        // 9 hours is always within range
        Self::new(FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap_or(Utc.fix()))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}
