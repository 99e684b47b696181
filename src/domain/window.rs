// Time window domain model
use crate::error::DashboardError;

/// Default window width: one day.
pub const DEFAULT_INTERVAL_SECS: i64 = 3600 * 24;

/// A displayed time range in epoch seconds. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Result<Self, DashboardError> {
        if start >= end {
            return Err(DashboardError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window of `interval` seconds ending at `now`.
    pub fn ending_at(now: i64, interval: i64) -> Result<Self, DashboardError> {
        let start = now.checked_sub(interval).ok_or(DashboardError::WindowOutOfRange {
            start: now,
            end: now,
            delta: interval.saturating_neg(),
        })?;
        Self::new(start, now)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Never overflows, even for a window spanning the whole `i64` range.
    pub fn width(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    /// Moves both bounds by `delta` seconds; the width is unchanged.
    pub fn shifted(&self, delta: i64) -> Result<Self, DashboardError> {
        let out_of_range = DashboardError::WindowOutOfRange {
            start: self.start,
            end: self.end,
            delta,
        };
        match (self.start.checked_add(delta), self.end.checked_add(delta)) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(out_of_range),
        }
    }
}
