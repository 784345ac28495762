//! Ranged progress values.

use crate::error::ProgressError;

/// 100 percent.
pub const HUNDRED: f64 = 100.;

/// Percent stored right after `configure`; outside of [0, 100] so the next `set_percent` always
/// registers as a change.
const UNSET_PERCENT: f64 = -1.;

/// Which end of the range counts as 0 %.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// As in 1, 2, 3.
    Forward,
    /// As in 3, 2, 1.
    Backward,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

/// Maps between an arbitrary `[min, max]` range and a `[0, 100]` percentage.
///
/// Examples of ranges: `0..100`, `-15..31`, `30.55..99.5`, or any of these walked backward.
///
/// Instances are meant to be reconfigured rather than recreated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRange {
    min: f64,
    max: f64,
    direction: Direction,
    percent: f64,
}

impl Default for ProgressRange {
    fn default() -> Self {
        ProgressRange {
            min: 0.,
            max: HUNDRED,
            direction: Direction::Forward,
            percent: 0.,
        }
    }
}

impl ProgressRange {
    /// Creates a `0..100` forward range at 0 %.
    pub fn new() -> ProgressRange {
        ProgressRange::default()
    }

    /// Creates a configured range.
    pub fn with_range(min: f64, max: f64, direction: Direction) -> Result<Self, ProgressError> {
        let mut progress = ProgressRange::new();
        progress.configure(min, max, direction)?;
        Ok(progress)
    }

    /// Sets the range bounds and direction.
    ///
    /// Fails if `min > max`. Resets the stored percentage so the next `set_percent` call reports a
    /// change, even for 0.
    pub fn configure(&mut self, min: f64, max: f64, direction: Direction) -> Result<(), ProgressError> {
        if min > max {
            return Err(ProgressError::MinAboveMax { min, max });
        }
        self.min = min;
        self.max = max;
        self.direction = direction;
        self.percent = UNSET_PERCENT;
        Ok(())
    }

    /// Sets the progress percentage, clamped to [0, 100].
    ///
    /// Returns true if the stored value changed.
    pub fn set_percent(&mut self, percent: f64) -> bool {
        let percent = clamp_percent(percent);
        if self.percent != percent {
            self.percent = percent;
            true
        } else {
            false
        }
    }

    /// Sets the progress from a value inside the range. Values outside are clamped to the bounds.
    pub fn set_value(&mut self, value: f64) {
        let value = value.max(self.min).min(self.max);
        let offset = match self.direction {
            Direction::Backward => self.max - value,
            Direction::Forward => value - self.min,
        };
        self.set_percent(value_to_percent(self.span(), offset));
    }

    /// Returns the value inside the range matching the current percentage.
    pub fn value(&self) -> f64 {
        let offset = percent_to_value(self.span(), self.percent());
        match self.direction {
            Direction::Backward => self.max - offset,
            Direction::Forward => self.min + offset,
        }
    }

    /// Returns the progress percentage.
    pub fn percent(&self) -> f64 {
        clamp_percent(self.percent)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Converts a percentage of `span` into a distance.
pub fn percent_to_value(span: f64, percent: f64) -> f64 {
    span * percent / HUNDRED
}

/// Converts a distance into a percentage of `span`.
///
/// An empty span maps everything to 0 %.
pub fn value_to_percent(span: f64, value: f64) -> f64 {
    if span == 0. {
        return 0.;
    }
    value / span * HUNDRED
}

fn clamp_percent(percent: f64) -> f64 {
    percent.max(0.).min(HUNDRED)
}
