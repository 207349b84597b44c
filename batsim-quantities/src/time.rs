use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;

use crate::Quantity;

pub type Hours = Quantity<0, 1, 0>;

impl Hours {
    pub const fn from_seconds(seconds: f64) -> Self {
        Self::new(seconds / 3600.0)
    }

    #[must_use]
    pub const fn as_seconds(self) -> f64 {
        self.0.0 * 3600.0
    }
}

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self::from_seconds(time_delta.as_seconds_f64())
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} s", self.as_seconds())
    }
}

impl Debug for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}s", self.as_seconds())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_time_delta() {
        assert_abs_diff_eq!(Hours::from(TimeDelta::minutes(90)).value(), 1.5);
    }
}
