//! Progress reported by long-running world operations.

use std::fmt;

/// One progress update.
///
/// Percentages are not monotonic across phases: a multi-step operation may
/// restart at 0 for each step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Progress {
    pub percent: u8,
    pub message: String,
}

impl Progress {
    /// Create a progress update, clamping `percent` to 100.
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            message: message.into(),
        }
    }

    /// Progress for step `done` of `total`, truncated to a whole percent.
    pub fn fraction(done: u64, total: u64, message: impl Into<String>) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((done.min(total) * 100) / total) as u8
        };
        Self::new(percent, message)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}% {}", self.percent, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert_eq!(Progress::fraction(0, 10, "x").percent, 0);
        assert_eq!(Progress::fraction(5, 10, "x").percent, 50);
        assert_eq!(Progress::fraction(1, 3, "x").percent, 33);
        assert_eq!(Progress::fraction(20, 10, "x").percent, 100);
        assert_eq!(Progress::fraction(0, 0, "x").percent, 100);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Progress::new(250, "over").percent, 100);
    }
}
