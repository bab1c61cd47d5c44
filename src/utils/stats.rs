//! Online statistics

/// Online mean calculation by incremental averaging
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct OnlineMean {
    mean: f64,
    count: u64,
}

impl OnlineMean {
    pub const fn new() -> Self {
        Self {
            mean: 0.0,
            count: 0,
        }
    }

    /// The mean of all accumulated values. Zero if there are none.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of accumulated values.
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Add a new value to the calculation.
    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    /// Remove all accumulated values.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod online_mean {
    use super::*;

    #[test]
    fn push_values() {
        let mut stats = OnlineMean::new();
        for x in [1.0, 2.0, 3.0, 4.0] {
            stats.push(x);
        }
        assert_eq!(stats.count(), 4);
        assert!((stats.mean() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn clear_resets() {
        let mut stats = OnlineMean::new();
        stats.push(5.0);
        stats.push(7.0);
        stats.clear();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
    }
}
