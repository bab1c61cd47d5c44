//! Summary logger
use super::{LogError, Loggable, StatsLogger};
use crate::utils::stats::OnlineMean;
use log::info;
use std::collections::BTreeMap;
use std::fmt;

/// Logger that aggregates values and periodically reports summaries through [`log`].
///
/// Scalars are summarized by their mean and index samples by their empirical distribution.
/// A summary is emitted every `display_period` steps and when the logger is dropped.
#[derive(Debug)]
pub struct SummaryLogger {
    display_period: u64,
    /// Global step index
    index: u64,
    /// Value of `index` at the start of this summary period
    summary_start_index: u64,
    aggregators: BTreeMap<&'static str, Aggregator>,
}

impl SummaryLogger {
    /// Create a logger that summarizes every `display_period` steps.
    ///
    /// A period of 0 never displays except when flushed or dropped.
    pub const fn new(display_period: u64) -> Self {
        Self {
            display_period,
            index: 0,
            summary_start_index: 0,
            aggregators: BTreeMap::new(),
        }
    }

    /// Number of completed steps.
    pub const fn num_steps(&self) -> u64 {
        self.index
    }

    /// Mean of the scalar values logged under `name` in the current summary period.
    pub fn scalar_mean(&self, name: &str) -> Option<f64> {
        match self.aggregators.get(name)? {
            Aggregator::ScalarMean(stats) if stats.count() > 0 => Some(stats.mean()),
            _ => None,
        }
    }

    /// Counts of the index samples logged under `name` in the current summary period.
    pub fn index_counts(&self, name: &str) -> Option<&[u64]> {
        match self.aggregators.get(name)? {
            Aggregator::IndexDistribution(counts) => Some(counts.as_slice()),
            _ => None,
        }
    }

    /// Report the summary and clear all aggregated data.
    pub fn flush(&mut self) {
        if self.index > self.summary_start_index {
            info!(
                "==== Steps {} - {} ====",
                self.summary_start_index,
                self.index - 1
            );
            for (name, aggregator) in &mut self.aggregators {
                info!("{}: {}", name, aggregator);
                aggregator.clear();
            }
        }
        self.summary_start_index = self.index;
    }
}

impl Default for SummaryLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl StatsLogger for SummaryLogger {
    fn log(&mut self, name: &'static str, value: Loggable) -> Result<(), LogError> {
        if let Some(aggregator) = self.aggregators.get_mut(name) {
            aggregator
                .update(value)
                .map_err(|expected| LogError::new(name, value, expected))
        } else {
            self.aggregators.insert(name, Aggregator::new(value));
            Ok(())
        }
    }

    fn done(&mut self) {
        self.index += 1;
        if self.display_period > 0 && self.index - self.summary_start_index >= self.display_period
        {
            self.flush();
        }
    }
}

impl Drop for SummaryLogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.flush();
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Aggregator {
    ScalarMean(OnlineMean),
    IndexDistribution(Vec<u64>),
}

impl Aggregator {
    /// Create a new aggregator from a logged value.
    fn new(value: Loggable) -> Self {
        let mut aggregator = match value {
            Loggable::Scalar(_) => Self::ScalarMean(OnlineMean::new()),
            Loggable::IndexSample { size, .. } => Self::IndexDistribution(vec![0; size]),
        };
        // Cannot fail; the aggregator was made to match the value.
        let _ = aggregator.update(value);
        aggregator
    }

    /// Update an aggregator with a logged value.
    ///
    /// Returns `Err(expected)` if the value is incompatible with this aggregator.
    fn update(&mut self, value: Loggable) -> Result<(), String> {
        match (self, value) {
            (Self::ScalarMean(stats), Loggable::Scalar(x)) => {
                stats.push(x);
                Ok(())
            }
            (Self::IndexDistribution(counts), Loggable::IndexSample { value, size })
                if size == counts.len() && value < size =>
            {
                counts[value] += 1;
                Ok(())
            }
            (Self::ScalarMean(_), _) => Err("Scalar".into()),
            (Self::IndexDistribution(counts), _) => {
                Err(format!("IndexSample {{ value: < {0}, size: {0} }}", counts.len()))
            }
        }
    }

    /// Clear the aggregated values.
    fn clear(&mut self) {
        match self {
            Self::ScalarMean(stats) => stats.clear(),
            Self::IndexDistribution(counts) => counts.iter_mut().for_each(|c| *c = 0),
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ScalarMean(stats) => write!(f, "{}", stats.mean()),
            Self::IndexDistribution(counts) => {
                let total: u64 = counts.iter().sum();
                write!(f, "[")?;
                for (i, count) in counts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    #[allow(clippy::cast_precision_loss)]
                    let fraction = if total > 0 {
                        *count as f64 / total as f64
                    } else {
                        0.0
                    };
                    write!(f, "{:.3}", fraction)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod summary_logger {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn logger() -> SummaryLogger {
        SummaryLogger::new(0)
    }

    #[rstest]
    fn scalar_mean(mut logger: SummaryLogger) {
        for x in [1.0, 2.0, 6.0] {
            logger.log("reward", Loggable::Scalar(x)).unwrap();
            logger.done();
        }
        assert_eq!(logger.num_steps(), 3);
        assert_eq!(logger.scalar_mean("reward"), Some(3.0));
        assert_eq!(logger.scalar_mean("missing"), None);
    }

    #[rstest]
    fn index_counts(mut logger: SummaryLogger) {
        for value in [0, 2, 2, 1, 2] {
            logger
                .log("action", Loggable::IndexSample { value, size: 3 })
                .unwrap();
            logger.done();
        }
        assert_eq!(logger.index_counts("action"), Some(&[1, 1, 3][..]));
    }

    #[rstest]
    fn incompatible_value(mut logger: SummaryLogger) {
        logger.log("reward", Loggable::Scalar(1.0)).unwrap();
        let err = logger
            .log("reward", Loggable::IndexSample { value: 0, size: 2 })
            .unwrap_err();
        assert_eq!(
            err,
            LogError::new(
                "reward",
                Loggable::IndexSample { value: 0, size: 2 },
                "Scalar".into()
            )
        );
    }

    #[rstest]
    fn index_sample_size_mismatch(mut logger: SummaryLogger) {
        logger
            .log("action", Loggable::IndexSample { value: 0, size: 2 })
            .unwrap();
        assert!(logger
            .log("action", Loggable::IndexSample { value: 0, size: 3 })
            .is_err());
    }

    #[test]
    fn flush_clears_after_period() {
        let mut logger = SummaryLogger::new(2);
        logger.log("reward", Loggable::Scalar(1.0)).unwrap();
        logger.done();
        assert_eq!(logger.scalar_mean("reward"), Some(1.0));
        logger.log("reward", Loggable::Scalar(3.0)).unwrap();
        logger.done();
        // Second step completes the period
        assert_eq!(logger.scalar_mean("reward"), None);
    }
}
