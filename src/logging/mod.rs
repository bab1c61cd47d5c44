//! Logging statistics from agent updates
mod summary;

pub use summary::SummaryLogger;

use thiserror::Error;

/// A value that can be logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loggable {
    /// A scalar value. Aggregate by taking means.
    Scalar(f64),
    /// A sample from a distribution over `0 .. size`
    IndexSample { value: usize, size: usize },
}

/// Log statistics from a sequence of agent steps.
pub trait StatsLogger {
    /// Log a value.
    ///
    /// # Args
    /// * `name` - The name that identifies this value.
    /// * `value` - The value to log.
    ///
    /// # Errors
    /// May return an error if the logged value is structurally incompatible
    /// with previous values logged under the same name.
    fn log(&mut self, name: &'static str, value: Loggable) -> Result<(), LogError>;

    /// Mark the end of a step.
    fn done(&mut self);
}

/// Logger that does nothing
impl StatsLogger for () {
    fn log(&mut self, _: &'static str, _: Loggable) -> Result<(), LogError> {
        Ok(())
    }

    fn done(&mut self) {}
}

impl<T: StatsLogger + ?Sized> StatsLogger for &mut T {
    fn log(&mut self, name: &'static str, value: Loggable) -> Result<(), LogError> {
        (**self).log(name, value)
    }

    fn done(&mut self) {
        (**self).done()
    }
}

/// Logged value is incompatible with earlier values of the same name.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("\"{name}\": incompatible value {value:?}, expected {expected}")]
pub struct LogError {
    name: &'static str,
    value: Loggable,
    expected: String,
}

impl LogError {
    pub const fn new(name: &'static str, value: Loggable, expected: String) -> Self {
        Self {
            name,
            value,
            expected,
        }
    }
}
