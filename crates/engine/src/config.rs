//! Configuration of the generation coordinator.

use crate::error::EngineError;

/// Parallelism and search limits of a calendar.
///
/// # Example
///
/// ```
/// use zodiac_engine::GeneratorConfig;
///
/// let config = GeneratorConfig::new()
///     .with_max_workers(8)
///     .with_max_extension_days(45);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_workers(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Upper bound on concurrently computing workers (and chunks per batch).
    max_workers: usize,
    /// How far beyond an expected edge the search for a lunar extreme may go.
    max_extension_days: u32,
}

impl GeneratorConfig {
    /// Creates a configuration with the defaults: 4 workers, 60 days.
    pub fn new() -> Self {
        Self {
            max_workers: 4,
            max_extension_days: 60,
        }
    }

    /// Sets the maximum number of workers.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Sets the maximum search distance for lunar extremes.
    pub fn with_max_extension_days(mut self, days: u32) -> Self {
        self.max_extension_days = days;
        self
    }

    /// Returns the maximum number of workers.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Returns the maximum search distance for lunar extremes.
    pub fn max_extension_days(&self) -> u32 {
        self.max_extension_days
    }

    /// Validates this configuration.
    ///
    /// Returns an error if either limit is zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_workers < 1 {
            return Err(EngineError::InvalidConfig {
                reason: format!("max_workers must be >= 1, got {}", self.max_workers),
            });
        }
        if self.max_extension_days < 1 {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "max_extension_days must be >= 1, got {}",
                    self.max_extension_days
                ),
            });
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
