use derive_builder::Builder;
use std::time::Duration;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// Number of buffered items that triggers an immediate flush
    #[builder(default = "50")]
    pub(crate) batch_size: usize,

    /// Maximum time a buffered item waits before a flush is forced
    #[builder(default = "Duration::from_secs(10)")]
    pub(crate) flush_interval: Duration,
}

impl Config {
    /// Returns the size threshold for a flush
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the interval between time-triggered flushes
    #[inline]
    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            batch_size: 50,
            flush_interval: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_expose_builder_values() {
        let config = ConfigBuilder::default()
            .batch_size(7usize)
            .flush_interval(Duration::from_millis(250))
            .build()
            .unwrap();

        assert_eq!(config.batch_size(), 7);
        assert_eq!(config.flush_interval(), Duration::from_millis(250));

        let defaults = Config::default();
        assert_eq!(defaults.batch_size(), 50);
        assert_eq!(defaults.flush_interval(), Duration::from_secs(10));
    }
}
