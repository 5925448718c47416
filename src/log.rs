use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Logging setup for the whole process.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
        }
    }
}

impl LogConfig {
    pub fn new(debug: bool) -> Self {
        if debug {
            Self {
                level: LevelFilter::DEBUG,
            }
        } else {
            Self::default()
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn is_debug(&self) -> bool {
        self.level >= LevelFilter::DEBUG
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(config.is_debug())
        .with_level(config.is_debug())
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_is_the_default_level() {
        assert_eq!(LogConfig::default().level(), LevelFilter::INFO);
        assert_eq!(LogConfig::new(false).level(), LevelFilter::INFO);
    }

    #[test]
    fn debug_flag_raises_level() {
        let config = LogConfig::new(true);
        assert_eq!(config.level(), LevelFilter::DEBUG);
        assert!(config.is_debug());
    }
}
