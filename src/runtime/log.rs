use env_logger::{Builder, Env};

#[derive(Clone, Copy, Debug)]
pub struct LogLevel(pub log::LevelFilter);
impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" | "warning" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" | "none" => log::LevelFilter::Off,
            _ => return Err(format!("Invalid log level: {}", s)),
        };
        Ok(LogLevel(level))
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_str().to_lowercase())
    }
}

/// Install the global logger. RUST_LOG, if set, takes precedence over `log_level`
pub fn setup_global_logger(log_level: LogLevel) {
    let env = Env::default().default_filter_or(log_level.to_string());
    let _ = Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_levels() {
        let level: LogLevel = "WARNING".parse().unwrap();
        assert_eq!(level.0, log::LevelFilter::Warn);
        assert_eq!(level.to_string(), "warn");
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
