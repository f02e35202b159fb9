use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level applied to this crate's targets; everything else stays at `warn`.
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Maps repeated `-v` flags onto a level.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Self {
            level: level.to_string(),
            ..Self::default()
        }
    }

    pub fn json_format(mut self, enable: bool) -> Self {
        self.json_format = enable;
        self
    }

    fn filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let filter =
            EnvFilter::new("warn").add_directive(format!("lyrics_maker={}", self.level).parse()?);
        Ok(filter)
    }

    /// Installs the global subscriber. Logs go to stderr so they never mix
    /// with the lyrics printed on stdout.
    pub fn init(self) -> Result<()> {
        let filter = self.filter()?;
        let registry = tracing_subscriber::registry().with(filter);

        if self.json_format {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|_| anyhow!("Failed to initialize logging (already set)"))?;
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|_| anyhow!("Failed to initialize logging (already set)"))?;
        }
        Ok(())
    }
}
