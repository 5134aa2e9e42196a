use crate::error::HuffError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct HuffConfig {
    /// Strip trailing whitespace before compressing. Makes the round trip lossy
    /// for inputs that end in whitespace.
    pub trim_trailing_whitespace: bool,
    pub show_progress: bool,
    pub stats_format: StatsFormat,
}

impl Default for HuffConfig {
    fn default() -> Self {
        Self {
            trim_trailing_whitespace: false,
            show_progress: false,
            stats_format: StatsFormat::Text,
        }
    }
}

impl HuffConfig {
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim_trailing_whitespace = trim;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_stats_format(mut self, format: StatsFormat) -> Self {
        self.stats_format = format;
        self
    }
}

impl FromStr for StatsFormat {
    type Err = HuffError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(StatsFormat::Text),
            "json" => Ok(StatsFormat::Json),
            _ => Err(HuffError::ConfigError(format!("Invalid stats format: {}", s))),
        }
    }
}

impl fmt::Display for StatsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}
