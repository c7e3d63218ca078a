//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "ui-time")]
#[command(about = "A countdown label with restart and quit commands")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown duration in minutes (the label has no hours field)
    #[arg(short, long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..=59))]
    pub minutes: u64,

    /// Mirror the label to the terminal
    #[arg(long)]
    pub label: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Countdown duration in seconds
    pub fn duration_seconds(&self) -> u64 {
        self.minutes * 60
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fifteen_minutes_on_localhost() {
        let config = Config::try_parse_from(["ui-time"]).unwrap();
        assert_eq!(config.duration_seconds(), 900);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.label);
    }

    #[test]
    fn parses_overrides() {
        let config = Config::try_parse_from(["ui-time", "-m", "25", "-p", "9000", "--label", "-v"]).unwrap();
        assert_eq!(config.duration_seconds(), 1500);
        assert_eq!(config.port, 9000);
        assert!(config.label);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_durations_the_label_cannot_show() {
        assert!(Config::try_parse_from(["ui-time", "-m", "60"]).is_err());
        assert!(Config::try_parse_from(["ui-time", "-m", "0"]).is_err());
    }
}
