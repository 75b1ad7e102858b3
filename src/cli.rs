use clap::Parser;
use std::path::PathBuf;

use crate::calendar::ChainPolicy;
use crate::config::Config;

/// TextCal - turn event descriptions into an iCalendar file
#[derive(Debug, Parser)]
#[command(name = "textcal")]
#[command(about = "Turn free-form event descriptions into an .ics file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Event description (prompts interactively if not given)
    pub text: Option<String>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// IANA time zone resolved times are interpreted in
    #[arg(long)]
    pub timezone: Option<String>,

    /// Keep local times instead of converting to UTC
    #[arg(long = "local-time")]
    pub local_time: bool,

    /// When "the day after" style phrases move their reference date
    #[arg(long, value_enum)]
    pub chain_policy: Option<ChainPolicy>,

    /// Write a default config file and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.output_filename = output.clone();
        }
        if let Some(timezone) = &self.timezone {
            config.timezone = timezone.clone();
        }
        if self.local_time {
            config.use_standard_timezone = false;
        }
        if let Some(policy) = self.chain_policy {
            config.chain_policy = policy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "textcal",
            "exam on friday",
            "-o",
            "out.ics",
            "--local-time",
            "--timezone",
            "Asia/Tokyo",
            "--chain-policy",
            "every-event",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(cli.text.as_deref(), Some("exam on friday"));
        assert_eq!(config.output_filename, "out.ics");
        assert!(!config.use_standard_timezone);
        assert_eq!(config.timezone, "Asia/Tokyo");
        assert_eq!(config.chain_policy, ChainPolicy::EveryEvent);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["textcal"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
        assert!(cli.text.is_none());
    }
}
