//! Utils

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Arguments for the tag dictionary demos
#[derive(Debug, Parser)]
#[command(name = "tagdict-demo", about = "Query a tag dictionary fixture set", long_about = None)]
pub struct DemoArgs {
    /// Base directory holding `entries/<set>.yml`
    #[arg(short, long, env = "TAGDICT_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set to load
    #[arg(short, long, default_value = "people")]
    pub set: String,

    /// Tag to query for; repeat for a conjunction, `*` matches every item
    #[arg(short, long = "tag", default_value = "*")]
    pub tags: Vec<String>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_query_everything() -> TestResult {
        let args = DemoArgs::try_parse_from(["tagdict-demo"])?;

        assert_eq!(args.set, "people");
        assert_eq!(args.tags, ["*"]);

        Ok(())
    }

    #[test]
    fn repeated_tags_build_a_conjunction() -> TestResult {
        let args = DemoArgs::try_parse_from([
            "tagdict-demo",
            "--tag",
            "Female",
            "-t",
            "Teacher",
            "--log-format",
            "json",
        ])?;

        assert_eq!(args.tags, ["Female", "Teacher"]);
        assert!(matches!(args.logging.log_format, LogFormat::Json));

        Ok(())
    }
}
