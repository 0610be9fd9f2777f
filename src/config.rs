//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::TimerSpec;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "keep-time")]
#[command(about = "Independent count-up and count-down status timers")]
#[command(version)]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Extra timer as TITLE,SECONDS,up|down[,COLOR] (repeatable)
    #[arg(short, long = "timer", value_name = "SPEC")]
    pub timers: Vec<TimerSpec>,

    /// Do not create the default count-down and count-up timers
    #[arg(long)]
    pub no_defaults: bool,

    /// Create timers paused instead of starting them
    #[arg(long)]
    pub paused: bool,

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

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timers requested on the command line, honouring `--paused`
    pub fn timer_specs(&self) -> impl Iterator<Item = TimerSpec> + '_ {
        self.timers.iter().cloned().map(|spec| TimerSpec {
            start: !self.paused,
            ..spec
        })
    }
}
