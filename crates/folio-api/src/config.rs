//! # Service Configuration
//!
//! Command-line flags with environment fallbacks, resolved once at startup
//! into an [`AppConfig`].

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::middleware::rate_limit::RateLimitPolicy;

/// Portfolio API server.
#[derive(Parser, Debug, Clone)]
#[command(name = "folio-api", version, about)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// JSON file with the project catalog. The catalog is empty without it.
    #[arg(long, env = "FOLIO_PROJECTS")]
    pub projects: Option<PathBuf>,

    /// Contact submissions allowed per client per window.
    #[arg(long, env = "FOLIO_CONTACT_LIMIT", default_value_t = 5,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub contact_limit: u32,

    /// Reply suggestions allowed per client per window.
    #[arg(long, env = "FOLIO_SUGGEST_LIMIT", default_value_t = 10,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub suggest_limit: u32,

    /// Rate limit window length in seconds.
    #[arg(long, env = "FOLIO_RATE_WINDOW_SECS", default_value_t = 3600,
          value_parser = clap::value_parser!(i64).range(1..=31_536_000))]
    pub rate_window_secs: i64,

    /// Most recent contact submissions kept in memory.
    #[arg(long, env = "FOLIO_CONTACT_CAPACITY", default_value_t = 1000,
          value_parser = clap::value_parser!(u64).range(1..=1_000_000))]
    pub contact_capacity: u64,

    /// How often expired rate limit entries are swept, in seconds.
    #[arg(long, env = "FOLIO_SWEEP_SECS", default_value_t = 3600,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub sweep_secs: u64,

    /// Draft suggested replies for contact submissions.
    #[arg(long, env = "FOLIO_REPLY_DRAFTS", default_value_t = true, action = ArgAction::Set)]
    pub reply_drafts: bool,

    /// Name used to sign drafted replies.
    #[arg(long, env = "FOLIO_OWNER", default_value = "Trevor Miller")]
    pub owner: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "FOLIO_LOG_JSON")]
    pub log_json: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub projects_path: Option<PathBuf>,
    pub contact_policy: RateLimitPolicy,
    pub suggest_policy: RateLimitPolicy,
    pub contact_capacity: usize,
    pub sweep_interval: std::time::Duration,
    pub reply_drafts: bool,
    pub owner: String,
    pub log_json: bool,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let window = chrono::Duration::seconds(self.rate_window_secs);
        AppConfig {
            port: self.port,
            projects_path: self.projects,
            contact_policy: RateLimitPolicy::new("contact", self.contact_limit, window),
            suggest_policy: RateLimitPolicy::new("suggest", self.suggest_limit, window),
            contact_capacity: usize::try_from(self.contact_capacity).unwrap_or(usize::MAX),
            sweep_interval: std::time::Duration::from_secs(self.sweep_secs),
            reply_drafts: self.reply_drafts,
            owner: self.owner,
            log_json: self.log_json,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let hour = chrono::Duration::hours(1);
        Self {
            port: 8080,
            projects_path: None,
            contact_policy: RateLimitPolicy::new("contact", 5, hour),
            suggest_policy: RateLimitPolicy::new("suggest", 10, hour),
            contact_capacity: 1000,
            sweep_interval: std::time::Duration::from_secs(3600),
            reply_drafts: true,
            owner: "Trevor Miller".to_string(),
            log_json: false,
        }
    }
}
