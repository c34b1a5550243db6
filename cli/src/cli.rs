use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use solpot_api::consts::*;

#[derive(Parser)]
#[command(
    name = "solpot",
    about = "Opens the daily case and rotates the client seed for every account, once a day."
)]
pub struct Cli {
    #[arg(
        short = 'a',
        long = "accounts",
        default_value = ACCOUNTS_FILE,
        help = "File with one account cookie per line"
    )]
    pub accounts: PathBuf,

    #[arg(
        short = 'c',
        long = "config",
        default_value = CONFIG_FILE,
        help = "JSON config with UPDATE_CLIENT_SEED, DELAY_BETWEEN_ACCOUNTS and SECONDS_PER_DAY"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'l',
        long = "log-file",
        default_value = REPORT_FILE,
        help = "Append-only log that every error is written to"
    )]
    pub log_file: PathBuf,

    #[arg(long = "base-url", default_value = BASE_URL, hide = true)]
    pub base_url: BaseUrl,

    #[arg(short = 'v', long = "verbose", help = "Print verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(BaseUrl(s.trim_end_matches('/').to_string()))
            }
            _ => Err(format!(
                "Invalid base URL: '{}'. Use a full http:// or https:// URL",
                s
            )),
        }
    }
}
